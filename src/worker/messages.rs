//! Worker thread message types for cross-thread communication.
//!
//! The plugin thread never touches the record store directly. It posts a
//! [`WorkerMessage`] and later receives a [`WorkerResponse`] through a
//! `CustomMessage` event. Each request carries the caller's trace context so
//! worker spans join the plugin's trace.

use crate::domain::{Record, Resource};
use crate::forms::FormMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the active span.
    ///
    /// Returns `None` when the current span has no valid OpenTelemetry context
    /// (tracing disabled or filtered out).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_records(LoadRecords { resource: Resource }),
    load_snapshot(LoadSnapshot {}),
    replace_records(ReplaceRecords { resource: Resource, records: Vec<Record> }),
    save_record(SaveRecord { resource: Resource, mode: FormMode, values: BTreeMap<String, String>, ticket: u64 }),
    delete_record(DeleteRecord { resource: Resource, id: String }),
}

/// Requests from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read every record of one resource.
    LoadRecords {
        resource: Resource,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read every collection (dashboard and report fallbacks).
    LoadSnapshot {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Overwrite one collection with freshly fetched records.
    ReplaceRecords {
        resource: Resource,
        records: Vec<Record>,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Create or replace a record from submitted form values.
    SaveRecord {
        resource: Resource,
        mode: FormMode,
        values: BTreeMap<String, String>,
        /// Identifies the submit; echoed in the reply.
        ticket: u64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove a record.
    DeleteRecord {
        resource: Resource,
        id: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context carried by any variant.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadRecords { trace_context, .. }
            | Self::LoadSnapshot { trace_context }
            | Self::ReplaceRecords { trace_context, .. }
            | Self::SaveRecord { trace_context, .. }
            | Self::DeleteRecord { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Current contents of one collection.
    RecordsLoaded { resource: Resource, records: Vec<Record> },

    /// Current contents of every collection.
    SnapshotLoaded { collections: Vec<(Resource, Vec<Record>)> },

    /// A save went through.
    RecordSaved { resource: Resource, record: Record, ticket: u64 },

    /// A save was refused; the submitting form stays open.
    SaveRejected { resource: Resource, message: String, ticket: u64 },

    /// A delete went through.
    RecordDeleted { resource: Resource, id: String },

    /// A delete was refused; the confirm dialog leaves its loading state.
    DeleteRejected { resource: Resource, id: String, message: String },

    /// Any other failure.
    Error { message: String },
}
