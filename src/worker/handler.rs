//! Worker thread implementation owning the record store.
//!
//! The worker is the only writer of records. It runs on a separate thread
//! spawned by Zellij, so saves and deletes never block rendering.

use crate::data::{MemoryStore, Store};
use crate::domain::error::Result;
use crate::domain::{Record, Resource};
use crate::forms::FormMode;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// The store is created lazily on the first message and seeded from the demo
/// fixtures.
#[derive(Serialize, Deserialize, Default)]
pub struct HaulboardWorker {
    #[serde(skip)]
    store: Option<Box<dyn Store>>,
}

impl HaulboardWorker {
    /// Creates a worker around an existing store.
    #[must_use]
    pub fn with_store(store: Box<dyn Store>) -> Self {
        Self { store: Some(store) }
    }

    fn store(&mut self) -> &mut dyn Store {
        self.store
            .get_or_insert_with(|| Box::new(MemoryStore::seeded()) as Box<dyn Store>)
            .as_mut()
    }

    /// Runs a store operation, turning failures into [`WorkerResponse::Error`].
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "store operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_records(&mut self, resource: Resource) -> WorkerResponse {
        Self::respond("load records", self.store().list(resource), |records| {
            tracing::debug!(resource = %resource, count = records.len(), "records loaded");
            WorkerResponse::RecordsLoaded { resource, records }
        })
    }

    fn handle_load_snapshot(&mut self) -> WorkerResponse {
        let store = self.store();
        let snapshot: Result<Vec<(Resource, Vec<Record>)>> = Resource::ALL
            .into_iter()
            .map(|r| store.list(r).map(|records| (r, records)))
            .collect();

        Self::respond("load snapshot", snapshot, |collections| WorkerResponse::SnapshotLoaded { collections })
    }

    fn handle_replace_records(&mut self, resource: Resource, records: Vec<Record>) -> WorkerResponse {
        let store = self.store();
        let result = store.replace(resource, records).and_then(|()| store.list(resource));

        Self::respond("replace records", result, |records| WorkerResponse::RecordsLoaded { resource, records })
    }

    fn handle_save_record(
        &mut self,
        resource: Resource,
        mode: &FormMode,
        values: &BTreeMap<String, String>,
        ticket: u64,
    ) -> WorkerResponse {
        match self.store().upsert(resource, mode, values) {
            Ok(record) => {
                tracing::debug!(resource = %resource, id = %record.id, ticket, "record saved");
                WorkerResponse::RecordSaved { resource, record, ticket }
            }
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, ticket, "save rejected");
                WorkerResponse::SaveRejected {
                    resource,
                    message: e.to_string(),
                    ticket,
                }
            }
        }
    }

    fn handle_delete_record(&mut self, resource: Resource, id: String) -> WorkerResponse {
        match self.store().delete(resource, &id) {
            Ok(()) => WorkerResponse::RecordDeleted { resource, id },
            Err(e) => {
                tracing::warn!(resource = %resource, id = %id, error = %e, "delete rejected");
                WorkerResponse::DeleteRejected {
                    resource,
                    id,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Re-attaches the plugin's span as the remote parent of worker spans.
    ///
    /// The returned guard must be held while the message is handled.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _guard = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadRecords { resource, .. } => self.handle_load_records(resource),
            WorkerMessage::LoadSnapshot { .. } => self.handle_load_snapshot(),
            WorkerMessage::ReplaceRecords { resource, records, .. } => self.handle_replace_records(resource, records),
            WorkerMessage::SaveRecord {
                resource,
                mode,
                values,
                ticket,
                ..
            } => self.handle_save_record(resource, &mode, &values, ticket),
            WorkerMessage::DeleteRecord { resource, id, .. } => self.handle_delete_record(resource, id),
        }
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for HaulboardWorker {
    /// Deserializes a [`WorkerMessage`], handles it and posts the
    /// [`WorkerResponse`] back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn store_is_seeded_lazily() {
        let mut worker = HaulboardWorker::default();
        let response = worker.handle_message(WorkerMessage::load_records(Resource::Customers));
        let WorkerResponse::RecordsLoaded { records, .. } = response else {
            panic!("unexpected response {response:?}");
        };
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn invalid_save_is_rejected_with_the_validation_message() {
        let mut worker = HaulboardWorker::with_store(Box::new(MemoryStore::seeded()));
        let response = worker.handle_message(WorkerMessage::save_record(
            Resource::Users,
            FormMode::Create,
            values(&[("name", "Ayu"), ("role", "admin"), ("status", "active")]),
            7,
        ));
        assert_eq!(
            response,
            WorkerResponse::SaveRejected {
                resource: Resource::Users,
                message: "Email is required".to_string(),
                ticket: 7,
            }
        );
    }

    #[test]
    fn replace_then_load_returns_the_new_collection() {
        let mut worker = HaulboardWorker::with_store(Box::new(MemoryStore::new()));
        let record = Record::new("JO-100", "code", BTreeMap::new());
        let response = worker.handle_message(WorkerMessage::replace_records(Resource::JobOrders, vec![record.clone()]));
        assert_eq!(
            response,
            WorkerResponse::RecordsLoaded {
                resource: Resource::JobOrders,
                records: vec![record],
            }
        );
    }

    #[test]
    fn snapshot_covers_every_resource() {
        let mut worker = HaulboardWorker::default();
        let WorkerResponse::SnapshotLoaded { collections } = worker.handle_message(WorkerMessage::load_snapshot()) else {
            panic!("expected a snapshot");
        };
        assert_eq!(collections.len(), Resource::ALL.len());
    }
}
