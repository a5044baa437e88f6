//! Modal forms and dialogs.
//!
//! - [`field`]: Field schema, field kinds, and submit-time validation
//! - [`form_modal`]: Schema-driven create / edit form state machine
//! - [`confirm`]: Confirm / cancel dialog for destructive actions
//!
//! At most one modal is open at a time; [`Modal`] makes "open without payload"
//! unrepresentable.

pub mod confirm;
pub mod field;
pub mod form_modal;

pub use confirm::{ConfirmModal, DeleteIntent};
pub use field::{validate, FieldKind, FieldSchema, ValidationError, DATETIME_LOCAL_FORMAT};
pub use form_modal::{FormMode, FormModal, FormPhase, FormSubmission, SubmitRejected};

/// The modal layer over a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Form(FormModal),
    Confirm(ConfirmModal),
}

impl Modal {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}
