//! Confirm / cancel dialog gating destructive actions.

use crate::domain::Resource;

/// The destructive operation a confirm dialog guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIntent {
    pub resource: Resource,
    pub id: String,
}

/// An open confirmation dialog.
///
/// Only two terminal actions exist: confirm and cancel. While `loading` is set
/// both are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmModal {
    pub message: String,
    pub intent: DeleteIntent,
    pub loading: bool,
}

impl ConfirmModal {
    /// Opens a delete confirmation for one record.
    #[must_use]
    pub fn delete(resource: Resource, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Delete {} {id}? This cannot be undone.", resource.singular()),
            intent: DeleteIntent { resource, id },
            loading: false,
        }
    }

    /// Confirms: returns the intent to run and enters the loading state.
    ///
    /// Returns `None` while already loading.
    pub fn confirm(&mut self) -> Option<DeleteIntent> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(self.intent.clone())
    }

    /// Whether a cancel would be honored right now.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        !self.loading
    }

    /// Sets the loading flag from the outside (clears it after a failed run).
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
