//! Generic create / edit form driven by a field schema.
//!
//! # State machine
//!
//! ```text
//! Closed ──open──▶ Editing ──begin_submit──▶ Submitting ──saved──▶ Closed
//!                     ▲          │ invalid        │ failed
//!                     └──────────┴────────────────┘
//! ```
//!
//! The modal performs no I/O. A successful [`FormModal::begin_submit`] hands the
//! full value map to the caller, which owns persistence and later reports back via
//! [`FormModal::submit_failed`] or by closing the modal.

use super::field::{validate, FieldKind, FieldSchema, ValidationError};
use crate::domain::{Record, Resource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the form creates a new record or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Lifecycle phase of an open form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// Values handed to the caller on a valid submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub resource: Resource,
    pub mode: FormMode,
    pub values: BTreeMap<String, String>,
    /// Caller-chosen id that the save reply must echo.
    pub ticket: u64,
}

/// Why a submit did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A save is already in flight.
    Busy,
    /// Validation failed on a field.
    Invalid(ValidationError),
}

/// An open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModal {
    pub resource: Resource,
    pub mode: FormMode,
    pub fields: &'static [FieldSchema],
    /// Current value of every schema field, keyed by field name.
    pub values: BTreeMap<String, String>,
    /// Index into `fields` of the focused input.
    pub focus: usize,
    pub phase: FormPhase,
    /// Inline error line from the last rejected or failed submit.
    pub error: Option<String>,
    pristine: bool,
    /// Ticket of the save in flight.
    ticket: Option<u64>,
}

impl FormModal {
    /// Opens a form, seeded from `initial` (edit) or empty (create).
    #[must_use]
    pub fn open(resource: Resource, fields: &'static [FieldSchema], initial: Option<&Record>) -> Self {
        let seed = initial.map(Record::to_text_map).unwrap_or_default();
        let values = fields
            .iter()
            .map(|f| (f.name.to_string(), seed.get(f.name).cloned().unwrap_or_default()))
            .collect();

        let mode = initial.map_or(FormMode::Create, |r| FormMode::Edit { id: r.id.clone() });

        Self {
            resource,
            mode,
            fields,
            values,
            focus: fields.iter().position(|f| !f.disabled).unwrap_or(0),
            phase: FormPhase::Editing,
            error: None,
            pristine: true,
            ticket: None,
        }
    }

    /// Modal title ("New Customer", "Edit Customer CUST-001").
    #[must_use]
    pub fn title(&self) -> String {
        match &self.mode {
            FormMode::Create => format!("New {}", self.resource.singular()),
            FormMode::Edit { id } => format!("Edit {} {id}", self.resource.singular()),
        }
    }

    /// Whether any value changed since the form opened.
    #[must_use]
    pub const fn is_pristine(&self) -> bool {
        self.pristine
    }

    #[must_use]
    pub fn focused_field(&self) -> Option<&FieldSchema> {
        self.fields.get(self.focus)
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Moves focus to the next non-disabled field, wrapping around.
    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    /// Moves focus to the previous non-disabled field, wrapping around.
    pub fn focus_previous(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        for offset in 1..=len {
            let idx = if forward {
                (self.focus + offset) % len
            } else {
                (self.focus + len * offset - offset) % len
            };
            if !self.fields[idx].disabled {
                self.focus = idx;
                return;
            }
        }
    }

    /// Types a character into the focused field. Returns whether the value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(schema) = self.editable_focus() else {
            return false;
        };
        if !schema.kind.accepts(c) {
            return false;
        }
        self.edit(schema.name, |value| value.push(c))
    }

    /// Deletes the last character of the focused field. Returns whether the value changed.
    pub fn backspace(&mut self) -> bool {
        let Some(schema) = self.editable_focus() else {
            return false;
        };
        if matches!(schema.kind, FieldKind::Select(_)) {
            return false;
        }
        self.edit(schema.name, |value| {
            value.pop();
        })
    }

    /// Steps a focused select field through its options. Returns whether the value changed.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        let Some(schema) = self.editable_focus() else {
            return false;
        };
        let FieldKind::Select(options) = schema.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }

        let current = options.iter().position(|o| *o == self.value(schema.name));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        self.edit(schema.name, |value| *value = options[next].to_string())
    }

    /// Validates and, if valid, enters [`FormPhase::Submitting`] holding
    /// `ticket` until the reply arrives.
    ///
    /// On a validation failure the form stays in [`FormPhase::Editing`], focus
    /// jumps to the failing field, and the error line is set.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected::Busy`] while a save is in flight and
    /// [`SubmitRejected::Invalid`] when validation fails.
    pub fn begin_submit(&mut self, ticket: u64) -> Result<FormSubmission, SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitRejected::Busy);
        }

        if let Err(e) = validate(self.fields, &self.values) {
            if let Some(idx) = self.fields.iter().position(|f| f.name == e.field()) {
                self.focus = idx;
            }
            self.error = Some(e.to_string());
            return Err(SubmitRejected::Invalid(e));
        }

        self.phase = FormPhase::Submitting;
        self.error = None;
        self.ticket = Some(ticket);

        Ok(FormSubmission {
            resource: self.resource,
            mode: self.mode.clone(),
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.trim().to_string()))
                .collect(),
            ticket,
        })
    }

    /// Whether this form is waiting on the save identified by `ticket`.
    #[must_use]
    pub fn awaits(&self, ticket: u64) -> bool {
        self.phase == FormPhase::Submitting && self.ticket == Some(ticket)
    }

    /// Returns to editing after the caller's save failed.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Editing;
        self.ticket = None;
        self.error = Some(message.into());
    }

    fn editable_focus(&self) -> Option<FieldSchema> {
        if self.phase == FormPhase::Submitting {
            return None;
        }
        self.focused_field().copied().filter(FieldSchema::is_editable)
    }

    fn edit(&mut self, name: &str, apply: impl FnOnce(&mut String)) -> bool {
        let value = self.values.entry(name.to_string()).or_default();
        let before = value.clone();
        apply(value);
        let changed = *value != before;
        if changed {
            self.pristine = false;
            self.error = None;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;

    const FIELDS: &[FieldSchema] = &[
        FieldSchema::new("code", "Code", FieldKind::Text).read_only(),
        FieldSchema::new("name", "Name", FieldKind::Text).required(),
        FieldSchema::new("legacy", "Legacy", FieldKind::Text).disabled(),
        FieldSchema::new("kind", "Kind", FieldKind::Select(&["a", "b"])).required(),
    ];

    fn record() -> Record {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), FieldValue::Text("Alpha".to_string()));
        fields.insert("kind".to_string(), FieldValue::Text("b".to_string()));
        Record::new("X-1", "code", fields)
    }

    #[test]
    fn create_form_opens_pristine_and_empty() {
        let form = FormModal::open(Resource::Customers, FIELDS, None);
        assert_eq!(form.mode, FormMode::Create);
        assert!(form.is_pristine());
        assert_eq!(form.value("name"), "");
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(form.title(), "New Customer");
    }

    #[test]
    fn edit_form_is_seeded_from_record() {
        let form = FormModal::open(Resource::Customers, FIELDS, Some(&record()));
        assert_eq!(form.mode, FormMode::Edit { id: "X-1".to_string() });
        assert_eq!(form.value("code"), "X-1");
        assert_eq!(form.value("kind"), "b");
    }

    #[test]
    fn read_only_field_rejects_edits() {
        let mut form = FormModal::open(Resource::Customers, FIELDS, Some(&record()));
        assert_eq!(form.focus, 0);
        assert!(!form.input_char('Z'));
        assert!(!form.backspace());
        assert!(form.is_pristine());
    }

    #[test]
    fn focus_skips_disabled_fields() {
        let mut form = FormModal::open(Resource::Customers, FIELDS, None);
        form.focus_next();
        assert_eq!(form.focused_field().unwrap().name, "name");
        form.focus_next();
        assert_eq!(form.focused_field().unwrap().name, "kind");
        form.focus_next();
        assert_eq!(form.focused_field().unwrap().name, "code");
        form.focus_previous();
        assert_eq!(form.focused_field().unwrap().name, "kind");
    }

    #[test]
    fn unsubmitted_form_awaits_no_ticket() {
        let form = FormModal::open(Resource::Customers, FIELDS, None);
        assert!(!form.awaits(0));
        assert!(!form.awaits(1));
    }

    #[test]
    fn invalid_submit_stays_open_and_focuses_failure() {
        let mut form = FormModal::open(Resource::Customers, FIELDS, None);
        let rejected = form.begin_submit(1).unwrap_err();

        assert!(matches!(rejected, SubmitRejected::Invalid(ValidationError::Required { .. })));
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(form.focused_field().unwrap().name, "name");
        assert_eq!(form.error.as_deref(), Some("Name is required"));
    }

    #[test]
    fn valid_submit_moves_to_submitting_and_blocks_edits() {
        let mut form = FormModal::open(Resource::Customers, FIELDS, None);
        form.focus_next();
        for c in "Beta ".chars() {
            form.input_char(c);
        }
        form.focus_next();
        assert!(form.cycle_option(true));

        let submission = form.begin_submit(3).unwrap();
        assert_eq!(submission.values.get("name").map(String::as_str), Some("Beta"));
        assert_eq!(submission.values.get("kind").map(String::as_str), Some("a"));
        assert_eq!(submission.ticket, 3);
        assert_eq!(form.phase, FormPhase::Submitting);
        assert!(form.awaits(3));
        assert!(!form.awaits(2));

        assert!(!form.cycle_option(true));
        assert_eq!(form.begin_submit(4).unwrap_err(), SubmitRejected::Busy);
        assert!(form.awaits(3));

        form.submit_failed("store unavailable");
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(form.error.as_deref(), Some("store unavailable"));
        assert!(!form.awaits(3));
    }
}
