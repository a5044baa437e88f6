//! Declarative form field descriptors and submit-time validation.

use crate::domain::DATE_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use thiserror::Error;

/// Input format for `datetime-local` fields.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    DateTimeLocal,
    /// Choice among a fixed option list.
    Select(&'static [&'static str]),
    TextArea,
}

impl FieldKind {
    /// Placeholder hint shown in an empty input.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Date => "YYYY-MM-DD",
            Self::DateTimeLocal => "YYYY-MM-DDTHH:MM",
            Self::Select(_) => "←/→ to choose",
            Self::Number => "0",
            Self::Email => "name@example.com",
            Self::Text | Self::Tel | Self::TextArea => "",
        }
    }

    /// Whether a typed character is acceptable for this kind.
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Select(_) => false,
            Self::Number => c.is_ascii_digit() || c == '.' || c == '-',
            Self::Tel => c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'),
            Self::Date | Self::DateTimeLocal => c.is_ascii_digit() || matches!(c, '-' | ':' | 'T'),
            Self::Text | Self::Email | Self::TextArea => !c.is_control(),
        }
    }
}

/// One form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Record field name the input edits.
    pub name: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Rendered but not editable.
    pub read_only: bool,
    /// Rendered dimmed, skipped by focus, not validated.
    pub disabled: bool,
}

impl FieldSchema {
    /// Creates an optional, editable field.
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            read_only: false,
            disabled: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether the user can change the value.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !self.read_only && !self.disabled
    }
}

/// Reason a form submission was blocked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { field: String, label: String },

    #[error("{label} must be a number")]
    NotANumber { field: String, label: String },

    #[error("{label} must be a date ({format})")]
    NotADate {
        field: String,
        label: String,
        format: &'static str,
    },

    #[error("{label} must be one of the listed options")]
    NotAnOption { field: String, label: String },
}

impl ValidationError {
    /// Name of the field that failed.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. }
            | Self::NotANumber { field, .. }
            | Self::NotADate { field, .. }
            | Self::NotAnOption { field, .. } => field,
        }
    }
}

/// Validates `values` against `fields` in schema order.
///
/// The first failing field is reported. Disabled fields are not checked; empty
/// optional fields pass regardless of kind.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing field.
pub fn validate(fields: &[FieldSchema], values: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    for schema in fields.iter().filter(|f| !f.disabled) {
        let value = values.get(schema.name).map_or("", |v| v.trim());
        let field = || schema.name.to_string();
        let label = || schema.label.to_string();

        if value.is_empty() {
            if schema.required {
                return Err(ValidationError::Required { field: field(), label: label() });
            }
            continue;
        }

        match schema.kind {
            FieldKind::Number if value.parse::<f64>().is_err() => {
                return Err(ValidationError::NotANumber { field: field(), label: label() });
            }
            FieldKind::Date if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() => {
                return Err(ValidationError::NotADate {
                    field: field(),
                    label: label(),
                    format: DATE_FORMAT,
                });
            }
            FieldKind::DateTimeLocal
                if NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT).is_err() =>
            {
                return Err(ValidationError::NotADate {
                    field: field(),
                    label: label(),
                    format: DATETIME_LOCAL_FORMAT,
                });
            }
            FieldKind::Select(options) if !options.contains(&value) => {
                return Err(ValidationError::NotAnOption { field: field(), label: label() });
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSchema] = &[
        FieldSchema::new("name", "Name", FieldKind::Text).required(),
        FieldSchema::new("weight", "Weight", FieldKind::Number),
        FieldSchema::new("status", "Status", FieldKind::Select(&["open", "closed"])).required(),
        FieldSchema::new("internal", "Internal", FieldKind::Text).required().disabled(),
    ];

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn first_failing_field_is_reported() {
        let err = validate(FIELDS, &values(&[("weight", "abc")])).unwrap_err();
        assert_eq!(err.field(), "name");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let err = validate(FIELDS, &values(&[("name", "   ")])).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn kind_checks_apply_to_filled_fields() {
        let err = validate(FIELDS, &values(&[("name", "x"), ("weight", "12kg"), ("status", "open")])).unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber { .. }));

        let err = validate(FIELDS, &values(&[("name", "x"), ("status", "archived")])).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnOption { .. }));
    }

    #[test]
    fn disabled_fields_are_skipped() {
        assert!(validate(FIELDS, &values(&[("name", "x"), ("status", "closed")])).is_ok());
    }

    #[test]
    fn number_inputs_reject_letters() {
        assert!(FieldKind::Number.accepts('7'));
        assert!(!FieldKind::Number.accepts('k'));
        assert!(!FieldKind::Select(&["a"]).accepts('a'));
    }
}
