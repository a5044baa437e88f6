//! Free-text search plus categorical equality filtering over records.
//!
//! [`filter`] is a pure function: it keeps the records that pass the search
//! predicate AND every categorical predicate, in input order.

use crate::domain::error::{HaulboardError, Result};
use crate::domain::Record;
use std::collections::BTreeMap;

/// Option value that stands for "no constraint".
pub const ALL: &str = "all";

/// Current choice of one categorical filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Record field must equal this value exactly.
    Value(String),
}

impl Selection {
    /// Returns the selected value, or `None` for [`Selection::All`].
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Declaration of a categorical filter on one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalFilter {
    /// Filter name, the key in [`FilterState`].
    pub name: &'static str,
    /// Label shown on the filter chip.
    pub label: &'static str,
    /// Record field compared against the selection.
    pub field: &'static str,
    /// Declared option set, excluding the [`ALL`] sentinel.
    pub options: &'static [&'static str],
}

/// Search text plus categorical selections for one mounted screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text search term, possibly empty.
    pub search_term: String,
    categorical: BTreeMap<String, Selection>,
}

impl FilterState {
    /// Creates an unconstrained state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selection for a filter name ([`Selection::All`] when unset).
    #[must_use]
    pub fn selection(&self, name: &str) -> &Selection {
        const UNSET: &Selection = &Selection::All;
        self.categorical.get(name).unwrap_or(UNSET)
    }

    /// Selects a value for a categorical filter.
    ///
    /// `"all"` clears the constraint.
    ///
    /// # Errors
    ///
    /// Returns [`HaulboardError::InvalidFilterValue`] if `value` is neither the
    /// sentinel nor one of the filter's declared options. The state is unchanged.
    pub fn select(&mut self, filter: &CategoricalFilter, value: &str) -> Result<()> {
        let selection = if value == ALL {
            Selection::All
        } else if filter.options.contains(&value) {
            Selection::Value(value.to_string())
        } else {
            return Err(HaulboardError::InvalidFilterValue {
                filter: filter.name.to_string(),
                value: value.to_string(),
            });
        };

        self.categorical.insert(filter.name.to_string(), selection);
        Ok(())
    }

    /// Steps a filter through `all → options... → all`.
    pub fn cycle(&mut self, filter: &CategoricalFilter, forward: bool) {
        let options = filter.options;
        if options.is_empty() {
            return;
        }

        let position = match self.selection(filter.name) {
            Selection::All => None,
            Selection::Value(v) => options.iter().position(|o| o == v),
        };

        // Slot 0 is "all", slots 1..=len are the options.
        let slots = options.len() + 1;
        let current = position.map_or(0, |p| p + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };

        let selection = if next == 0 {
            Selection::All
        } else {
            Selection::Value(options[next - 1].to_string())
        };
        self.categorical.insert(filter.name.to_string(), selection);
    }

    /// Returns `true` when no predicate is active.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.categorical.values().all(|s| *s == Selection::All)
    }
}

/// Reduces `records` to those matching the search term and every categorical filter.
///
/// Text matching is a case-insensitive substring test over `searchable` fields;
/// a whitespace-only term matches everything. Only filters listed in
/// `categorical` are applied. Input order is preserved.
#[must_use]
pub fn filter(
    records: &[Record],
    state: &FilterState,
    searchable: &[&str],
    categorical: &[CategoricalFilter],
) -> Vec<Record> {
    let term = state.search_term.trim().to_lowercase();

    let _span = tracing::debug_span!("filter_records",
        total = records.len(),
        term_len = term.len(),
    )
    .entered();

    let filtered: Vec<Record> = records
        .iter()
        .filter(|record| matches_text(record, &term, searchable))
        .filter(|record| {
            categorical.iter().all(|f| match state.selection(f.name) {
                Selection::All => true,
                Selection::Value(v) => record.text(f.field) == *v,
            })
        })
        .cloned()
        .collect();

    tracing::debug!(filtered = filtered.len(), "filter applied");
    filtered
}

fn matches_text(record: &Record, term: &str, searchable: &[&str]) -> bool {
    term.is_empty()
        || searchable
            .iter()
            .any(|field| record.text(field).to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;

    const TYPE_FILTER: CategoricalFilter = CategoricalFilter {
        name: "type",
        label: "Type",
        field: "type",
        options: &["corporate", "individual"],
    };

    fn customer(code: &str, contact: &str, kind: &str) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert("contact".to_string(), FieldValue::Text(contact.to_string()));
        fields.insert("type".to_string(), FieldValue::Text(kind.to_string()));
        Record::new(code, "code", fields)
    }

    fn sample() -> Vec<Record> {
        vec![
            customer("C1", "Budi Santoso", "corporate"),
            customer("C2", "Siti Rahma", "individual"),
            customer("C3", "Andi Wijaya", "corporate"),
            customer("C4", "Dewi Lestari", "individual"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut state = FilterState::new();
        state.search_term = "BUDI".to_string();

        let result = filter(&sample(), &state, &["code", "contact"], &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "C1");
    }

    #[test]
    fn whitespace_term_is_empty() {
        let mut state = FilterState::new();
        state.search_term = "   ".to_string();
        assert_eq!(filter(&sample(), &state, &["contact"], &[]), sample());
        assert!(state.is_unconstrained());
    }

    #[test]
    fn search_and_categorical_combine() {
        let mut state = FilterState::new();
        state.select(&TYPE_FILTER, "corporate").unwrap();
        state.search_term = "andi".to_string();

        let ids: Vec<_> = filter(&sample(), &state, &["contact"], &[TYPE_FILTER])
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["C3"]);
    }

    #[test]
    fn select_rejects_undeclared_value() {
        let mut state = FilterState::new();
        let err = state.select(&TYPE_FILTER, "government").unwrap_err();
        assert!(matches!(err, HaulboardError::InvalidFilterValue { .. }));
        assert_eq!(state.selection("type"), &Selection::All);
    }

    #[test]
    fn cycle_walks_options_and_wraps() {
        let mut state = FilterState::new();
        state.cycle(&TYPE_FILTER, true);
        assert_eq!(state.selection("type").value(), Some("corporate"));
        state.cycle(&TYPE_FILTER, true);
        assert_eq!(state.selection("type").value(), Some("individual"));
        state.cycle(&TYPE_FILTER, true);
        assert_eq!(state.selection("type"), &Selection::All);
        state.cycle(&TYPE_FILTER, false);
        assert_eq!(state.selection("type").value(), Some("individual"));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let mut state = FilterState::new();
        state.search_term = "x".to_string();
        assert!(filter(&[], &state, &["contact"], &[TYPE_FILTER]).is_empty());
    }
}
