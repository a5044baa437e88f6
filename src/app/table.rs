//! Local state of one mounted list screen.
//!
//! Owns the raw collection plus the derived filtered view, the filter and page
//! cursors, the row cursor and the modal. Everything here is discarded when the
//! user navigates away.

use crate::data::{table_spec, Origin, TableSpec};
use crate::domain::{Record, Resource};
use crate::forms::{ConfirmModal, FormModal, Modal};
use crate::query::{filter, paginate, FilterState, Page, PageState};
use std::num::NonZeroUsize;

/// State of a mounted table screen.
#[derive(Debug, Clone)]
pub struct TableState {
    pub resource: Resource,
    pub spec: &'static TableSpec,
    records: Vec<Record>,
    filtered: Vec<Record>,
    pub filter: FilterState,
    pub page: PageState,
    /// Row index within the current page.
    pub cursor: usize,
    /// Set until the first collection arrives.
    pub loading: bool,
    pub origin: Origin,
    pub modal: Modal,
    /// Index into `spec.filters` of the filter edited in filter mode.
    pub filter_focus: usize,
}

impl TableState {
    /// Mounts an empty, loading table.
    #[must_use]
    pub fn new(resource: Resource, page_size: NonZeroUsize) -> Self {
        Self {
            resource,
            spec: table_spec(resource),
            records: Vec::new(),
            filtered: Vec::new(),
            filter: FilterState::new(),
            page: PageState::new(page_size),
            cursor: 0,
            loading: true,
            origin: Origin::Demo,
            modal: Modal::Closed,
            filter_focus: 0,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    /// Replaces the whole collection.
    pub fn set_records(&mut self, records: Vec<Record>, origin: Origin) {
        tracing::debug!(resource = %self.resource, count = records.len(), origin = ?origin, "records set");
        self.records = records;
        self.origin = origin;
        self.loading = false;
        self.refilter();
    }

    /// Inserts a saved record, replacing the one with the same id.
    pub fn apply_saved(&mut self, record: Record) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.refilter();
    }

    /// Drops a deleted record. Returns whether it was present.
    pub fn apply_deleted(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.refilter();
        }
        removed
    }

    /// Re-runs the filter and fixes up the page and row cursors.
    ///
    /// A change in result length sends the view back to page 1.
    pub fn refilter(&mut self) {
        let _span = tracing::trace_span!("refilter", resource = %self.resource).entered();

        let previous_len = self.filtered.len();
        self.filtered = filter(&self.records, &self.filter, self.spec.searchable, self.spec.filters);

        if self.filtered.len() == previous_len {
            self.page.clamp(self.filtered.len());
        } else {
            self.page.reset();
            self.cursor = 0;
        }
        self.clamp_cursor();
    }

    /// The page currently on screen.
    #[must_use]
    pub fn current_page(&self) -> Page<'_, Record> {
        paginate(&self.filtered, self.page.current_page, self.page.page_size)
    }

    /// The record under the row cursor.
    #[must_use]
    pub fn selected(&self) -> Option<&Record> {
        self.current_page().items.get(self.cursor)
    }

    fn rows_on_page(&self) -> usize {
        self.current_page().items.len()
    }

    fn clamp_cursor(&mut self) {
        let rows = self.rows_on_page();
        if self.cursor >= rows {
            self.cursor = rows.saturating_sub(1);
        }
    }

    pub fn cursor_down(&mut self) {
        let rows = self.rows_on_page();
        if rows > 0 {
            self.cursor = (self.cursor + 1) % rows;
        }
    }

    pub fn cursor_up(&mut self) {
        let rows = self.rows_on_page();
        if rows > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(rows - 1);
        }
    }

    /// Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        let moved = self.page.next(self.filtered.len());
        if moved {
            self.cursor = 0;
        }
        moved
    }

    /// Returns whether the page changed.
    pub fn previous_page(&mut self) -> bool {
        let moved = self.page.previous();
        if moved {
            self.cursor = 0;
        }
        moved
    }

    pub fn push_search(&mut self, c: char) {
        self.filter.search_term.push(c);
        self.refilter();
    }

    pub fn pop_search(&mut self) {
        if self.filter.search_term.pop().is_some() {
            self.refilter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.filter.search_term.is_empty() {
            self.filter.search_term.clear();
            self.refilter();
        }
    }

    pub fn focus_next_filter(&mut self) {
        let count = self.spec.filters.len();
        if count > 0 {
            self.filter_focus = (self.filter_focus + 1) % count;
        }
    }

    /// Steps the focused categorical filter to its next (or previous) option.
    pub fn cycle_focused_filter(&mut self, forward: bool) {
        if let Some(spec) = self.spec.filters.get(self.filter_focus) {
            self.filter.cycle(spec, forward);
            self.refilter();
        }
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.modal = Modal::Form(FormModal::open(self.resource, self.spec.form, None));
    }

    /// Opens an edit form seeded from the selected row. Returns `false` when no
    /// row is selected.
    pub fn open_edit(&mut self) -> bool {
        let Some(record) = self.selected() else {
            return false;
        };
        let form = FormModal::open(self.resource, self.spec.form, Some(record));
        self.modal = Modal::Form(form);
        true
    }

    /// Opens a delete confirmation for the selected row.
    pub fn open_delete(&mut self) -> bool {
        let Some(record) = self.selected() else {
            return false;
        };
        let confirm = ConfirmModal::delete(self.resource, record.id.clone());
        self.modal = Modal::Confirm(confirm);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_records;
    use crate::domain::FieldValue;
    use std::collections::BTreeMap;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn numbered(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                let mut fields = BTreeMap::new();
                fields.insert("name".to_string(), FieldValue::Text(format!("Customer {i}")));
                Record::new(format!("CUST-{i:03}"), "code", fields)
            })
            .collect()
    }

    #[test]
    fn new_table_is_loading_and_empty() {
        let table = TableState::new(Resource::Customers, size(10));
        assert!(table.loading);
        assert!(table.selected().is_none());
        assert_eq!(table.current_page().total_pages, 1);
    }

    #[test]
    fn search_narrows_and_resets_to_first_page() {
        let mut table = TableState::new(Resource::Customers, size(2));
        table.set_records(demo_records(Resource::Customers).unwrap(), Origin::Demo);
        assert!(table.next_page());
        assert_eq!(table.page.current_page, 2);

        for c in "budi".chars() {
            table.push_search(c);
        }
        assert_eq!(table.filtered().len(), 1);
        assert_eq!(table.page.current_page, 1);
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("CUST-001"));

        table.clear_search();
        assert_eq!(table.filtered().len(), 4);
    }

    #[test]
    fn cursor_wraps_within_the_page() {
        let mut table = TableState::new(Resource::Customers, size(3));
        table.set_records(numbered(5), Origin::Demo);

        table.cursor_up();
        assert_eq!(table.cursor, 2);
        table.cursor_down();
        assert_eq!(table.cursor, 0);

        table.next_page();
        table.cursor_up();
        assert_eq!(table.cursor, 1);
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("CUST-005"));
    }

    #[test]
    fn page_navigation_stops_at_bounds() {
        let mut table = TableState::new(Resource::Customers, size(3));
        table.set_records(numbered(5), Origin::Demo);
        assert!(!table.previous_page());
        assert!(table.next_page());
        assert!(!table.next_page());
    }

    #[test]
    fn cycling_filters_applies_categorical_predicates() {
        let mut table = TableState::new(Resource::Customers, size(10));
        table.set_records(demo_records(Resource::Customers).unwrap(), Origin::Demo);

        let type_index = table.spec.filters.iter().position(|f| f.name == "type").unwrap();
        table.filter_focus = type_index;
        table.cycle_focused_filter(true);

        assert_eq!(table.filter.selection("type").value(), Some("corporate"));
        assert_eq!(table.filtered().len(), 2);
    }

    #[test]
    fn saved_records_replace_by_id_and_deletes_remove() {
        let mut table = TableState::new(Resource::Customers, size(10));
        table.set_records(numbered(3), Origin::Live);

        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), FieldValue::Text("Renamed".to_string()));
        table.apply_saved(Record::new("CUST-002", "code", fields));
        assert_eq!(table.records().len(), 3);
        assert_eq!(table.records()[1].text("name"), "Renamed");

        assert!(table.apply_deleted("CUST-002"));
        assert!(!table.apply_deleted("CUST-002"));
        assert_eq!(table.filtered().len(), 2);
    }

    #[test]
    fn edit_and_delete_need_a_selected_row() {
        let mut table = TableState::new(Resource::Customers, size(10));
        table.set_records(Vec::new(), Origin::Demo);
        assert!(!table.open_edit());
        assert!(!table.open_delete());
        assert!(!table.modal.is_open());

        table.set_records(numbered(1), Origin::Demo);
        assert!(table.open_delete());
        assert!(matches!(table.modal, Modal::Confirm(_)));
    }
}
