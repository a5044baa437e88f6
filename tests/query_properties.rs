//! Property tests for filtering and pagination.

use haulboard::data::table_spec;
use haulboard::domain::FieldValue;
use haulboard::query::{filter, paginate, total_pages, CategoricalFilter, FilterState, PageState};
use haulboard::{Record, Resource};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

const SEARCHABLE: &[&str] = &["code", "name", "city"];

fn filters() -> &'static [CategoricalFilter] {
    table_spec(Resource::Customers).filters
}

fn record_strategy() -> impl Strategy<Value = (String, String, &'static str, &'static str)> {
    (
        "[A-Za-z ]{0,12}",
        prop::sample::select(vec!["Jakarta", "Bandung", "Surabaya", "Medan"]).prop_map(String::from),
        prop::sample::select(vec!["corporate", "individual"]),
        prop::sample::select(vec!["active", "inactive"]),
    )
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, city, kind, status))| {
                let fields = BTreeMap::from([
                    ("name".to_string(), FieldValue::Text(name)),
                    ("city".to_string(), FieldValue::Text(city)),
                    ("type".to_string(), FieldValue::Text(kind.to_string())),
                    ("status".to_string(), FieldValue::Text(status.to_string())),
                ]);
                Record::new(format!("CUST-{:03}", i + 1), "code", fields)
            })
            .collect()
    })
}

fn state_strategy() -> impl Strategy<Value = FilterState> {
    ("[a-z ]{0,3}", 0usize..3, 0usize..3).prop_map(|(term, type_steps, status_steps)| {
        let mut state = FilterState::new();
        state.search_term = term;
        let [type_filter, status_filter] = filters() else {
            unreachable!("customers declare two filters");
        };
        for _ in 0..type_steps {
            state.cycle(type_filter, true);
        }
        for _ in 0..status_steps {
            state.cycle(status_filter, true);
        }
        state
    })
}

proptest! {
    #[test]
    fn unconstrained_filter_is_identity(records in records_strategy(), blanks in " {0,3}") {
        let mut state = FilterState::new();
        state.search_term = blanks;
        prop_assert_eq!(filter(&records, &state, SEARCHABLE, filters()), records);
    }

    #[test]
    fn filter_is_idempotent(records in records_strategy(), state in state_strategy()) {
        let once = filter(&records, &state, SEARCHABLE, filters());
        let twice = filter(&once, &state, SEARCHABLE, filters());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_keeps_an_ordered_subset_of_matches(records in records_strategy(), state in state_strategy()) {
        let kept = filter(&records, &state, SEARCHABLE, filters());
        let term = state.search_term.trim().to_lowercase();

        let mut source = records.iter();
        for record in &kept {
            prop_assert!(source.any(|r| r == record), "order or membership broken");
            prop_assert!(term.is_empty() || SEARCHABLE.iter().any(|f| record.text(f).to_lowercase().contains(&term)));
            for f in filters() {
                if let Some(value) = state.selection(f.name).value() {
                    prop_assert_eq!(record.text(f.field), value);
                }
            }
        }
    }

    #[test]
    fn pages_partition_the_collection(len in 0usize..120, size in 1usize..15) {
        let items: Vec<usize> = (0..len).collect();
        let size = NonZeroUsize::new(size).unwrap();
        let total = total_pages(len, size);

        prop_assert_eq!(total, len.div_ceil(size.get()).max(1));

        let mut joined = Vec::new();
        for page in 1..=total {
            let slice = paginate(&items, page, size);
            prop_assert!(slice.items.len() <= size.get());
            prop_assert_eq!(slice.total_pages, total);
            if page < total {
                prop_assert_eq!(slice.items.len(), size.get());
            }
            joined.extend_from_slice(slice.items);
        }
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn out_of_range_pages_clamp(len in 0usize..60, size in 1usize..10, page in 0usize..500) {
        let items: Vec<usize> = (0..len).collect();
        let size = NonZeroUsize::new(size).unwrap();
        let slice = paginate(&items, page, size);

        prop_assert!(slice.page >= 1 && slice.page <= slice.total_pages);
        prop_assert_eq!(slice.page, page.clamp(1, slice.total_pages));
    }

    #[test]
    fn page_state_never_leaves_range(len in 0usize..80, moves in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut state = PageState::new(NonZeroUsize::new(7).unwrap());
        for forward in moves {
            if forward { state.next(len); } else { state.previous(); }
            prop_assert!(state.current_page >= 1);
            prop_assert!(state.current_page <= total_pages(len, state.page_size));
        }
    }
}

#[test]
fn page_past_the_end_is_the_last_page() {
    let items: Vec<usize> = (0..25).collect();
    let size = NonZeroUsize::new(10).unwrap();
    assert_eq!(paginate(&items, 99, size), paginate(&items, 3, size));
    assert_eq!(paginate(&items, 3, size).items, &[20, 21, 22, 23, 24]);
}
