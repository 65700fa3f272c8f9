//! Property-based integration tests for board sorting and pagination.

use proptest::prelude::*;
use quoteboard_core::board::{paginate, sort_quotes, SortKey};
use quoteboard_market_data::Quote;

// =============================================================================
// Generators
// =============================================================================

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Price),
        Just(SortKey::Change),
        Just(SortKey::ChangesPercentage),
        Just(SortKey::MarketCap),
    ]
}

fn arb_quote() -> impl Strategy<Value = Quote> {
    (
        "[A-Z]{1,5}",
        0.0f64..5000.0,   // price
        -50.0f64..50.0,   // change
        -10.0f64..10.0,   // changes percentage
        0.0f64..3e12,     // market cap
    )
        .prop_map(|(symbol, price, change, pct, cap)| {
            Quote::new(symbol.clone(), symbol, price, change, pct, cap)
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Sorting yields a non-increasing column and keeps every row.
    #[test]
    fn prop_sort_descending(
        quotes in proptest::collection::vec(arb_quote(), 0..50),
        key in arb_sort_key(),
    ) {
        let mut sorted = quotes.clone();
        sort_quotes(&mut sorted, key);

        prop_assert_eq!(sorted.len(), quotes.len());
        for pair in sorted.windows(2) {
            prop_assert!(key.value(&pair[0]) >= key.value(&pair[1]));
        }
    }

    /// Walking every page reproduces the list exactly once.
    #[test]
    fn prop_pages_partition_list(
        items in proptest::collection::vec(any::<u16>(), 0..100),
        page_size in 1usize..20,
    ) {
        let first = paginate(&items, 1, page_size);
        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages() {
            let slice = paginate(&items, page, page_size);
            prop_assert!(!slice.items.is_empty());
            prop_assert!(slice.items.len() <= page_size);
            rebuilt.extend_from_slice(slice.items);
        }
        prop_assert_eq!(rebuilt, items.clone());
        prop_assert!(paginate(&items, first.total_pages() + 1, page_size).items.is_empty());
    }
}
