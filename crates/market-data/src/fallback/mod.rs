//! Synthetic placeholder quotes.
//!
//! When a provider call fails or yields nothing, the dashboard still shows
//! one row per requested symbol with randomized but plausible numbers.

use std::ops::Range;
use std::sync::Arc;

use rand::Rng;

use crate::models::{Market, Quote};
use crate::names::NameDirectory;

/// Value ranges for one market's synthetic quotes.
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackRanges {
    pub price: Range<f64>,
    pub change: Range<f64>,
    pub market_cap: Range<f64>,
}

impl FallbackRanges {
    pub fn for_market(market: Market) -> Self {
        match market {
            Market::AShare => Self {
                price: 10.0..1010.0,
                change: -10.0..10.0,
                market_cap: 0.0..1e12,
            },
            Market::UsShare => Self {
                price: 10.0..310.0,
                change: -5.0..5.0,
                market_cap: 0.0..5e11,
            },
        }
    }
}

pub struct FallbackGenerator {
    names: Arc<dyn NameDirectory>,
}

impl FallbackGenerator {
    pub fn new(names: Arc<dyn NameDirectory>) -> Self {
        Self { names }
    }

    /// One synthetic quote per input symbol, in input order.
    pub fn generate(&self, symbols: &[String]) -> Vec<Quote> {
        self.generate_with(&mut rand::thread_rng(), symbols)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, symbols: &[String]) -> Vec<Quote> {
        symbols
            .iter()
            .map(|symbol| self.synthesize(rng, symbol))
            .collect()
    }

    fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R, symbol: &str) -> Quote {
        let ranges = FallbackRanges::for_market(Market::of_symbol(symbol));

        let price = rng.gen_range(ranges.price.clone());
        let change = rng.gen_range(ranges.change.clone());
        let market_cap = rng.gen_range(ranges.market_cap.clone());

        Quote::new(
            symbol,
            self.names.display_name(symbol),
            price,
            change,
            change / price * 100.0,
            market_cap,
        )
    }
}
