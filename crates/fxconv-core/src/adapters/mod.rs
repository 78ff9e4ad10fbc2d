//! Ticker source adapters.

mod uphold;

pub use uphold::UpholdTickerSource;
