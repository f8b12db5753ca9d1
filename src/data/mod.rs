//! Upstream data: the FRED client, the series normalizer, and snapshot/history assembly.

pub mod fred;
pub mod macro_data;
pub mod normalize;

#[cfg(test)]
pub(crate) mod testing;

pub use fred::{FetchError, FredClient, ObservationRequest, ObservationSource, SortOrder};
pub use macro_data::{DEFAULT_NEUTRAL_RATE, HistoryBundle, MacroFetcher, SnapshotFetch};
