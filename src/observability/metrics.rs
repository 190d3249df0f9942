//! Metrics emitted at the configuration seams.
//!
//! # Metrics
//! - `config_fetch_total` (counter): fetch attempts by terminal outcome
//! - `config_store_swaps_total` (counter): published snapshot replacements
//! - `config_cache_loads_total` (counter): disk loads by source file

use metrics::counter;

use crate::cache::CacheSource;
use crate::fetch::FetchOutcome;

pub fn record_fetch(outcome: FetchOutcome) {
    counter!("config_fetch_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_store_swap() {
    counter!("config_store_swaps_total").increment(1);
}

pub fn record_cache_load(source: CacheSource) {
    counter!("config_cache_loads_total", "source" => source.as_str()).increment(1);
}
