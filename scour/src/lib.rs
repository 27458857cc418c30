pub mod config;
pub mod errors;
pub mod metrics;
pub mod output;
pub mod results;
pub mod search;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use metrics::{ScanMetrics, ScanStats};
pub use output::OutputSink;
pub use results::SearchSummary;
pub use search::search;
