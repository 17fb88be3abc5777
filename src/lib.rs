// Swedish Party Leaders - Core Library
// Exposes the load → prepare → chart pipeline for the CLI, the API server and tests

pub mod error;
pub mod party;
pub mod temporal;
pub mod record;
pub mod loader;
pub mod pipeline;
pub mod quality;
pub mod summary;
pub mod chart;

// Re-export commonly used types
pub use error::{LeaderError, Result};
pub use party::Party;
pub use temporal::{
    parse_date, whole_months_between, whole_years_between, years_in_office,
    DateSource, DateValue, ResolvedDate,
};
pub use record::{PartyLeader, RawLeaderRow, REQUIRED_COLUMNS};
pub use loader::{load_csv, read_rows, DEFAULT_INPUT};
pub use pipeline::{default_missing_dates, derive, prepare, run, sort_by_spectrum};
pub use quality::{check, QualityEngine, QualityIssue, Severity};
pub use summary::{party_summaries, PartySummary};
pub use chart::{render_svg, write_svg, ChartSpec, MarkerStyle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
