// Trade Insights
// Author: Gabriel Demetrios Lafis

//! # Trade Insights
//!
//! Filtering and summarization core for an imports/exports trade dashboard.
//!
//! ## Features
//!
//! - Loading a CSV trade dataset with a reproducible seeded sample
//! - Filtering by country set, product, category and trade direction
//! - Descriptive statistics for Quantity, Value and Weight
//! - Mode, distinct counts, top-N frequencies, extremes and grouped aggregates
//! - Exporting a filtered view back to CSV
//!
//! ## Example
//!
//! ```no_run
//! use trade_insights::{
//!     data::{load, Direction, NumericField},
//!     processing::{describe, FilterSpec},
//!     storage::export,
//! };
//!
//! // Load a 3001 record sample
//! let dataset = load("Imports_Exports_Dataset.csv", 3001, 55003)?;
//!
//! // Filter it
//! let view = FilterSpec::new()
//!     .countries(["Congo", "Palau"])
//!     .direction(Some(Direction::Export))
//!     .apply(&dataset);
//!
//! // Summarize and save the result
//! for stats in describe(&view, &NumericField::ALL) {
//!     println!("{}", stats);
//! }
//! export(&view, "Filtered_Data.csv")?;
//! # Ok::<(), trade_insights::utils::AppError>(())
//! ```

pub mod data;
pub mod processing;
pub mod storage;
pub mod utils;

// Re-export main types
pub use data::{load, Dataset, Direction, Record};
pub use processing::{FilterSpec, FilteredView, SummaryStats};
pub use storage::export;
pub use utils::Config;
