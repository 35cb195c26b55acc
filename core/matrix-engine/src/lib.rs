//! FILENAME: core/matrix-engine/src/lib.rs
//! Configuration-validity matrix engine.
//!
//! Given a table whose first column names a configuration and whose other
//! columns describe its components, this crate lets a caller partition the
//! component columns into groups, lay each group out as an
//! axis-value x combination grid, mark every grid cell valid or invalid, and
//! finally keep only the rows that are valid under every group.
//!
//! Layers:
//! - `dataset`: The immutable table handed over by a loader (WHAT we read)
//! - `definition`: Group schema and its persisted shape (what a group IS)
//! - `indexer` / `combination`: Distinct values and their Cartesian product
//! - `store`: Validity decisions keyed by (group, axis value, combination)
//! - `matrix`: Grid construction, seeding, views and statistics
//! - `filter`: Row filtering against every group (fail-closed)
//! - `session`: One editing session owning all of the above
//!
//! Every comparison works on trimmed cell text; see [`normalize_cell`].

#[macro_use]
pub mod logging;

pub mod combination;
pub mod config;
pub mod dataset;
pub mod definition;
pub mod error;
pub mod filter;
pub mod indexer;
pub mod matrix;
pub mod session;
pub mod store;


#[doc(hidden)]
pub use log as __log;

pub use combination::{enumerate_combinations, ComboKey, CombinationSpace, Combinations};
pub use config::{MatrixConfig, ReseedPolicy};
pub use dataset::{normalize_cell, Dataset};
pub use definition::{default_group_name, GroupConfig, GroupDefinition, GroupId};
pub use error::{ConsistencyError, DatasetError, MatrixError, ValidationError};
pub use filter::{filter_rows, filtered_row_indices, first_rejecting_group};
pub use indexer::{distinct_values, ValueIndex};
pub use matrix::{build_matrix, MatrixStats, MatrixView, ValidityMatrix};
pub use session::ValidationSession;
pub use store::{Validity, ValidityKey, ValidityStore};
