//! FILENAME: core/persistence/src/lib.rs
//! Persistence for the validity-matrix workspace.
//!
//! Loads datasets from delimited text or XLSX, writes filtered datasets back
//! out, and stores group definitions and engine settings as JSON. The engine
//! itself never touches files; everything here converts to and from
//! `matrix_engine` types.

mod delimited;
mod error;
mod groups;
mod xlsx_reader;
mod xlsx_writer;

pub use delimited::{read_delimited, read_delimited_file, write_delimited, write_delimited_file};
pub use error::PersistenceError;
pub use groups::{load_config, load_groups, save_config, save_groups};
pub use xlsx_reader::load_dataset_xlsx;
pub use xlsx_writer::save_dataset_xlsx;

/// Log target for everything in this crate.
pub(crate) const CAT_PERSIST: &str = "PERSIST";
