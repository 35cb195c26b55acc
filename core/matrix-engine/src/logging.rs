//! FILENAME: core/matrix-engine/src/logging.rs
// PURPOSE: Category-tagged logging macros on top of the `log` facade.
// CONTEXT: The category becomes the log target, so an embedding binary can
//          filter e.g. `FILTER=debug` without touching the engine.

pub const CAT_MATRIX: &str = "MATRIX";
pub const CAT_STORE: &str = "STORE";
pub const CAT_FILTER: &str = "FILTER";
pub const CAT_SESSION: &str = "SESSION";

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::log!(target: $cat, $crate::__log::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::log!(target: $cat, $crate::__log::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::log!(target: $cat, $crate::__log::Level::Warn, $($arg)*)
    };
}
