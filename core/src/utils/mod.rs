pub mod error;
pub(crate) mod logging;
pub(crate) mod merge_toml;
pub(crate) mod time;
