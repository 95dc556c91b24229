pub mod core;
pub mod structs;
pub mod utils;

mod filesystem;
mod merge;
mod parsers;
mod pipeline;
