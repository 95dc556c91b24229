use common::merge::ToolChoice;
use serde::Deserialize;

/// Default location of the Amcache hive on a live Windows system
pub const DEFAULT_AMCACHE_DATABASE: &str = "C:\\Windows\\appcompat\\Programs\\Amcache.hve";
pub const APPCOMPATCACHE_PARSER: &str = "AppCompatCacheParser.exe";
pub const AMCACHE_PARSER: &str = "AmcacheParser.exe";

#[derive(Debug, Deserialize)]
pub struct MergeToml {
    pub output: Output,
    pub parsers: Parsers,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    /**Directory the parsers write CSV files into. Defaults to the directory of the running executable */
    pub directory: Option<String>,
    pub logging: Option<String>,
    /**Open the output directory in the native file browser after the run */
    pub open_directory: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Parsers {
    pub choice: ToolChoice,
    pub appcompatcache_parser: Option<String>,
    pub amcache_parser: Option<String>,
    pub amcache_database: Option<String>,
}

/// Everything the core pipeline needs for a single run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub choice: ToolChoice,
    pub appcompatcache_parser: String,
    pub amcache_parser: String,
    pub amcache_database: String,
    pub output_directory: String,
    pub open_directory: bool,
    pub logging: Option<String>,
}
