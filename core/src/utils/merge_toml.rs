use super::error::CoreError;
use crate::structs::toml::{
    MergeToml, RunConfig, AMCACHE_PARSER, APPCOMPATCACHE_PARSER, DEFAULT_AMCACHE_DATABASE,
};
use common::merge::ToolChoice;
use log::error;
use std::{
    env::{current_dir, current_exe},
    path::PathBuf,
    str::from_utf8,
};

impl MergeToml {
    /// Parse the TOML run configuration
    pub(crate) fn parse_merge_toml(toml_data: &[u8]) -> Result<MergeToml, CoreError> {
        let text = match from_utf8(toml_data) {
            Ok(result) => result,
            Err(err) => {
                error!("[core] TOML data is not UTF8: {err:?}");
                return Err(CoreError::BadToml);
            }
        };

        let toml_results = toml::from_str(text);
        let mut merge_toml: MergeToml = match toml_results {
            Ok(results) => results,
            Err(err) => {
                error!("[core] Failed to parse TOML data. Error: {err:?}");
                return Err(CoreError::BadToml);
            }
        };

        if let Some(level) = &merge_toml.output.logging {
            merge_toml.output.logging = Some(level.to_lowercase());
        }
        Ok(merge_toml)
    }
}

impl RunConfig {
    /// Configuration used when the operator keeps the default paths
    pub fn with_defaults(choice: ToolChoice) -> RunConfig {
        RunConfig {
            choice,
            appcompatcache_parser: working_path(APPCOMPATCACHE_PARSER),
            amcache_parser: working_path(AMCACHE_PARSER),
            amcache_database: DEFAULT_AMCACHE_DATABASE.to_string(),
            output_directory: default_output_directory(),
            open_directory: true,
            logging: None,
        }
    }

    /// Fill any paths missing from the TOML file with the defaults
    pub fn from_toml(merge_toml: &MergeToml) -> RunConfig {
        let mut config = RunConfig::with_defaults(merge_toml.parsers.choice);
        let parsers = &merge_toml.parsers;
        if let Some(path) = &parsers.appcompatcache_parser {
            config.appcompatcache_parser = path.clone();
        }
        if let Some(path) = &parsers.amcache_parser {
            config.amcache_parser = path.clone();
        }
        if let Some(path) = &parsers.amcache_database {
            config.amcache_database = path.clone();
        }
        if let Some(directory) = &merge_toml.output.directory {
            config.output_directory = directory.clone();
        }
        config.open_directory = merge_toml.output.open_directory.unwrap_or(false);
        config.logging = merge_toml.output.logging.clone();

        config
    }
}

/// Resolve a parser executable against the current working directory
fn working_path(name: &str) -> String {
    match current_dir() {
        Ok(dir) => dir.join(name).display().to_string(),
        Err(_err) => name.to_string(),
    }
}

/// The directory containing the running executable, falling back to the current directory
fn default_output_directory() -> String {
    let exe_dir = current_exe()
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from));

    match exe_dir {
        Some(dir) => dir.display().to_string(),
        None => String::from("."),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        filesystem::files::read_file,
        structs::toml::{MergeToml, RunConfig, DEFAULT_AMCACHE_DATABASE},
    };
    use common::merge::ToolChoice;
    use std::path::PathBuf;

    #[test]
    fn test_parse_merge_toml() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/configs/both.toml");

        let buffer = read_file(&test_location.display().to_string()).unwrap();
        let result = MergeToml::parse_merge_toml(&buffer).unwrap();

        assert_eq!(result.parsers.choice, ToolChoice::Both);
        assert_eq!(result.output.directory.as_deref(), Some("./tmp/both_config"));
        assert_eq!(result.output.logging.as_deref(), Some("info"));
        assert_eq!(
            result.parsers.amcache_database.as_deref(),
            Some("./tests/test_data/Amcache.hve")
        );
    }

    #[test]
    #[should_panic(expected = "BadToml")]
    fn test_parse_bad_toml() {
        let data = b"[output]\ndirectory = \n";
        let _ = MergeToml::parse_merge_toml(data).unwrap();
    }

    #[test]
    #[should_panic(expected = "BadToml")]
    fn test_parse_unknown_choice() {
        let data = b"[output]\n[parsers]\nchoice = \"prefetch\"\n";
        let _ = MergeToml::parse_merge_toml(data).unwrap();
    }

    #[test]
    fn test_from_toml_defaults() {
        let data = b"[output]\n[parsers]\nchoice = \"appcomcache\"\n";
        let merge_toml = MergeToml::parse_merge_toml(data).unwrap();
        let config = RunConfig::from_toml(&merge_toml);

        assert_eq!(config.choice, ToolChoice::AppCompatCache);
        assert_eq!(config.amcache_database, DEFAULT_AMCACHE_DATABASE);
        assert!(config
            .appcompatcache_parser
            .ends_with("AppCompatCacheParser.exe"));
        assert!(config.amcache_parser.ends_with("AmcacheParser.exe"));
        assert!(!config.open_directory);
        assert!(!config.output_directory.is_empty());
    }

    #[test]
    fn test_with_defaults() {
        let config = RunConfig::with_defaults(ToolChoice::Amcache);
        assert_eq!(config.choice, ToolChoice::Amcache);
        assert!(config.open_directory);
        assert_eq!(config.logging, None);
    }
}
