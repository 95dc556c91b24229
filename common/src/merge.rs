use serde::{Deserialize, Serialize};

/// Which external artifact parser(s) a run should execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ToolChoice {
    #[serde(rename = "appcomcache", alias = "appcompatcache")]
    AppCompatCache,
    #[serde(rename = "amcache")]
    Amcache,
    #[serde(rename = "both")]
    Both,
}

impl ToolChoice {
    /// Parse an operator supplied choice. Input is trimmed and case-insensitive
    pub fn from_choice(value: &str) -> Option<ToolChoice> {
        match value.trim().to_lowercase().as_str() {
            "appcomcache" | "appcompatcache" => Some(ToolChoice::AppCompatCache),
            "amcache" => Some(ToolChoice::Amcache),
            "both" => Some(ToolChoice::Both),
            _ => None,
        }
    }

    /// Name used when talking to the operator and when naming the combined output file
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolChoice::AppCompatCache => "appcomcache",
            ToolChoice::Amcache => "amcache",
            ToolChoice::Both => "both",
        }
    }

    pub fn runs_appcompatcache(&self) -> bool {
        matches!(self, ToolChoice::AppCompatCache | ToolChoice::Both)
    }

    pub fn runs_amcache(&self) -> bool {
        matches!(self, ToolChoice::Amcache | ToolChoice::Both)
    }

    /// Filename of the merged timeline. Ex: `both_combined_output.csv`
    pub fn combined_filename(&self) -> String {
        format!("{}_combined_output.csv", self.as_str())
    }
}

/// Outcome of a single pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub output_directory: String,
    /// Parsers that exited successfully
    pub parsers_succeeded: Vec<String>,
    /// Parsers that were skipped or failed
    pub parsers_failed: Vec<String>,
    /// CSV files discovered in the output directory
    pub csv_files: Vec<String>,
    /// Number of CSV files that matched a known schema family
    pub normalized: usize,
    /// Full path to the combined timeline, if one was written
    pub combined_output: Option<String>,
    pub combined_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::ToolChoice;

    #[test]
    fn test_from_choice() {
        assert_eq!(
            ToolChoice::from_choice("  AppComCache "),
            Some(ToolChoice::AppCompatCache)
        );
        assert_eq!(
            ToolChoice::from_choice("appcompatcache"),
            Some(ToolChoice::AppCompatCache)
        );
        assert_eq!(ToolChoice::from_choice("AMCACHE"), Some(ToolChoice::Amcache));
        assert_eq!(ToolChoice::from_choice("both"), Some(ToolChoice::Both));
        assert_eq!(ToolChoice::from_choice("exit"), None);
        assert_eq!(ToolChoice::from_choice(""), None);
    }

    #[test]
    fn test_combined_filename() {
        assert_eq!(
            ToolChoice::AppCompatCache.combined_filename(),
            "appcomcache_combined_output.csv"
        );
        assert_eq!(ToolChoice::Both.combined_filename(), "both_combined_output.csv");
    }

    #[test]
    fn test_runs_parsers() {
        assert!(ToolChoice::Both.runs_amcache());
        assert!(ToolChoice::Both.runs_appcompatcache());
        assert!(!ToolChoice::Amcache.runs_appcompatcache());
        assert!(!ToolChoice::AppCompatCache.runs_amcache());
    }
}
