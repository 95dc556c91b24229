use common::merge::ToolChoice;
use shimamcache_core::structs::toml::RunConfig;
use std::io::{BufRead, Write};

enum PromptState {
    SelectTool,
    ConfigurePaths(ToolChoice),
}

/// Ask the operator for the next run. `None` means exit, either requested or end of input
/// Invalid answers send the operator back to tool selection
pub(crate) fn next_config<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Option<RunConfig> {
    let mut state = PromptState::SelectTool;
    loop {
        state = match state {
            PromptState::SelectTool => {
                let answer = ask(
                    reader,
                    writer,
                    "Which tool do you want to use? (appcomcache/amcache/both/exit): ",
                )?
                .to_lowercase();

                if answer == "exit" {
                    let _ = writeln!(writer, "Exiting...");
                    return None;
                }
                match ToolChoice::from_choice(&answer) {
                    Some(choice) => {
                        let _ = writeln!(
                            writer,
                            "You have chosen to use the {} tool.",
                            choice.as_str()
                        );
                        PromptState::ConfigurePaths(choice)
                    }
                    None => {
                        let _ = writeln!(writer, "Invalid choice.");
                        PromptState::SelectTool
                    }
                }
            }
            PromptState::ConfigurePaths(choice) => {
                let answer = ask(
                    reader,
                    writer,
                    "Do you want to edit the default directories? (yes/no): ",
                )?
                .to_lowercase();

                let mut config = RunConfig::with_defaults(choice);
                match answer.as_str() {
                    "no" => return Some(config),
                    "yes" => {
                        if choice.runs_amcache() {
                            config.amcache_database = ask(
                                reader,
                                writer,
                                "Enter the path to the Amcache database file (example: C:\\Windows\\appcompat\\Programs\\Amcache.hve): ",
                            )?;
                        }
                        config.output_directory =
                            ask(reader, writer, "Enter the output directory for CSV files: ")?;
                        return Some(config);
                    }
                    _ => {
                        let _ = writeln!(writer, "Invalid choice.");
                        PromptState::SelectTool
                    }
                }
            }
        };
    }
}

/// Print a prompt and read one trimmed line. `None` at end of input
fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Option<String> {
    let _ = write!(writer, "{prompt}");
    let _ = writer.flush();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::next_config;
    use common::merge::ToolChoice;
    use shimamcache_core::structs::toml::DEFAULT_AMCACHE_DATABASE;
    use std::io::Cursor;

    fn run(input: &str) -> (Option<shimamcache_core::structs::toml::RunConfig>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut writer = Vec::new();
        let config = next_config(&mut reader, &mut writer);
        (config, String::from_utf8(writer).unwrap())
    }

    #[test]
    fn test_exit() {
        let (config, output) = run("EXIT\n");
        assert!(config.is_none());
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_end_of_input() {
        let (config, _) = run("");
        assert!(config.is_none());
    }

    #[test]
    fn test_defaults() {
        let (config, output) = run("amcache\nno\n");
        let config = config.unwrap();
        assert_eq!(config.choice, ToolChoice::Amcache);
        assert_eq!(config.amcache_database, DEFAULT_AMCACHE_DATABASE);
        assert!(output.contains("You have chosen to use the amcache tool."));
    }

    #[test]
    fn test_edit_both() {
        let (config, _) = run("Both\nYES\n D:\\case\\Amcache.hve \n./tmp/case\n");
        let config = config.unwrap();
        assert_eq!(config.choice, ToolChoice::Both);
        assert_eq!(config.amcache_database, "D:\\case\\Amcache.hve");
        assert_eq!(config.output_directory, "./tmp/case");
    }

    #[test]
    fn test_edit_appcomcache_skips_database() {
        let (config, output) = run("appcomcache\nyes\n./tmp/shim\n");
        let config = config.unwrap();
        assert_eq!(config.choice, ToolChoice::AppCompatCache);
        assert_eq!(config.output_directory, "./tmp/shim");
        assert_eq!(config.amcache_database, DEFAULT_AMCACHE_DATABASE);
        assert!(!output.contains("Amcache database file"));
    }

    #[test]
    fn test_invalid_answers_restart() {
        let (config, output) = run("prefetch\namcache\nmaybe\nboth\nno\n");
        assert_eq!(config.unwrap().choice, ToolChoice::Both);
        assert_eq!(output.matches("Invalid choice.").count(), 2);
        assert_eq!(output.matches("Which tool do you want to use?").count(), 3);
    }
}
