use super::error::ParserError;
use crate::{filesystem::files::is_file, utils::time::PARSER_DATETIME_FORMAT};
use log::{error, info, warn};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParserKind {
    AppCompatCache,
    Amcache,
}

impl ParserKind {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ParserKind::AppCompatCache => "AppCompatCacheParser",
            ParserKind::Amcache => "AmcacheParser",
        }
    }
}

/// A single run of an external artifact parser
#[derive(Debug)]
pub(crate) struct ParserInvocation {
    pub(crate) kind: ParserKind,
    pub(crate) executable: String,
    /**Only used by the Amcache parser */
    pub(crate) database: Option<String>,
    pub(crate) output_directory: String,
}

#[derive(Debug)]
pub(crate) struct CommandResult {
    pub(crate) success: bool,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl ParserInvocation {
    /// Fixed arguments for each parser
    pub(crate) fn arguments(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.kind == ParserKind::Amcache {
            args.push(String::from("-f"));
            args.push(self.database.clone().unwrap_or_default());
        }

        args.push(String::from("--csv"));
        args.push(self.output_directory.clone());
        args.push(String::from("--dt"));
        args.push(PARSER_DATETIME_FORMAT.to_string());

        if self.kind == ParserKind::Amcache {
            args.push(String::from("-i"));
        }
        args
    }

    /// Spawn the parser and block until it exits. Output is captured, not streamed
    pub(crate) fn execute(&self) -> Result<CommandResult, ParserError> {
        if !is_file(&self.executable) {
            error!("[parsers] {} not found at {}", self.kind.name(), self.executable);
            return Err(ParserError::NotFound);
        }
        if let Some(database) = &self.database {
            if self.kind == ParserKind::Amcache && !is_file(database) {
                error!("[parsers] Amcache database {database} does not exist");
                return Err(ParserError::MissingDatabase);
            }
        }

        let args = self.arguments();
        info!("[parsers] Executing {} with args: {args:?}", self.executable);

        let mut comm = Command::new(&self.executable);
        comm.args(&args);
        let out = match comm.output() {
            Ok(result) => result,
            Err(err) => {
                error!("[parsers] Failed to execute {}: {err:?}", self.executable);
                return Err(ParserError::Execute);
            }
        };

        Ok(CommandResult {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        })
    }
}

/// Run a parser and report the outcome to the operator. Failures are never fatal, the
/// caller decides whether to use whatever the parser managed to write
pub(crate) fn run_parser(invocation: &ParserInvocation) -> bool {
    let result = match invocation.execute() {
        Ok(result) => result,
        Err(ParserError::NotFound) => {
            println!("{} IS NOT FOUND. Skipping...", invocation.executable);
            return false;
        }
        Err(ParserError::MissingDatabase) => {
            println!(
                "ERROR: The database file '{}' does not exist. Skipping...",
                invocation.database.as_deref().unwrap_or_default()
            );
            return false;
        }
        Err(err) => {
            println!("Error running tool {}: {err}", invocation.executable);
            return false;
        }
    };

    println!("{}", result.stdout);
    if !result.success {
        warn!(
            "[parsers] {} exited with failure: {}",
            invocation.kind.name(),
            result.stderr
        );
        println!("Error running tool: {} exited with failure", invocation.kind.name());
        println!("Output: {}", result.stderr);
        return false;
    }

    info!("[parsers] {} finished", invocation.kind.name());
    true
}

#[cfg(test)]
mod tests {
    use super::{run_parser, ParserInvocation, ParserKind};

    fn invocation(kind: ParserKind, executable: &str) -> ParserInvocation {
        ParserInvocation {
            kind,
            executable: executable.to_string(),
            database: Some(String::from("C:\\Windows\\appcompat\\Programs\\Amcache.hve")),
            output_directory: String::from("./tmp/parsers"),
        }
    }

    #[test]
    fn test_appcompatcache_arguments() {
        let args = invocation(ParserKind::AppCompatCache, "AppCompatCacheParser.exe").arguments();
        assert_eq!(
            args,
            vec!["--csv", "./tmp/parsers", "--dt", "yyyy-MM-dd HH:mm:sszzz"]
        );
    }

    #[test]
    fn test_amcache_arguments() {
        let args = invocation(ParserKind::Amcache, "AmcacheParser.exe").arguments();
        assert_eq!(
            args,
            vec![
                "-f",
                "C:\\Windows\\appcompat\\Programs\\Amcache.hve",
                "--csv",
                "./tmp/parsers",
                "--dt",
                "yyyy-MM-dd HH:mm:sszzz",
                "-i"
            ]
        );
    }

    #[test]
    fn test_run_parser_not_found() {
        let parser = invocation(ParserKind::AppCompatCache, "./tmp/missing/AppCompatCacheParser.exe");
        assert!(!run_parser(&parser));
    }

    #[cfg(target_os = "linux")]
    #[test]
    #[should_panic(expected = "MissingDatabase")]
    fn test_execute_missing_database() {
        let parser = invocation(ParserKind::Amcache, "/bin/echo");
        let _ = parser.execute().unwrap();
    }

    #[test]
    #[should_panic(expected = "NotFound")]
    fn test_execute_not_found() {
        let parser = invocation(ParserKind::Amcache, "./tmp/missing/AmcacheParser.exe");
        let _ = parser.execute().unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_execute_echo() {
        let parser = invocation(ParserKind::AppCompatCache, "/bin/echo");
        let result = parser.execute().unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "--csv ./tmp/parsers --dt yyyy-MM-dd HH:mm:sszzz\n");
        assert!(run_parser(&parser));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_execute_echo_amcache() {
        let mut parser = invocation(ParserKind::Amcache, "/bin/echo");
        parser.database = Some(String::from("/bin/echo"));
        let result = parser.execute().unwrap();
        assert!(result.success);
        assert!(result.stdout.starts_with("-f /bin/echo --csv ./tmp/parsers"));
        assert!(result.stdout.ends_with("-i\n"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_run_parser_failure() {
        let parser = invocation(ParserKind::AppCompatCache, "/bin/false");
        let result = parser.execute().unwrap();
        assert!(!result.success);
        assert!(!run_parser(&parser));
    }
}
