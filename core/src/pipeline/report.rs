use log::warn;

/// Tell the operator where the output landed, opening it in Explorer when asked to on Windows
pub(crate) fn report_output(directory: &str, open_directory: bool) {
    println!("CSV files have been saved to {directory}");

    if open_directory && open_in_browser(directory) {
        return;
    }
    println!("Please open the following directory to view the CSV files: {directory}");
}

#[cfg(target_os = "windows")]
fn open_in_browser(directory: &str) -> bool {
    use std::process::Command;

    // explorer.exe exits non-zero even on success, only a spawn failure matters
    match Command::new("explorer").arg(directory).spawn() {
        Ok(_) => true,
        Err(err) => {
            warn!("[core] Could not open {directory} in explorer: {err:?}");
            false
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn open_in_browser(directory: &str) -> bool {
    warn!("[core] No native file browser integration for {directory}");
    false
}

#[cfg(test)]
mod tests {
    use super::report_output;

    #[test]
    fn test_report_output() {
        report_output("./tmp/report", false);
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_report_output_open_unsupported() {
        report_output("./tmp/report", true);
    }
}
