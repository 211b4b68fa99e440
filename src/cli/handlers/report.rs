use std::io::{BufRead, Write};

use crate::cli::types::App;
use crate::report;

fn handle_export<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Export Report ---")?;
    match report::export_report(&app.manager, &app.report_dir) {
        Ok(summary) => app.console.say(format!(
            "Report with {} student(s) exported to {}",
            summary.student_count,
            summary.path.display()
        ))?,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "report export failed");
            app.console.say(format!("Failed to export report: {e:#}"))?;
        }
    }
    Ok(())
}

pub fn try_handle<R: BufRead, W: Write>(
    app: &mut App<R, W>,
    choice: &str,
) -> Option<anyhow::Result<()>> {
    match choice {
        "10" => Some(handle_export(app)),
        _ => None,
    }
}
