use anyhow::Context;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::calc;
use crate::manager::StudentManager;
use crate::student::Student;

const RULE: &str = "==================================================";

#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub student_count: usize,
}

/// Plain-text roster report: header, overall statistics, per-class
/// statistics sorted by class, then one block per student.
pub fn render_report(manager: &StudentManager, generated_at: DateTime<Local>) -> String {
    let students = manager.all_students();
    let averages: Vec<f64> = students.iter().map(Student::average).collect();
    let overall = calc::overall_statistics(&averages);

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "STUDENT GRADE REPORT");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "Total students: {}", overall.student_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "OVERALL STATISTICS");
    let _ = writeln!(out, "Average score: {}", overall.average_score);
    let _ = writeln!(
        out,
        "Passed (average >= {}): {}",
        calc::PASS_THRESHOLD,
        overall.pass_count
    );
    let _ = writeln!(out, "Failed: {}", overall.fail_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "CLASS STATISTICS");
    let labels = manager.class_labels();
    if labels.is_empty() {
        let _ = writeln!(out, "(no classes)");
    }
    for label in labels {
        let Some(stats) = manager.class_statistics(&label) else {
            continue;
        };
        let _ = writeln!(
            out,
            "{}: {} student(s), average {}, highest {}, lowest {}",
            stats.class,
            stats.student_count,
            stats.average_score,
            stats.highest_average,
            stats.lowest_average
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "STUDENT DETAILS");
    if students.is_empty() {
        let _ = writeln!(out, "(no students)");
    }
    for s in &students {
        let _ = writeln!(out, "{s}");
    }
    out
}

/// Writes a timestamped report into `report_dir`, creating it if needed.
pub fn export_report(manager: &StudentManager, report_dir: &Path) -> anyhow::Result<ReportSummary> {
    std::fs::create_dir_all(report_dir)
        .with_context(|| format!("failed to create directory {}", report_dir.to_string_lossy()))?;

    let now = Local::now();
    let stem = format!("student-report-{}", now.format("%Y%m%d-%H%M%S"));
    let mut path = report_dir.join(format!("{stem}.txt"));
    let mut n = 1;
    while path.exists() {
        path = report_dir.join(format!("{stem}-{n}.txt"));
        n += 1;
    }

    std::fs::write(&path, render_report(manager, now))
        .with_context(|| format!("failed to write report {}", path.to_string_lossy()))?;
    tracing::info!(path = %path.display(), "report exported");

    Ok(ReportSummary {
        path,
        student_count: manager.len(),
    })
}
