use std::io::{BufRead, Write};

use super::console::is_input_closed;
use super::handlers;
use super::types::App;

pub const EXIT_CHOICE: &str = "11";

const MENU: &str = "\
\n=================================
STUDENT GRADE ROSTER
=================================
1. Add New Student
2. List All Students
3. Find Student
4. Update Student
5. Delete Student
6. Add Student Grade
7. Top 3 Students
8. Students by Class
9. Class Statistics
10. Export Report
11. Exit
=================================";

fn handle_choice<R: BufRead, W: Write>(
    app: &mut App<R, W>,
    choice: &str,
) -> Option<anyhow::Result<()>> {
    if let Some(res) = handlers::students::try_handle(app, choice) {
        return Some(res);
    }
    if let Some(res) = handlers::grades::try_handle(app, choice) {
        return Some(res);
    }
    if let Some(res) = handlers::ranking::try_handle(app, choice) {
        return Some(res);
    }
    if let Some(res) = handlers::classes::try_handle(app, choice) {
        return Some(res);
    }
    if let Some(res) = handlers::report::try_handle(app, choice) {
        return Some(res);
    }
    None
}

/// Runs the menu loop until the operator exits or input ends.
///
/// Handler failures are reported and the loop continues; only terminal I/O
/// failures end it early.
pub fn run<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console
        .say("Welcome to the Student Grade Roster!")?;
    if let Some(reason) = app.manager.load_error() {
        app.console.say(format!(
            "Warning: saved students could not be loaded ({reason}). Starting with an empty roster."
        ))?;
    }

    loop {
        app.console.say(MENU)?;
        let choice = match app.console.ask("Choose a menu option (1-11): ") {
            Ok(c) => c,
            Err(e) if is_input_closed(&e) => break,
            Err(e) => return Err(e),
        };
        if choice == EXIT_CHOICE {
            break;
        }

        match handle_choice(app, &choice) {
            Some(Ok(())) => {}
            Some(Err(e)) if is_input_closed(&e) => break,
            Some(Err(e)) => {
                tracing::error!(error = %format!("{e:#}"), choice = %choice, "menu action failed");
                app.console.say(format!("Error: {e:#}"))?;
            }
            None => app
                .console
                .say("Invalid choice. Please pick a menu option from 1 to 11.")?,
        }
    }

    app.console
        .say("\nThank you for using the Student Grade Roster!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Console;
    use crate::manager::StudentManager;
    use crate::store::SnapshotStore;
    use std::io::Cursor;
    use std::path::Path;

    fn run_script(dir: &Path, script: &str) -> (StudentManager, String) {
        let manager = StudentManager::open(SnapshotStore::new(dir.join("data")));
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut app = App::new(manager, console, dir.join("reports"));
        run(&mut app).expect("menu loop");
        let App { manager, console, .. } = app;
        let out = String::from_utf8(console.into_output()).expect("utf8");
        (manager, out)
    }

    #[test]
    fn add_student_with_grades_then_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = "1\nS1\nAna\n10A\ny\nMath\n80\ny\nArt\n90\nn\n11\n";
        let (m, out) = run_script(dir.path(), script);

        assert!(out.contains("Student added successfully."));
        assert_eq!(out.matches("Grade saved.").count(), 2);
        assert!(out.contains("Thank you for using"));
        let s = m.find_student("S1").expect("S1");
        assert_eq!(s.average(), 85.0);
    }

    #[test]
    fn duplicate_id_is_reprompted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = "1\nS1\nAna\n10A\nn\n1\nS1\nS2\nBudi\n10B\nn\n11\n";
        let (m, out) = run_script(dir.path(), script);
        assert!(out.contains("ID already in use."));
        assert_eq!(m.len(), 2);
        assert_eq!(m.find_student("S2").expect("S2").name(), "Budi");
    }

    #[test]
    fn update_with_blank_answers_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = "1\nS1\nAna\n10A\nn\n4\nS1\n\n\n4\nS1\n\n11B\n11\n";
        let (m, out) = run_script(dir.path(), script);
        assert!(out.contains("No changes made."));
        assert!(out.contains("Student updated successfully."));
        let s = m.find_student("S1").expect("S1");
        assert_eq!(s.name(), "Ana");
        assert_eq!(s.class(), "11B");
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = "1\nS1\nAna\n10A\nn\n5\nS1\nn\n5\nS1\ny\n5\nS1\n11\n";
        let (m, out) = run_script(dir.path(), script);
        assert!(out.contains("Deletion cancelled."));
        assert!(out.contains("Student deleted successfully."));
        assert!(out.contains("Student with ID S1 not found."));
        assert!(m.is_empty());
    }

    #[test]
    fn invalid_choice_and_eof_end_cleanly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (m, out) = run_script(dir.path(), "42\n2\n");
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("No students recorded yet."));
        assert!(out.contains("Thank you for using"));
        assert!(m.is_empty());
    }

    #[test]
    fn eof_inside_a_prompt_stops_the_loop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (m, out) = run_script(dir.path(), "1\nS1\nAna\n");
        assert!(out.contains("Thank you for using"));
        assert!(m.is_empty());
    }

    #[test]
    fn class_views_and_stats() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = concat!(
            "1\nS1\nAna\n10A\ny\nMath\n80\nn\n",
            "1\nS2\nBudi\n10a\ny\nMath\n90\nn\n",
            "8\n10A\n",
            "9\n10a\n",
            "9\n12Z\n",
            "7\n",
            "11\n",
        );
        let (_m, out) = run_script(dir.path(), script);
        assert!(out.contains("2 student(s) in class 10A:"));
        assert!(out.contains("Class: 10A"));
        assert!(out.contains("Average score: 85"));
        assert!(out.contains("Highest average: 90"));
        assert!(out.contains("Lowest average: 80"));
        assert!(out.contains("No students found in class 12Z."));

        let rank1 = out.find("Rank 1\nID: S2").expect("rank 1");
        let rank2 = out.find("Rank 2\nID: S1").expect("rank 2");
        assert!(rank1 < rank2);
    }

    #[test]
    fn export_report_writes_into_report_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_m, out) = run_script(dir.path(), "1\nS1\nAna\n10A\nn\n10\n11\n");
        assert!(out.contains("Report with 1 student(s) exported to"));
        let written = std::fs::read_dir(dir.path().join("reports"))
            .expect("reports dir")
            .count();
        assert_eq!(written, 1);
    }
}
