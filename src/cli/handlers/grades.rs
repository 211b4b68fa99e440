use std::io::{BufRead, Write};

use crate::cli::types::App;

/// Prompts for subject/score pairs for student `id` until the operator stops.
pub fn grade_loop<R: BufRead, W: Write>(app: &mut App<R, W>, id: &str) -> anyhow::Result<()> {
    loop {
        let subject = app.console.ask_non_empty("Subject name: ")?;
        let score = app.console.ask_score("Score (0-100): ")?;
        match app.manager.record_grade(id, &subject, score) {
            Ok(true) => {
                app.report_save_error()?;
                app.console.say("Grade saved.")?;
            }
            Ok(false) => {
                app.console.say(format!("Student with ID {id} not found."))?;
                return Ok(());
            }
            Err(e) => app.console.say(format!("Could not save grade: {e}"))?,
        }
        if !app.console.ask_yes_no("Add another grade?")? {
            return Ok(());
        }
    }
}

fn handle_add_grade<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Add Student Grade ---")?;
    let id = app.console.ask("Student ID: ")?;
    if id.is_empty() {
        app.console.say("ID must not be empty.")?;
        return Ok(());
    }
    let Some(student) = app.manager.find_student(&id).cloned() else {
        app.console.say(format!("Student with ID {id} not found."))?;
        return Ok(());
    };
    app.console.say(&student)?;
    grade_loop(app, &id)
}

pub fn try_handle<R: BufRead, W: Write>(
    app: &mut App<R, W>,
    choice: &str,
) -> Option<anyhow::Result<()>> {
    match choice {
        "6" => Some(handle_add_grade(app)),
        _ => None,
    }
}
