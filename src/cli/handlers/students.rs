use std::io::{BufRead, Write};

use super::grades;
use crate::cli::types::App;
use crate::manager::StudentUpdate;
use crate::student::Student;

fn ask_id<R: BufRead, W: Write>(app: &mut App<R, W>, prompt: &str) -> anyhow::Result<Option<String>> {
    let id = app.console.ask(prompt)?;
    if id.is_empty() {
        app.console.say("ID must not be empty.")?;
        return Ok(None);
    }
    Ok(Some(id))
}

/// Looks up `id`, printing the miss. Returns a copy so the caller can keep
/// prompting while holding it.
fn lookup<R: BufRead, W: Write>(app: &mut App<R, W>, id: &str) -> anyhow::Result<Option<Student>> {
    match app.manager.find_student(id).cloned() {
        Some(s) => Ok(Some(s)),
        None => {
            app.console.say(format!("Student with ID {id} not found."))?;
            Ok(None)
        }
    }
}

fn handle_add<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Add New Student ---")?;
    let id = loop {
        let id = app.console.ask_non_empty("Student ID: ")?;
        if app.manager.find_student(&id).is_none() {
            break id;
        }
        app.console.say("ID already in use. Please choose another.")?;
    };
    let name = app.console.ask_non_empty("Student name: ")?;
    let class = app.console.ask_non_empty("Student class (e.g. 10A): ")?;

    let student = match Student::new(&id, &name, &class) {
        Ok(s) => s,
        Err(e) => {
            app.console.say(format!("Could not create student: {e}"))?;
            return Ok(());
        }
    };
    if !app.manager.add_student(student) {
        app.console
            .say("Failed to add student. The ID may already be in use.")?;
        return Ok(());
    }
    app.report_save_error()?;
    app.console.say("Student added successfully.")?;

    if app.console.ask_yes_no("Add grades now?")? {
        grades::grade_loop(app, &id)?;
    }
    Ok(())
}

fn handle_list<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- All Students ---")?;
    let students = app.manager.all_students();
    if students.is_empty() {
        app.console.say("No students recorded yet.")?;
        return Ok(());
    }
    app.console.say("=== STUDENT LIST ===")?;
    for s in &students {
        app.console.say(s)?;
    }
    Ok(())
}

fn handle_find<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Find Student ---")?;
    let Some(id) = ask_id(app, "Student ID: ")? else {
        return Ok(());
    };
    if let Some(s) = lookup(app, &id)? {
        app.console.say(&s)?;
    }
    Ok(())
}

fn handle_update<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Update Student ---")?;
    let Some(id) = ask_id(app, "ID of the student to update: ")? else {
        return Ok(());
    };
    let Some(current) = lookup(app, &id)? else {
        return Ok(());
    };
    app.console.say("\nCurrent data:")?;
    app.console.say(&current)?;

    let name = app.console.ask("New name (leave blank to keep): ")?;
    let class = app.console.ask("New class (leave blank to keep): ")?;
    let update = StudentUpdate {
        name: Some(name).filter(|v| !v.is_empty()),
        class: Some(class).filter(|v| !v.is_empty()),
    };
    if update.is_empty() {
        app.console.say("No changes made.")?;
        return Ok(());
    }

    match app.manager.update_student(&id, update) {
        Ok(true) => {
            app.report_save_error()?;
            app.console.say("Student updated successfully.")?;
        }
        Ok(false) => app.console.say("Failed to update student.")?,
        Err(e) => app.console.say(format!("Could not update student: {e}"))?,
    }
    Ok(())
}

fn handle_delete<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Delete Student ---")?;
    let Some(id) = ask_id(app, "ID of the student to delete: ")? else {
        return Ok(());
    };
    let Some(current) = lookup(app, &id)? else {
        return Ok(());
    };
    app.console.say(&current)?;

    if !app
        .console
        .ask_yes_no("Are you sure you want to delete this student?")?
    {
        app.console.say("Deletion cancelled.")?;
        return Ok(());
    }
    if app.manager.remove_student(&id) {
        app.report_save_error()?;
        app.console.say("Student deleted successfully.")?;
    } else {
        app.console.say("Failed to delete student.")?;
    }
    Ok(())
}

pub fn try_handle<R: BufRead, W: Write>(
    app: &mut App<R, W>,
    choice: &str,
) -> Option<anyhow::Result<()>> {
    match choice {
        "1" => Some(handle_add(app)),
        "2" => Some(handle_list(app)),
        "3" => Some(handle_find(app)),
        "4" => Some(handle_update(app)),
        "5" => Some(handle_delete(app)),
        _ => None,
    }
}
