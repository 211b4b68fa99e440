use std::io::{BufRead, Write};

use crate::cli::types::App;

fn handle_by_class<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Students by Class ---")?;
    let class = app.console.ask_non_empty("Class name: ")?;
    let members = app.manager.students_by_class(&class);
    if members.is_empty() {
        app.console
            .say(format!("No students found in class {class}."))?;
        return Ok(());
    }
    app.console
        .say(format!("{} student(s) in class {class}:", members.len()))?;
    for s in &members {
        app.console.say(s)?;
    }
    Ok(())
}

fn handle_stats<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say("\n--- Class Statistics ---")?;
    let class = app.console.ask_non_empty("Class name: ")?;
    let Some(stats) = app.manager.class_statistics(&class) else {
        app.console
            .say(format!("No students found in class {class}."))?;
        return Ok(());
    };
    app.console.say(format!("Class: {}", stats.class))?;
    app.console
        .say(format!("Students: {}", stats.student_count))?;
    app.console
        .say(format!("Average score: {}", stats.average_score))?;
    app.console
        .say(format!("Highest average: {}", stats.highest_average))?;
    app.console
        .say(format!("Lowest average: {}", stats.lowest_average))?;
    Ok(())
}

pub fn try_handle<R: BufRead, W: Write>(
    app: &mut App<R, W>,
    choice: &str,
) -> Option<anyhow::Result<()>> {
    match choice {
        "8" => Some(handle_by_class(app)),
        "9" => Some(handle_stats(app)),
        _ => None,
    }
}
