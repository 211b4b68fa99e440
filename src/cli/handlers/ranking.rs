use std::io::{BufRead, Write};

use crate::cli::types::App;

const TOP_N: usize = 3;

fn handle_top<R: BufRead, W: Write>(app: &mut App<R, W>) -> anyhow::Result<()> {
    app.console.say(format!("\n--- Top {TOP_N} Students ---"))?;
    let top = app.manager.top_students(TOP_N);
    if top.is_empty() {
        app.console.say("No students recorded yet.")?;
        return Ok(());
    }
    for (rank, s) in top.iter().enumerate() {
        app.console.say(format!("Rank {}", rank + 1))?;
        app.console.say(s)?;
    }
    Ok(())
}

pub fn try_handle<R: BufRead, W: Write>(
    app: &mut App<R, W>,
    choice: &str,
) -> Option<anyhow::Result<()>> {
    match choice {
        "7" => Some(handle_top(app)),
        _ => None,
    }
}
