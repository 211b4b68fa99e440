use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::console::Console;
use crate::manager::StudentManager;

pub struct App<R, W> {
    pub manager: StudentManager,
    pub console: Console<R, W>,
    pub report_dir: PathBuf,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(manager: StudentManager, console: Console<R, W>, report_dir: PathBuf) -> Self {
        Self {
            manager,
            console,
            report_dir,
        }
    }

    /// Prints the pending save failure, if the last mutation could not be
    /// written to disk.
    pub fn report_save_error(&mut self) -> anyhow::Result<()> {
        if let Some(e) = self.manager.take_save_error() {
            self.console
                .say(format!("Warning: changes were not saved to disk: {e}"))?;
        }
        Ok(())
    }
}
