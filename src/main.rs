use clap::Parser;
use std::io;

use roster::cli::{self, App, Console};
use roster::config::{CliArgs, Config};
use roster::{logging, SnapshotStore, StudentManager};

fn main() {
    let args = CliArgs::parse();
    let config = Config::resolve(args, |key| std::env::var(key).ok());
    logging::init_subscriber(&config.log_level);

    if let Err(e) = run(&config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    tracing::debug!(data_dir = %config.data_dir.display(), "opening roster");
    let manager = StudentManager::open(SnapshotStore::new(&config.data_dir));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());
    let mut app = App::new(manager, console, config.report_dir());
    cli::run(&mut app)
}
