/// Install the global `tracing` subscriber writing compact lines to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set. Stdout stays reserved
/// for the interactive menu. Repeated calls are no-ops.
pub fn init_subscriber(level: &str) {
    use std::io::IsTerminal;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}
