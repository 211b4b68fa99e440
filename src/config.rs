//! Runtime configuration.
//!
//! Resolved in three layers, later layers winning:
//! 1. compiled defaults ([`Config::default`])
//! 2. environment variables (`ROSTER_DATA_DIR`, `ROSTER_REPORT_DIR`, `ROSTER_LOG`)
//! 3. command-line flags ([`CliArgs`])

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
const REPORTS_SUBDIR: &str = "reports";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "roster", version, about = "Interactive student grade roster")]
pub struct CliArgs {
    /// Directory holding students.json
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory exported reports are written to [default: <data-dir>/reports]
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Log filter for stderr output (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    report_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            report_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Builds the effective config from defaults, `env` lookups and `args`.
    pub fn resolve<F>(args: CliArgs, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env_overrides(env);
        config.apply_args(args);
        config
    }

    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = read("ROSTER_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = read("ROSTER_REPORT_DIR") {
            self.report_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = read("ROSTER_LOG") {
            self.log_level = v;
        }
    }

    fn apply_args(&mut self, args: CliArgs) {
        if let Some(v) = args.data_dir {
            self.data_dir = v;
        }
        if let Some(v) = args.report_dir {
            self.report_dir = Some(v);
        }
        if let Some(v) = args.log_level {
            self.log_level = v;
        }
    }

    pub fn report_dir(&self) -> PathBuf {
        self.report_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join(REPORTS_SUBDIR))
    }
}
