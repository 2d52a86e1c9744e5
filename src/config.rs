use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Serves a directory of text notes over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "notebox", version, about)]
pub struct Config {
    /// Directory holding the `{name}.txt` note files; created if missing
    #[arg(long)]
    pub storage_dir: PathBuf,

    /// Address to listen on
    #[arg(long)]
    pub host: String,

    /// Port to listen on
    #[arg(long)]
    pub port: u16,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
