//! Process settings, parsed once at startup and passed down explicitly.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

fn default_database_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("roster").join("roster.db")
}

#[derive(Debug, Clone, Parser)]
#[command(name = "roster", version, about = "Roster management web app")]
pub struct Settings {
    /// Address to bind to
    #[arg(long, env = "ROSTER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "ROSTER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, env = "ROSTER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long, env = "ROSTER_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Insert the demo roster before serving
    #[arg(long)]
    pub seed: bool,

    /// Debug logging (unless RUST_LOG is set)
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database: None,
            static_dir: PathBuf::from("static"),
            seed: false,
            debug: false,
        }
    }
}
