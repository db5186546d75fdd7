//! Command-line and environment configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Server configuration.
///
/// Every option can also be set through its `ROLLCALL_*` environment
/// variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "rollcall")]
#[command(about = "Teacher/student roster and notification service")]
pub struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "ROLLCALL_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "ROLLCALL_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Path to the SQLite database (created if missing)
    #[arg(short, long, env = "ROLLCALL_DATABASE")]
    pub database: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Socket address the server listens on.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Database path, falling back to [`default_database_path`].
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "rollcall=debug,rollcall_core=debug"
        } else {
            "rollcall=info,rollcall_core=info"
        }
    }
}

/// `<data dir>/rollcall/rollcall.db`, or `./rollcall/rollcall.db` if the
/// platform has no data directory.
#[must_use]
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rollcall")
        .join("rollcall.db")
}
