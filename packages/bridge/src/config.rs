//! Bridge configuration.
//!
//! Every option is available both as a command-line flag and as an
//! environment variable, matching how the bridge is deployed (flags for
//! local runs, environment for the service unit).

use clap::Parser;

/// Chat relay and remote-command bridge for a game server
#[derive(Parser, Debug, Clone)]
#[command(name = "bridge")]
#[command(about = "Relays chat between a game server and browser clients", long_about = None)]
pub struct Config {
    /// Host address to bind the HTTP/WebSocket server to
    #[arg(short = 'H', long, env = "BRIDGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the HTTP/WebSocket server to
    #[arg(short = 'p', long, env = "BRIDGE_PORT", default_value = "4477")]
    pub port: u16,

    /// Hostname of the game server's RCON interface
    #[arg(long, env = "RCON_HOST", default_value = "localhost")]
    pub rcon_host: String,

    /// Port of the game server's RCON interface
    #[arg(long, env = "RCON_PORT", default_value = "25575")]
    pub rcon_port: u16,

    /// Password for RCON authentication
    #[arg(long, env = "RCON_PASSWORD", default_value = "", hide_env_values = true)]
    pub rcon_password: String,

    /// Per-command timeout for the RCON round trip, in seconds
    #[arg(long, env = "RCON_TIMEOUT_SECS", default_value = "10")]
    pub rcon_timeout_secs: u64,

    /// Shared secret required on webhook pushes. When unset, the webhook
    /// accepts all events (insecure default, intended for trusted networks).
    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Base URL of the identity store service
    #[arg(long, env = "IDENTITY_URL", default_value = "http://127.0.0.1:8081")]
    pub identity_url: String,

    /// Name of the session cookie carrying the external account id
    #[arg(long, env = "SESSION_COOKIE", default_value = "userId")]
    pub session_cookie: String,
}
