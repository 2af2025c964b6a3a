use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use std::net::SocketAddr;

/// Runtime configuration for the `hashvault-server` binary.
///
/// All values are parsed from CLI arguments or environment variables, with
/// defaults matching the reference deployment. Each field is independently
/// tunable at runtime.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hashvault-server",
    version,
    about = "An HTTP service for asynchronous credential encoding"
)]
pub struct CliArgs {
    /// TCP address to listen on.
    ///
    /// Example: "0.0.0.0:8080"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub server_addr: String,

    /// Seconds each background task waits before computing and persisting
    /// the digest.
    ///
    /// The submission response always arrives immediately; this delay only
    /// postpones when the digest becomes available at the lookup URL. Zero
    /// is allowed and makes the digest available on the next timer tick.
    ///
    /// Environment variable: `ENCODE_DELAY_SECS`
    #[arg(long, env = "ENCODE_DELAY_SECS", default_value_t = 5)]
    pub encode_delay_secs: u64,
}

/// Validated server configuration derived from [`CliArgs`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub encode_delay: Duration,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.server_addr.parse::<SocketAddr>().is_err() {
            bail!(
                "SERVER_ADDR `{}` is not a valid socket address",
                args.server_addr
            );
        }

        Ok(Self {
            server_addr: args.server_addr,
            encode_delay: Duration::from_secs(args.encode_delay_secs),
        })
    }
}
