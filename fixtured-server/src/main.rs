//! fixtured - users CRUD over a health-checked Postgres pool
//!
//! Connection parameters come from `DB_URL`, `DB_USER`, and `DB_PASSWORD`
//! (a `.env` file is honored). They are captured at startup but only
//! validated at first pool construction: a misconfigured process serves 500s
//! rather than refusing to start, matching the reused-environment contract.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fixtured_core::db::migrations;
use fixtured_core::{Handler, PoolManager};
use fixtured_server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "fixtured", version, about = "User fixture CRUD service backed by Postgres")]
struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3030)]
    port: u16,

    /// Create the users table if it does not exist, then serve
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let args = Args::parse();

    let pool = PoolManager::from_env();

    if args.migrate {
        let handle = pool
            .acquire()
            .await
            .context("--migrate requires a reachable database")?;
        migrations::run(&handle).await?;
    }

    let bind_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid --host/--port combination")?;

    run_server(Handler::new(pool), ServerConfig { bind_addr }).await?;
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
