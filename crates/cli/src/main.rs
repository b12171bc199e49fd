use clap::{Parser, Subcommand};
use dns_relay_domain::CliOverrides;
use std::path::PathBuf;
use tracing::info;

mod bootstrap;
mod di;
mod inspect;
mod server;

#[derive(Parser)]
#[command(name = "dns-relay")]
#[command(version)]
#[command(about = "DNS Relay - forwards UDP DNS queries to one upstream resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// DNS listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Listen address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (ip:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Upstream query timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Maximum queries handled concurrently
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Reject records of unsupported types instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the relay (default)
    Serve,
    /// Decode a captured DNS message and print it
    Inspect {
        /// File holding one raw DNS message
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.port,
        bind_address: cli.bind.clone(),
        max_concurrent_queries: cli.workers,
        upstream: cli.upstream.clone(),
        query_timeout_ms: cli.timeout_ms,
        strict_record_types: cli.strict,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Inspect { file } => inspect::run(&file, &config),
        Command::Serve => {
            info!("Starting DNS Relay v{}", env!("CARGO_PKG_VERSION"));

            let dns_services = di::DnsServices::new(&config)?;

            server::start_dns_server(
                config.listen_address(),
                dns_services.handler,
                config.server.max_concurrent_queries,
            )
            .await?;

            info!("Server shutdown complete");
            Ok(())
        }
    }
}
