use clap::Parser;

/// Structured-data analysis service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// The port to listen on, overriding the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    schemascope_server::start(cli.config.as_deref(), cli.port).await
}
