use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "netmon-cli")]
#[command(about = "Query a running network latency monitor", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness (fails while faults are pending)
    Health,
    /// Connectivity and downtime of the target
    Status,
    /// List recorded faults
    Faults,
    /// Remove all recorded faults
    Drain,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{base}/healthcheck")),
        Commands::Status => client.get(format!("{base}/api/network-status")),
        Commands::Faults => client.get(format!("{base}/api/faults")),
        Commands::Drain => client.delete(format!("{base}/api/faults")),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
