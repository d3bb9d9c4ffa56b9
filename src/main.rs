use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pulse_core::demo;
use pulse_store::SessionStore;
use pulse_telemetry::{init_telemetry, TelemetryConfig};

mod report;

#[derive(Parser)]
#[command(name = "profitpulse", about = "Poker bankroll tracker", version)]
struct Cli {
    /// Path to the sessions file. Defaults to ~/.profitpulse/sessions.json.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Emit JSON-formatted log lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server (the default).
    Serve {
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
    /// Print a detailed text report of the bankroll and all sessions.
    Report,
    /// Print an ASCII graph of the bankroll over time.
    Graph,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(&TelemetryConfig {
        json: cli.json_logs,
        ..Default::default()
    });

    let store = SessionStore::new(data_path(&cli));

    // First run seeds the example bankroll so every surface has data to show.
    let roll = match store.load()? {
        Some(roll) => roll,
        None => {
            tracing::info!(path = %store.path().display(), "no session file, seeding example data");
            let roll = demo::seed_example_data();
            store.save(&roll)?;
            roll
        }
    };

    match cli.command.unwrap_or(Command::Serve { port: 5000 }) {
        Command::Serve { port } => {
            let config = pulse_server::ServerConfig { port };
            let handle = pulse_server::start(config, roll, store).await?;
            tracing::info!(port = handle.port, "ProfitPulse server ready");

            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutting down");
        }
        Command::Report => println!("{}", report::detailed_report(&roll)),
        Command::Graph => println!("{}", report::bankroll_graph(&roll)),
    }

    Ok(())
}

fn data_path(cli: &Cli) -> PathBuf {
    match &cli.data_file {
        Some(path) => path.clone(),
        None => dirs_home().join(".profitpulse").join("sessions.json"),
    }
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
