use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use fanyi_config::Config;
use fanyi_core::dictionary::DictionaryAdapter;
use fanyi_types::{DictionaryOptions, NormalizedRecord};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod state;

use self::state::AppState;

/// Look up English words in the Oxford EN dictionary
#[derive(Parser, Debug)]
#[command(name = "fanyi", version)]
struct Cli {
    /// Words or phrases to look up
    #[arg(required = true)]
    words: Vec<String>,

    /// Example sentences kept per sense group
    #[arg(long)]
    max_example: Option<i64>,

    /// Print records as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fanyi=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = Arc::new(AppState::new(Config::new())?);

    if cli.max_example.is_some() {
        state.dictionary.set_options(DictionaryOptions {
            maxexample: cli.max_example,
        });
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, cli, shutdown).await
}

async fn run(
    state: Arc<AppState>,
    cli: Cli,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    tracing::info!(
        "{} via {}",
        state.dictionary.display_name(),
        state.config.network.base()
    );

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            Ok(())
        }
        result = lookup_all(&state, &cli) => result,
    }
}

async fn lookup_all(state: &AppState, cli: &Cli) -> anyhow::Result<()> {
    for word in &cli.words {
        let records = state.dictionary.find_term(word).await;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            continue;
        }

        if records.is_empty() {
            println!("{word}: no results");
            continue;
        }

        for record in &records {
            print_record(record);
        }
    }

    Ok(())
}

fn print_record(record: &NormalizedRecord) {
    if record.pronunciation.is_empty() {
        println!("{}", record.headword);
    } else {
        println!("{}  {}", record.headword, record.pronunciation);
    }

    for (i, block) in record.definition_blocks.iter().enumerate() {
        println!("  {}. {}", i + 1, block);
    }
    println!();
}
