use std::io::Read;

use tracing_subscriber::EnvFilter;

use vetriage::analysis::AnalysisEngine;
use vetriage::corpus::SqliteCorpus;
use vetriage::lexicon::Lexicon;
use vetriage::{config, report};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json_output = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    let text = if args.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        args.join(" ")
    };

    tracing::info!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    std::fs::create_dir_all(config::app_data_dir())?;
    let corpus = SqliteCorpus::open(&config::corpus_db_path())?;
    let engine = AnalysisEngine::new(Lexicon::builtin(), corpus);

    let analysis = engine.analyze(&text)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", report::format_report(&analysis));
    }

    Ok(())
}
