//! Parley application binary - composition root.
//!
//! 1. Load configuration from TOML
//! 2. Train the intent classifier from the configured or built-in corpus
//! 3. Build the default reply handlers and the chat engine
//! 4. Restore the conversation context, if configured
//! 5. Run the console or script transport, then save the context

mod cli;
mod snapshot;
mod transport;

use std::sync::Arc;

use clap::Parser;
use parley_chat::{
    default_registry_with, ChatEngine, DirectoryKnowledge, KnowledgeSource, NoKnowledge,
    WhatIsHandler,
};
use parley_core::ParleyConfig;
use parley_nlp::{Corpus, CorpusClassifier, RuleAnalyzer, TextAnalyzer};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = ParleyConfig::load_or_default(&config_file);
    let log_level = args.resolve_log_level(&config);

    // Replies go to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting Parley v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let corpus = match args.resolve_corpus_path(&config) {
        Some(path) => Corpus::load(&path)?,
        None => {
            tracing::info!("Using built-in corpus");
            Corpus::builtin()?
        }
    };

    let analyzer: Arc<dyn TextAnalyzer> = Arc::new(RuleAnalyzer::new());
    let classifier = CorpusClassifier::train(&corpus)?
        .with_none_threshold(config.classifier.none_threshold)
        .with_analyzer(Arc::clone(&analyzer));

    let knowledge: Arc<dyn KnowledgeSource> = match args.resolve_knowledge_dir(&config) {
        Some(dir) => Arc::new(DirectoryKnowledge::new(dir, RuleAnalyzer::new())),
        None => Arc::new(NoKnowledge),
    };
    let registry =
        default_registry_with(WhatIsHandler::new(knowledge).with_settings(&config.knowledge));

    let classifier = Arc::new(classifier);
    let mut engine = match args.resolve_seed(&config) {
        Some(seed) => ChatEngine::with_seed(classifier, analyzer, registry, seed),
        None => ChatEngine::new(classifier, analyzer, registry),
    }
    .with_language(config.engine.language.clone());

    let context_file = args.resolve_context_file(&config);
    if let Some(ref path) = context_file {
        if let Some(context) = snapshot::load_context_if_exists(path)? {
            engine = engine.with_context(context);
        }
    }

    match args.script {
        Some(ref path) => {
            let script = tokio::fs::read_to_string(path).await?;
            let summary = transport::run_script(&mut engine, &script, &mut std::io::stdout()).await?;
            tracing::info!(
                messages = summary.messages,
                replies = summary.replies,
                rejected = summary.rejected,
                "Script finished"
            );
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let turns = transport::run_console(&mut engine, stdin, &mut std::io::stdout()).await?;
            tracing::info!(turns, "Session ended");
        }
    }

    if let Some(ref path) = context_file {
        snapshot::save_context(engine.context(), path)?;
    }

    Ok(())
}
