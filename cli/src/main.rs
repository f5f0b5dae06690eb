//! CLI entrypoint for zsh-tips-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection. Only the tip is written to stdout.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tips_application::{
    GenerateTipInput, GenerateTipUseCase, NoTipProgress, PersistTipUseCase, TipProgressNotifier,
};
use tips_domain::ToolName;
use tips_infrastructure::{
    ConfigLoader, EvidenceBudget, FileConfig, JsonSchemaToolConverter, JsonTipCache,
    JsonlConversationLogger, LocalEvidenceExecutor, OllamaGateway, TipFileWriter,
    default_sources, discover_context_length,
};
use tips_presentation::{Cli, ConsoleFormatter, SimpleProgress, TipProgressReporter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout carries only the tip
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        return show_config(&cli);
    }

    // Validate the invocation before touching config or the engine
    let tool = ToolName::new(cli.tool.as_deref().unwrap_or_default())
        .context("Invalid tool name")?;
    let (Some(cache_path), Some(tip_path)) = (cli.cache.as_ref(), cli.tip_file.as_ref()) else {
        bail!("CACHE_JSON and TIP_FILE are required");
    };

    let config = ConfigLoader::load(cli.config.as_deref(), cli.model.as_deref())?;
    let runner = config.evidence.process_runner();
    let model_config = config.model_config(|model| discover_context_length(&runner, model));
    info!(
        "Using {} with {} context tokens",
        model_config.model, model_config.context_tokens
    );

    // === Dependency Injection ===
    let executor = LocalEvidenceExecutor::new(default_sources(
        runner,
        config.evidence.tldr_providers(),
    ))
    .with_budget(EvidenceBudget::new(
        model_config.context_tokens,
        config.truncation_ratio,
    ));
    let gateway = OllamaGateway::new(&config.ollama.base_url, config.ollama.request_timeout())?;

    let mut use_case = GenerateTipUseCase::new(
        Arc::new(gateway),
        Arc::new(executor),
        Arc::new(JsonSchemaToolConverter),
    );
    if let Some(path) = &cli.transcript {
        match JsonlConversationLogger::new(path, &tool) {
            Some(logger) => use_case = use_case.with_conversation_logger(Arc::new(logger)),
            None => warn!("Transcript disabled: cannot write {}", path.display()),
        }
    }

    let progress: Box<dyn TipProgressNotifier> = if cli.quiet {
        Box::new(NoTipProgress)
    } else if std::io::stderr().is_terminal() {
        if cli.verbose > 0 {
            Box::new(TipProgressReporter::verbose())
        } else {
            Box::new(TipProgressReporter::new())
        }
    } else {
        Box::new(SimpleProgress)
    };

    let input = GenerateTipInput::new(
        tool.clone(),
        model_config,
        config.agent.execution_params(),
    );
    let output = use_case.execute(input, &*progress).await?;

    PersistTipUseCase::new(
        Arc::new(JsonTipCache::new(cache_path)),
        Arc::new(TipFileWriter::new(tip_path)),
    )
    .execute(&tool, &output.tip)?;

    println!("{}", ConsoleFormatter::tip(&output));
    if cli.verbose > 0 && !cli.quiet {
        eprintln!("{}", ConsoleFormatter::summary(&output));
    }

    Ok(())
}

fn show_config(cli: &Cli) -> Result<()> {
    ConfigLoader::print_config_sources(cli.config.as_deref(), cli.model.as_deref());
    println!();

    let config: FileConfig = ConfigLoader::load(cli.config.as_deref(), cli.model.as_deref())?;
    let runner = config.evidence.process_runner();
    let model_config = config.model_config(|model| discover_context_length(&runner, model));
    print!("{}", ConsoleFormatter::model_config(&model_config));
    println!("  ollama: {}", config.ollama.base_url);

    Ok(())
}
