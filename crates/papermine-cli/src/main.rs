//! papermine - command-line front end for the extraction pipeline

use clap::Parser;
use papermine_cli::{CleanArgs, Cli, CliError, Command, Config, ExtractArgs};
use papermine_client::{CompletionClient, OpenAiProvider, UsageLedger, DEFAULT_ENDPOINT};
use papermine_domain::PriceTable;
use papermine_normalizer::TextNormalizer;
use papermine_pipeline::ExtractionPipeline;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How much cleaned text `clean` previews when no output path is given
const CLEAN_PREVIEW_CHARS: usize = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> papermine_cli::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Clean(args) => run_clean(args),
        Command::Extract(args) => run_extract(args, &cli.config).await,
    }
}

fn run_clean(args: CleanArgs) -> papermine_cli::Result<()> {
    let normalizer = TextNormalizer::default();
    let cleaned = normalizer.clean_file(&args.xml_file)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &cleaned)?;
            println!("Cleaned text saved to {}", path.display());
        }
        None => {
            println!("Preview of cleaned content:\n");
            let preview: String = cleaned.chars().take(CLEAN_PREVIEW_CHARS).collect();
            println!("{preview}");
        }
    }
    Ok(())
}

async fn run_extract(args: ExtractArgs, config_path: &std::path::Path) -> papermine_cli::Result<()> {
    // Credentials and knobs are resolved before any network activity;
    // a bad config aborts the whole run here.
    let mut config = Config::load(config_path)?;

    if let Some(output_dir) = args.output_dir {
        config.pipeline.output_dir = output_dir;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(concurrency) = args.concurrency {
        config.pipeline.max_in_flight = concurrency;
    }
    config.validate()?;

    let paths = collect_inputs(&args.inputs)?;
    if paths.is_empty() {
        return Err(CliError::Config(
            "no .xml or .txt inputs found".to_string(),
        ));
    }

    let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
    let provider = OpenAiProvider::with_endpoint(endpoint, &config.model, &config.api_key);
    let ledger = Arc::new(UsageLedger::new());
    let client = CompletionClient::new(provider, Arc::clone(&ledger));
    let pipeline = Arc::new(ExtractionPipeline::new(client, config.pipeline.clone())?);

    // Ctrl+C finishes in-flight documents and abandons the rest.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received, finishing in-flight documents");
            signal_cancel.cancel();
        }
    });

    let report = pipeline.run_batch(paths, cancel).await;

    println!(
        "\n{} succeeded, {} skipped (blank), {} failed, {} abandoned",
        report.succeeded.len(),
        report.skipped.len(),
        report.failed.len(),
        report.abandoned.len()
    );
    for (id, artifact) in &report.succeeded {
        println!("  {} -> {}", id, artifact.display());
    }
    if !report.failed.is_empty() {
        println!("\nFailures:");
        for line in report.failure_lines() {
            println!("  {line}");
        }
    }

    let price = PriceTable::default().price_for(&config.model);
    println!("\n{}", ledger.report(&price));

    Ok(())
}

/// Expand the input list: files pass through, directories contribute their
/// `.xml` and `.txt` entries (non-recursive), sorted for a stable order.
fn collect_inputs(inputs: &[PathBuf]) -> papermine_cli::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension().is_some_and(|ext| {
                        ext.eq_ignore_ascii_case("xml") || ext.eq_ignore_ascii_case("txt")
                    })
                })
                .collect();
            entries.sort();
            paths.extend(entries);
        } else {
            // Nonexistent files stay in the list; the batch reports them
            // per-document as not-found instead of aborting the run.
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_inputs_expands_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.xml"), "<a/>").unwrap();
        fs::write(dir.path().join("a.txt"), "text").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();

        let paths = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.txt"));
        assert!(paths[1].ends_with("b.xml"));
    }

    #[test]
    fn test_collect_inputs_keeps_missing_files() {
        let paths = collect_inputs(&[PathBuf::from("/no/such/file.xml")]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("/no/such/file.xml")]);
    }
}
