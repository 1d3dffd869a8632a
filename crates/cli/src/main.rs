mod echo;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use transfero_core::{
    BatchConfig, BatchRunner, FetchConfig, HttpFetcher, HttpTranslator, JsonConfig, TextConfig,
    TranslatorConfig, convert_to_json, convert_to_text, parse_url_lines, read_urls_from_path,
};

use echo::{print_banner, print_batch_outcome, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for batch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Extract text fragments from web pages and translate them in batch
#[derive(Parser, Debug)]
#[command(name = "transfero")]
#[command(author = "Transfero Contributors")]
#[command(version = VERSION)]
#[command(about = "Extract and translate text from web pages", long_about = None)]
struct Args {
    /// URL list file (txt, json, csv), or "-" for line-delimited stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Target language codes
    #[arg(short, long, value_delimiter = ',', default_value = "en,zh-cn,vi", value_name = "LANGS")]
    languages: Vec<String>,

    /// Concurrent page jobs
    #[arg(short = 'w', long, default_value = "3", value_name = "NUM")]
    workers: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Translation endpoint URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Include per-fragment rows in text output
    #[arg(long)]
    rows: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_urls(input: &str) -> anyhow::Result<Vec<String>> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(parse_url_lines(&buffer))
    } else {
        read_urls_from_path(Path::new(input))
            .with_context(|| format!("Failed to read URL list: {}", input))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("transfero_core=debug")),
            )
            .with_writer(io::stderr)
            .init();
        print_info("Debug logging enabled");
        eprintln!();
    }

    if args.verbose {
        if args.input == "-" {
            print_step(1, 4, "Reading URL list from stdin");
        } else {
            print_step(1, 4, &format!("Reading URL list from {}", args.input.bright_white()));
        }
    }

    let urls = read_urls(&args.input)?;
    anyhow::ensure!(!urls.is_empty(), "No URLs found in {}", args.input);

    if args.verbose {
        eprintln!("  {} {}", "URLs:".dimmed(), urls.len().to_string().bright_white());
        eprintln!(
            "  {} {}",
            "Languages:".dimmed(),
            args.languages.join(", ").bright_white()
        );
        eprintln!();
        print_step(2, 4, "Preparing HTTP clients");
    }

    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args
            .user_agent
            .unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let fetcher = HttpFetcher::new(fetch_config).context("Failed to build HTTP client")?;

    let translator_config = TranslatorConfig {
        api_url: args
            .api_url
            .unwrap_or_else(|| TranslatorConfig::default().api_url),
        timeout: args.timeout,
        ..Default::default()
    };
    let translator =
        HttpTranslator::new(translator_config).context("Failed to build translation client")?;

    if args.verbose {
        print_step(3, 4, &format!("Processing {} pages", urls.len()));
    }

    let config = BatchConfig { concurrency: args.workers, ..Default::default() };
    let runner = BatchRunner::new(Arc::new(fetcher), Arc::new(translator), config);
    let summary = runner.run(&urls, &args.languages);

    if args.verbose {
        print_batch_outcome(summary.succeeded, summary.failed);
        eprintln!();
        print_step(4, 4, "Writing report");
    }

    let report = match args.format {
        OutputFormat::Text => convert_to_text(&summary, &TextConfig { include_rows: args.rows })
            .context("Failed to render text report")?,
        OutputFormat::Json => convert_to_json(&summary, &JsonConfig { pretty: true })
            .context("Failed to render JSON report")?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, report)
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Report written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", report);
        }
    }

    if summary.failed > 0 {
        print_warning(&format!(
            "{} of {} pages failed; see the report for details",
            summary.failed,
            summary.total()
        ));
    }

    Ok(())
}
