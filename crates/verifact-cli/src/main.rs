mod demo;
mod display;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use verifact_core::config::{
    DEFAULT_CHAR_LIMIT, DEFAULT_FETCH_TIMEOUT, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_TIMEOUT,
    DEFAULT_MAX_RESULTS, DEFAULT_MODEL, DEFAULT_SEARCH_URL,
};
use verifact_core::{CheckResult, Claim, Config, ConfigError, RawVerdict};
use verifact_pipeline::{PipelineError, WebFactChecker};

const VERBOSE_FILTER: &str =
    "warn,verifact=info,verifact_core=info,verifact_fetch=info,verifact_ai=info,verifact_pipeline=info";

#[derive(Parser)]
#[command(
    name = "verifact",
    version,
    about = "Check a claim against trusted fact-checking and news sites"
)]
struct Cli {
    /// Claim to check. Prompts on stdin when omitted.
    claim: Option<String>,

    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "VERIFACT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Gemini API.
    #[arg(long, env = "VERIFACT_LLM_URL", default_value = DEFAULT_LLM_BASE_URL)]
    llm_url: String,

    /// Base URL of the SearXNG instance.
    #[arg(long, env = "VERIFACT_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Comma-separated list of trusted domains.
    #[arg(long, env = "VERIFACT_DOMAINS", value_delimiter = ',')]
    domains: Option<Vec<String>>,

    #[arg(long, env = "VERIFACT_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Maximum snippet length in characters.
    #[arg(long, env = "VERIFACT_CHAR_LIMIT", default_value_t = DEFAULT_CHAR_LIMIT)]
    char_limit: usize,

    /// Per-page fetch timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    fetch_timeout: u64,

    /// Model call timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_LLM_TIMEOUT.as_secs())]
    llm_timeout: u64,

    /// Print the result as JSON instead of a card.
    #[arg(long)]
    json: bool,

    /// Also print the model's verdict before normalisation.
    #[arg(long)]
    raw: bool,

    /// Fall back to offline heuristics when the backend cannot be built.
    #[arg(long)]
    demo: bool,

    /// Log pipeline progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::new(self.api_key.clone().unwrap_or_default())?;
        config.model = self.model.clone();
        config.llm_base_url = self.llm_url.clone();
        config.search_url = self.search_url.clone();
        if let Some(domains) = &self.domains {
            config.allowed_domains = domains
                .iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
        }
        config.max_results = self.max_results;
        config.char_limit = self.char_limit;
        config.fetch_timeout = Duration::from_secs(self.fetch_timeout);
        config.llm_timeout = Duration::from_secs(self.llm_timeout);
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the claim from `arg` or, if absent, an interactive prompt.
/// Returns `None` when the claim is blank.
fn read_claim(arg: Option<&str>, input: impl BufRead, prompt: impl Write) -> Result<Option<String>> {
    let text = match arg {
        Some(text) => text.to_string(),
        None => prompt_line(input, prompt)?,
    };
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

fn prompt_line(mut input: impl BufRead, mut prompt: impl Write) -> Result<String> {
    write!(prompt, "Enter a claim to check: ")?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("reading claim from stdin")?;
    Ok(line)
}

/// Build the production pipeline, or `None` when it is unavailable and demo
/// mode was requested.
fn build_backend(cli: &Cli) -> Result<Option<WebFactChecker>> {
    let built = cli
        .config()
        .map_err(PipelineError::from)
        .and_then(|config| WebFactChecker::from_config(&config));
    match built {
        Ok(checker) => Ok(Some(checker)),
        Err(e) if cli.demo => {
            warn!(error = %e, "backend unavailable, showing demo result");
            Ok(None)
        }
        Err(e) => Err(e).context("starting fact checker"),
    }
}

/// Run one check. The backend is built before any input is read, so
/// configuration errors surface before the prompt.
async fn run(
    cli: &Cli,
    input: impl BufRead,
    mut out: impl Write,
    mut diag: impl Write,
) -> Result<ExitCode> {
    let backend = build_backend(cli)?;

    let Some(statement) = read_claim(cli.claim.as_deref(), input, &mut out)? else {
        writeln!(out, "No claim entered; exiting.")?;
        return Ok(ExitCode::FAILURE);
    };

    let Some(checker) = backend else {
        let result = demo::demo_result(&statement);
        emit(cli, &Claim::new(&statement), &result, None, &mut out, &mut diag)?;
        return Ok(ExitCode::SUCCESS);
    };

    writeln!(diag, "Searching for evidence and verifying claim...")?;
    let inspection = checker.inspect(&statement).await;
    emit(
        cli,
        &inspection.claim,
        &inspection.result,
        inspection.raw.as_ref(),
        &mut out,
        &mut diag,
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Write the result to `out`. With `--json`, `out` carries only the JSON
/// document and the raw verdict goes to `diag`.
fn emit(
    cli: &Cli,
    claim: &Claim,
    result: &CheckResult,
    raw: Option<&RawVerdict>,
    mut out: impl Write,
    mut diag: impl Write,
) -> Result<()> {
    if cli.raw {
        let text = display::render_raw(raw);
        if cli.json {
            writeln!(diag, "{text}")?;
        } else {
            writeln!(out, "{text}")?;
        }
    }
    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        write!(out, "{}", display::render_card(claim, result, Utc::now()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli, io::stdin().lock(), io::stdout(), io::stderr()).await
}
