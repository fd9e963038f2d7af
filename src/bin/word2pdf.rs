//! CLI binary for word2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClientConfig`, shows the metadata panel, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use word2pdf::{
    extract_metadata, run, select, ClientConfig, FileMetadata, SessionObserver, SessionState,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Spinner wired to session state ───────────────────────────────────────────

/// Terminal observer: keeps a single spinner in sync with the workflow
/// state. The spinner is the CLI's "converting" indicator; it is cleared on
/// settlement so the final message always lands on a clean line.
struct CliObserver {
    bar: ProgressBar,
}

impl CliObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl SessionObserver for CliObserver {
    fn on_state_change(&self, state: &SessionState) {
        match state {
            SessionState::Extracting => self.bar.set_message("Reading document…"),
            SessionState::Converting => self.bar.set_message("Converting…"),
            SessionState::Succeeded | SessionState::Failed(_) => self.bar.finish_and_clear(),
            SessionState::Idle => {}
        }
    }

    fn on_metadata(&self, metadata: &FileMetadata) {
        self.bar.println(render_metadata(metadata));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert against the default local service
  word2pdf report.docx

  # Custom endpoint and output directory
  word2pdf --endpoint http://converter.internal:3000/convertFile -o ./out report.docx

  # Metadata only, no network
  word2pdf --inspect-only report.docx

  # Machine-readable metadata
  word2pdf --inspect-only --json report.docx

SERVICE CONTRACT:
  POST {endpoint} with the document under multipart field "file".
  200 → PDF bytes; 400 → {"message": "..."} rejection; anything else is
  reported as an upstream failure.

ENVIRONMENT VARIABLES:
  WORD2PDF_ENDPOINT   Conversion endpoint URL
  WORD2PDF_OUTPUT     Output directory for converted PDFs
"#;

/// Convert Word documents to PDF through a conversion service.
#[derive(Parser, Debug)]
#[command(
    name = "word2pdf",
    version,
    about = "Convert Word documents to PDF through a conversion service",
    long_about = "Convert .doc/.docx files to PDF by submitting them to a conversion service. \
Shows client-side metadata (size, modification time, approximate word count) and saves the \
returned PDF as <stem>.pdf.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the Word document (.doc or .docx).
    input: PathBuf,

    /// Directory for the converted PDF (default: next to the input file).
    #[arg(short, long, env = "WORD2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Conversion endpoint URL.
    #[arg(
        long,
        env = "WORD2PDF_ENDPOINT",
        default_value = word2pdf::DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// Whole-request timeout in seconds (upload + conversion + download).
    #[arg(long, env = "WORD2PDF_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// TCP connect timeout in seconds.
    #[arg(long, env = "WORD2PDF_CONNECT_TIMEOUT", default_value_t = 10)]
    connect_timeout: u64,

    /// Skip the metadata panel (no word count extraction).
    #[arg(long, env = "WORD2PDF_NO_METADATA")]
    no_metadata: bool,

    /// Print document metadata only; no network call.
    #[arg(long)]
    inspect_only: bool,

    /// Output metadata as JSON (with --inspect-only).
    #[arg(long, env = "WORD2PDF_JSON")]
    json: bool,

    /// Submit the file even if it does not look like a Word document.
    #[arg(long)]
    force: bool,

    /// Disable the spinner.
    #[arg(long, env = "WORD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "WORD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "WORD2PDF_QUIET")]
    quiet: bool,
}

fn render_metadata(meta: &FileMetadata) -> String {
    let mut out = String::new();
    out.push_str(&bold("File Metadata\n"));
    out.push_str(&format!("  Name:          {}\n", meta.name));
    out.push_str(&format!("  Size:          {:.2} KB\n", meta.size_kb()));
    match meta.last_modified {
        Some(ts) => out.push_str(&format!(
            "  Last Modified: {}\n",
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        None => out.push_str("  Last Modified: unknown\n"),
    }
    match meta.word_count {
        Some(words) => out.push_str(&format!("  Word Count:    {words}")),
        None => out.push_str(&format!("  Word Count:    {}", dim("n/a"))),
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner owns the terminal while a conversion is in flight, so
    // library INFO logs are suppressed unless the user asks for them.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut builder = ClientConfig::builder()
        .endpoint(cli.endpoint)
        .request_timeout_secs(cli.timeout)
        .connect_timeout_secs(cli.connect_timeout)
        .skip_metadata(cli.no_metadata)
        .force(cli.force);
    if let Some(ref dir) = cli.output {
        builder = builder.output_dir(dir);
    }

    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    if show_progress {
        builder = builder.observer(CliObserver::new());
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let file = select(&cli.input, &config)?;
        let meta = extract_metadata(&file, &config)
            .await
            .context("Failed to extract metadata")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("{}", render_metadata(&meta));
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    match run(&cli.input, &config).await {
        Ok(outcome) => {
            if !cli.quiet {
                println!(
                    "{} {}",
                    green("✔"),
                    bold("File Converted Successfully")
                );
                println!(
                    "   {}  {}",
                    outcome.conversion.pdf_path.display(),
                    dim(&format!(
                        "{} bytes, {}ms",
                        outcome.conversion.pdf_bytes, outcome.conversion.duration_ms
                    )),
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", red("✘"));
            std::process::exit(1);
        }
    }
}
