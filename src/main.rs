//! autodoc — render a project's documentation record and optionally export
//! it as a paginated PDF.
//!
//! Two ways to obtain a record:
//!
//! - **backend mode**: `autodoc /path/to/project` submits the directory to
//!   the analysis backend and renders the returned record
//! - **file mode**: `autodoc --input record.json` renders an already
//!   generated record without touching the network

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use autodoc::export::{artifact_name, ExportConfig, ExportOutcome, ExportPipeline};
use autodoc::model::DocumentationRecord;
use autodoc::render::create_renderer;
use autodoc::session::Session;
use autodoc::submit::{SubmissionClient, DEFAULT_ENDPOINT};

#[derive(Parser)]
#[command(
    name = "autodoc",
    about = "Render project documentation records and export paginated PDF reports"
)]
struct Cli {
    /// Directory to document (sent to the analysis backend).
    path: Option<String>,

    /// Analysis backend endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    server: String,

    /// Read a documentation record from a JSON file instead of the backend.
    #[arg(long, value_name = "FILE", conflicts_with = "path")]
    input: Option<PathBuf>,

    /// Report format printed to stdout: text, html
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Export the report as a paginated PDF.
    #[arg(long)]
    pdf: bool,

    /// PDF output path (defaults to "<project name>.pdf").
    #[arg(short = 'o', long, value_name = "FILE", requires = "pdf")]
    output: Option<PathBuf>,

    /// Do not print the report to stdout.
    #[arg(long)]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let record = load_record(&cli).await?;
    let mut session = Session::new();
    session.commit(&record);

    if !cli.quiet {
        let renderer = create_renderer(&cli.format)?;
        if let Some(tree) = session.tree() {
            print!("{}", renderer.render(tree));
        }
    }

    if cli.pdf {
        let dest = cli.output.clone().unwrap_or_else(|| {
            PathBuf::from(artifact_name(session.project_name().unwrap_or_default()))
        });
        let pipeline = ExportPipeline::new(ExportConfig::default());
        match pipeline.export(session.tree(), &dest).await? {
            ExportOutcome::Exported(artifact) => {
                eprintln!(
                    "wrote {} page(s) to {}",
                    artifact.pages,
                    artifact.path.display()
                );
            }
            ExportOutcome::Busy => bail!("an export is already in flight"),
            ExportOutcome::NothingToRender => bail!("nothing to export"),
        }
    }

    Ok(())
}

/// Obtain the record from `--input` or by submitting to the backend.
async fn load_record(cli: &Cli) -> Result<DocumentationRecord> {
    if let Some(ref input) = cli.input {
        let raw = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let record = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a documentation record", input.display()))?;
        return Ok(record);
    }

    let Some(ref path) = cli.path else {
        bail!("either a directory path or --input is required");
    };
    let client = SubmissionClient::new(cli.server.clone());
    let record = client.submit(path).await.context("submission failed")?;
    Ok(record)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("AUTODOC_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
