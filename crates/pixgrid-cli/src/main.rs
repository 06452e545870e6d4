use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixgrid_core::{ExportFormat, InputFormat, PipelineConfig, Session};

mod steps;

use steps::Step;

#[derive(Parser, Debug)]
#[command(name = "pixgrid")]
#[command(about = "Turn photos into 4-level pixel art with a copyable grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load an image, run a sequence of steps and export the result
    Process {
        /// Source image (PNG, JPEG, BMP, GIF or WEBP)
        input: PathBuf,

        /// Output file; the extension picks the format (png, jpg, bmp)
        #[arg(short, long)]
        output: PathBuf,

        /// Letterbox onto the canvas instead of stretching
        #[arg(long)]
        keep_aspect: bool,

        /// Step to run, in order. Repeatable: rotate, pixelate, quantize,
        /// quantize-fixed, binarize, recolor, grid, undo, jump:<n>
        #[arg(long = "op", value_name = "STEP")]
        ops: Vec<Step>,

        /// YAML pipeline configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Don't record undo history
        #[arg(long)]
        no_history: bool,
    },
    /// List accepted input and output formats
    Formats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixgrid=warn,pixgrid_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Process {
            input,
            output,
            keep_aspect,
            ops,
            config,
            no_history,
        } => run_process_command(
            &input,
            &output,
            keep_aspect,
            &ops,
            config.as_deref(),
            no_history,
        ),
        Commands::Formats => {
            run_formats_command();
            Ok(())
        }
    }
}

/// Run one load → steps → export pass
fn run_process_command(
    input: &Path,
    output: &Path,
    keep_aspect: bool,
    ops: &[Step],
    config: Option<&Path>,
    no_history: bool,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    // Fail on a bad output extension before doing any work
    ExportFormat::from_path(output)?;

    let mut session = Session::new(config);
    if no_history {
        session.set_history_recording(false);
    }
    session.set_maintain_aspect_ratio(keep_aspect);
    session
        .load_path(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    for (i, step) in ops.iter().enumerate() {
        let operation = step
            .apply(&mut session)
            .with_context(|| format!("Step {} ({}) failed", i + 1, step))?;
        tracing::debug!(step = %step, operation = %operation, "Step complete");
    }

    let format = session
        .export(output)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    if let Some(image) = session.current_image() {
        println!(
            "Exported {} ({}, {}x{} before export sizing)",
            output.display(),
            format.extension(),
            image.width(),
            image.height()
        );
    }

    if session.history().is_recording() {
        println!("History:");
        for (index, operation) in session.history().labels() {
            println!("  {:>2}: {}", index, operation);
        }
    }

    Ok(())
}

fn run_formats_command() {
    println!("Input formats:");
    for format in InputFormat::ALL {
        println!("  {:?}: {}", format, format.extensions().join(", "));
    }
    println!("Output formats:");
    for format in [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Bmp] {
        println!("  {:?}: {} ({})", format, format.extension(), format.mime_type());
    }
}
