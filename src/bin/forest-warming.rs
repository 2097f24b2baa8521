use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "forest-warming", version)]
struct Cli {
    /// Log filter level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict warming for a loss grid and write the GeoTIFF artifact.
    Predict(PredictArgs),
    /// Print a generated annular kernel as JSON.
    Kernel(KernelArgs),
}

#[derive(Parser, Debug)]
struct PredictArgs {
    /// Input loss grid (JSON, or single-band .tif/.tiff).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Percentage of cover removed, in (0, 100].
    #[arg(long)]
    amount: f64,

    /// Deforestation type: clear-fell or fragmented.
    #[arg(long = "type", default_value = "clear-fell")]
    event_type: String,

    /// Directory standing in for blob storage.
    #[arg(long, default_value = "out")]
    store: PathBuf,

    /// Container (sub-directory) for the artifact.
    #[arg(long)]
    container: Option<String>,

    /// Artifact file name. Defaults to a name derived from the request fingerprint.
    #[arg(long)]
    blob: Option<String>,

    /// Engine configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write a colour PNG preview here.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Convolve rings in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct KernelArgs {
    /// Outer radius in cells.
    #[arg(long)]
    outer: u32,

    /// Inner radius in cells.
    #[arg(long, default_value_t = 0)]
    inner: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Predict(args) => cmd_predict(args),
        Command::Kernel(args) => cmd_kernel(args),
    }
}

fn cmd_predict(args: PredictArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => forest_warming::EngineConfig::from_path(path)?,
        None => forest_warming::EngineConfig::default(),
    };
    if args.parallel {
        config.threading.parallel = true;
    }
    if args.threads.is_some() {
        config.threading.threads = args.threads;
    }

    let grid = forest_warming::load_loss_grid(&args.in_path)
        .with_context(|| format!("load loss grid '{}'", args.in_path.display()))?;

    let sink = forest_warming::FileSink::new(&args.store);
    let mut svc = forest_warming::PredictionService::new(config, sink)?;
    let req = forest_warming::PredictionRequest {
        amount: args.amount,
        event_type: args.event_type,
        container_nm: args.container,
        blob_nm: args.blob,
    };
    let outcome = svc.handle(&grid, &req)?;

    if let Some(path) = &args.preview {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let img = forest_warming::render_preview(
            &outcome.quantized.bytes,
            svc.colormap(),
            Some(&outcome.valid),
        )?;
        let png = forest_warming::encode_preview_png(&img)?;
        std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&outcome.response)?);
    Ok(())
}

fn cmd_kernel(args: KernelArgs) -> anyhow::Result<()> {
    let kernel = forest_warming::generate_kernel(args.outer, args.inner)?;
    println!("{}", serde_json::to_string_pretty(&kernel)?);
    Ok(())
}
