use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "circuit", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session and render the stage at one instant as a PNG.
    Frame(FrameArgs),
    /// Compute tracker state for a viewport and print it as JSON.
    Progress(ProgressArgs),
    /// Replay a session and print the route snapshot as JSON.
    Snapshot(SnapshotArgs),
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Stage configuration JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session script JSON (empty session when omitted).
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed for route generation.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Host time in milliseconds to advance to (defaults to the script's last event).
    #[arg(long)]
    at: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct ProgressArgs {
    #[arg(long)]
    viewport_height: f64,

    #[arg(long)]
    document_height: f64,

    #[arg(long, default_value_t = 0.0)]
    scroll_y: f64,

    /// Zone extent in document pixels as `top:bottom`; repeat in page order.
    #[arg(long = "zone", value_parser = parse_zone, required = true)]
    zones: Vec<(f64, f64)>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Progress(args) => cmd_progress(args),
        Command::Snapshot(args) => cmd_snapshot(args),
    }
}

fn parse_zone(s: &str) -> Result<(f64, f64), String> {
    let (top, bottom) = s
        .split_once(':')
        .ok_or_else(|| format!("zone '{s}' must be top:bottom"))?;
    let top: f64 = top.trim().parse().map_err(|_| format!("bad zone top '{top}'"))?;
    let bottom: f64 = bottom
        .trim()
        .parse()
        .map_err(|_| format!("bad zone bottom '{bottom}'"))?;
    if bottom < top {
        return Err(format!("zone '{s}' has bottom above top"));
    }
    Ok((top, bottom))
}

fn read_to_string(path: &Path, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("open {what} '{}'", path.display()))
}

fn run_session(args: &SessionArgs) -> anyhow::Result<(circuit::Stage, circuit::Millis)> {
    let cfg = match &args.config {
        Some(path) => circuit::StageConfig::from_json(&read_to_string(path, "config")?)
            .with_context(|| "parse config JSON")?,
        None => circuit::StageConfig::default(),
    };
    let script = match &args.script {
        Some(path) => circuit::Script::from_json(&read_to_string(path, "script")?)
            .with_context(|| "parse script JSON")?,
        None => circuit::Script::default(),
    };

    let mut stage = circuit::Stage::new(cfg, script.zones(), args.seed)?;
    let end = stage.run_script(&script);
    let at = args.at.map_or(end, circuit::Millis).max(end);
    stage.advance(at);
    Ok((stage, at))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut stage, at) = run_session(&args.session)?;
    let frame = stage
        .render(at)
        .ok_or_else(|| anyhow::anyhow!("no frame rendered (surface unavailable)"))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let (stage, at) = run_session(&args.session)?;
    let doc = serde_json::json!({
        "at": at,
        "active": stage.field().is_active(),
        "state": stage.field().snapshot(),
    });
    let out = if args.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_progress(args: ProgressArgs) -> anyhow::Result<()> {
    let zones = args
        .zones
        .iter()
        .enumerate()
        .map(|(i, &(top, bottom))| {
            circuit::Zone::new(
                format!("zone{i}"),
                circuit::Rgba8::WHITE,
                circuit::PageRegion::new(top, bottom),
            )
        })
        .collect();
    let mut tracker = circuit::ProgressTracker::new(circuit::TrackerConfig::default(), zones)?;
    let viewport = circuit::Viewport::new(args.viewport_height, args.scroll_y, args.document_height);
    let state = tracker.remeasure(&viewport);
    println!(
        "{}",
        serde_json::json!({
            "active_zone": state.active_index(),
            "progress": state.progress,
        })
    );
    Ok(())
}
