use std::path::{Path, PathBuf};

use anyhow::Context as _;
use auxin_motion::{ColorDef, ComponentId, Scene, Snapshot, Stage};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "auxin-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one canvas component at a point in time as a PNG.
    Frame(FrameArgs),
    /// Print every component's state at a point in time as JSON.
    Snapshot(SnapshotArgs),
    /// Load and validate a scene without running it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct SimArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulated time to stop at, in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Scroll the viewport to this page offset before running.
    #[arg(long)]
    scroll_y: Option<f64>,

    /// Put the pointer over this component (at its center) before running.
    #[arg(long)]
    hover: Option<u32>,

    /// Click this component before running.
    #[arg(long)]
    click: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Index of the canvas component to render.
    #[arg(long)]
    component: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Opaque background the canvas is flattened onto.
    #[arg(long, default_value = "#060010")]
    background: String,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(serde::Serialize)]
struct Report {
    at_ms: f64,
    components: Vec<ComponentReport>,
}

#[derive(serde::Serialize)]
struct ComponentReport {
    id: u32,
    snapshot: Snapshot,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<Scene> {
    Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn simulate(args: &SimArgs) -> anyhow::Result<Stage> {
    let scene = read_scene(&args.in_path)?;
    let mut stage = scene.build().context("build scene")?;

    if let Some(y) = args.scroll_y {
        stage.scroll_to(y);
    }
    if let Some(n) = args.hover {
        let id = ComponentId(n);
        let bounds = stage
            .bounds(id)
            .with_context(|| format!("no component {n} to hover"))?;
        stage.pointer_enter(id)?;
        stage.pointer_move(id, (bounds.width() / 2.0, bounds.height() / 2.0).into())?;
    }
    if let Some(n) = args.click {
        stage.click(ComponentId(n))?;
    }

    stage.run_frames_until(args.at_ms);
    Ok(stage)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let background = ColorDef::parse(&args.background)
        .map_err(|e| anyhow::anyhow!("invalid --background: {e}"))?;
    let mut stage = simulate(&args.sim)?;

    let frame = stage
        .render(ComponentId(args.component))
        .with_context(|| format!("render component {}", args.component))?;
    anyhow::ensure!(
        !frame.is_empty(),
        "component {} has a zero-sized canvas",
        args.component
    );
    let rgba = frame.flatten_over(background.to_rgba8_straight())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &rgba,
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
    let stage = simulate(&args.sim)?;

    let mut components = Vec::new();
    for id in stage.mounted() {
        components.push(ComponentReport {
            id: id.0,
            snapshot: stage.snapshot(id)?,
        });
    }
    let report = Report {
        at_ms: stage.now(),
        components,
    };

    let json = serde_json::to_string_pretty(&report).context("serialize snapshot")?;
    match &args.out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write snapshot '{}'", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    scene.validate()?;
    eprintln!(
        "ok: {} component(s), viewport {}x{}",
        scene.components.len(),
        scene.viewport.width,
        scene.viewport.height
    );
    Ok(())
}
