use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use spacebattle::{
    FrameComposer, MatchAssets, MatchConfig, MatchRenderer, PatrolEntity, RenderState, Side,
    TickOutcome, make_patrol,
};

#[derive(Parser, Debug)]
#[command(name = "spacebattle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a single snapshot and write it as a PNG.
    Frame(FrameArgs),
    /// Stream a whole replay to video and/or a window.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Match config JSON.
    #[arg(long = "match")]
    match_path: PathBuf,

    /// Replay file, one JSON snapshot per line.
    #[arg(long)]
    replay: PathBuf,

    /// Snapshot index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Seed for the satellite patrol.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Match config JSON.
    #[arg(long = "match")]
    match_path: PathBuf,

    /// Replay file, one JSON snapshot per line.
    #[arg(long)]
    replay: PathBuf,

    /// Output video path (overrides the config; requires `ffmpeg` on PATH).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Show the match in a window (requires the `window` feature).
    #[arg(long)]
    window: bool,

    /// Seed for the satellite patrol.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_replay(path: &Path) -> anyhow::Result<Vec<RenderState>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("open replay '{}'", path.display()))?;
    let states = RenderState::parse_replay(&text)?;
    anyhow::ensure!(!states.is_empty(), "replay '{}' has no snapshots", path.display());
    Ok(states)
}

/// Both sides' satellites, advanced once per snapshot when the replay doesn't carry them.
struct Patrols {
    entities: Vec<PatrolEntity>,
    delta_t: f64,
}

impl Patrols {
    fn new(cfg: &MatchConfig, board: (u32, u32), seed: u64) -> anyhow::Result<Option<Self>> {
        let Some(patrol) = &cfg.patrol else {
            return Ok(None);
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut entities = make_patrol(patrol, Side::Left, board.0, board.1, &mut rng)?;
        entities.extend(make_patrol(patrol, Side::Right, board.0, board.1, &mut rng)?);
        Ok(Some(Self {
            entities,
            delta_t: cfg.delta_t,
        }))
    }

    fn apply(&self, state: &mut RenderState) {
        if state.satellites.is_empty() {
            state.satellites = self.entities.iter().map(|e| e.current).collect();
        }
    }

    fn advance(&mut self) {
        for e in &mut self.entities {
            e.advance(self.delta_t);
        }
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = MatchConfig::load(&args.match_path)?;
    let states = read_replay(&args.replay)?;
    let Some(state) = states.get(args.index) else {
        anyhow::bail!(
            "snapshot index {} out of range (replay has {})",
            args.index,
            states.len()
        );
    };

    let assets = MatchAssets::load(
        &cfg.background,
        &cfg.left,
        &cfg.right,
        cfg.satellite_sprite.as_deref(),
        &cfg.font,
    )?;
    let mut composer = FrameComposer::new(
        assets,
        cfg.left.display_name.clone(),
        cfg.right.display_name.clone(),
    );

    let mut state = state.clone();
    if let Some(mut patrols) = Patrols::new(&cfg, composer.board_size(), args.seed)? {
        for _ in 0..args.index {
            patrols.advance();
        }
        patrols.apply(&mut state);
    }
    let frame = composer.compose(&state)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let canvas = &frame.canvas;
    image::save_buffer_with_format(
        &args.out,
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = MatchConfig::load(&args.match_path)?;
    if let Some(out) = args.out {
        cfg.output.video_path = Some(out);
    }
    cfg.output.show_window |= args.window;
    anyhow::ensure!(
        cfg.output.video_path.is_some() || cfg.output.show_window,
        "nothing to render to: pass --out and/or --window, or set them in the match config"
    );

    let states = read_replay(&args.replay)?;
    let mut renderer = MatchRenderer::open(&cfg)?;
    let mut patrols = Patrols::new(&cfg, renderer.composer().board_size(), args.seed)?;

    for state in &states {
        let mut state = state.clone();
        if let Some(patrols) = patrols.as_mut() {
            patrols.apply(&mut state);
            patrols.advance();
        }
        if renderer.tick(&state)? == TickOutcome::Cancelled {
            break;
        }
    }
    renderer.release()?;

    tracing::info!(ticks = renderer.ticks(), snapshots = states.len(), "match rendered");
    if let Some(path) = &cfg.output.video_path {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
