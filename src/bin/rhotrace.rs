use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rhotrace::{
    CpuSurface, FfmpegSink, FfmpegSinkOpts, PlaybackOpts, PngSequenceSink, Readback as _,
    RenderConfig, Session,
};

#[derive(Parser, Debug)]
#[command(name = "rhotrace", version, about = "Trace theta-rho paths")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one PNG: the full path, or the animation frame at --cursor.
    Frame(FrameArgs),
    /// Run the animation and write a PNG sequence.
    Frames(FramesArgs),
    /// Run the animation and encode an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print path statistics.
    Info(InfoArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input theta-rho file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render options as JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw with the single path colour instead of the hue gradient.
    #[arg(long)]
    solid: bool,

    /// Samples advanced per frame.
    #[arg(long)]
    step: Option<usize>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw the animation frame at this cursor instead of the full path.
    #[arg(long)]
    cursor: Option<usize>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for frame_00000.png, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Keep every n-th frame (the last frame is always kept).
    #[arg(long, default_value_t = 1)]
    every: u64,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Output frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Keep every n-th frame (the last frame is always kept).
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct InfoArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<RenderConfig> {
    let mut config = match &common.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if common.solid {
        config.rainbow = false;
    }
    if let Some(step) = common.step {
        config.step = step;
    }
    config.validate().context("invalid render options")?;
    Ok(config)
}

fn open_session(common: &CommonArgs) -> anyhow::Result<Session<CpuSurface>> {
    let config = load_config(common)?;
    let surface = CpuSurface::new(config.canvas)?;
    let mut session = Session::new(config, surface)?;
    let samples = session
        .load_file(&common.in_path)
        .with_context(|| format!("load path '{}'", common.in_path.display()))?;
    if samples == 0 {
        anyhow::bail!("'{}' contains no theta-rho samples", common.in_path.display());
    }
    Ok(session)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    match args.cursor {
        Some(cursor) => {
            session.draw_at(cursor);
        }
        None => session.set_full_view(true),
    }
    let frame = session.surface_mut().readback_rgba8()?;
    rhotrace::save_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = session.play(
        &mut sink,
        PlaybackOpts {
            every: args.every,
            ..PlaybackOpts::default()
        },
    )?;

    eprintln!(
        "wrote {} of {} frames to {}",
        stats.frames_pushed,
        stats.frames_drawn,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let background = session.config().background_color;
    let mut sink = FfmpegSink::new(
        FfmpegSinkOpts::new(&args.out)
            .with_background(background)
            .with_overwrite(!args.no_overwrite),
    );
    let stats = session
        .play(
            &mut sink,
            PlaybackOpts {
                every: args.every,
                fps: args.fps,
            },
        )
        .with_context(|| format!("encode '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_pushed
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let path = read_path(&args.common.in_path)?;

    println!("samples: {}", path.len());
    match path.rho_bounds() {
        Some((min, max)) => println!("rho: {min} .. {max}"),
        None => println!("rho: -"),
    }
    println!("step: {}", config.step);
    println!("frames: {}", path.frame_count(config.step));
    Ok(())
}

fn read_path(path: &Path) -> anyhow::Result<rhotrace::ThetaRhoPath> {
    rhotrace::read_path_file(path).with_context(|| format!("load path '{}'", path.display()))
}
