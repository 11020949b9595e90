use std::path::PathBuf;

use anyhow::Context as _;
use circle_sweep::{FrameGenerator, FrameIndex, SweepConfig, SweepRange};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "circle-sweep", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame, then assemble them into an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG or JPEG.
    Frame(FrameArgs),
    /// Print the effective configuration as JSON.
    Config(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// JSON config file; unset fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First displacement of the sweep, in pixels.
    #[arg(long, allow_hyphen_values = true)]
    initial_x: Option<f64>,

    /// Last displacement of the sweep, in pixels.
    #[arg(long, allow_hyphen_values = true)]
    final_x: Option<f64>,

    /// Displacement increment per frame, in pixels.
    #[arg(long)]
    step: Option<f64>,

    /// Output frame rate (integer frames per second).
    #[arg(long)]
    fps: Option<u32>,

    /// Multiplier applied to the 1920x1080 design layout.
    #[arg(long)]
    scale: Option<f64>,

    /// Directory for the numbered frame files.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Skip the numeric labels; no font is needed.
    #[arg(long, default_value_t = false)]
    no_labels: bool,

    /// Font file for the labels instead of a system lookup.
    #[arg(long)]
    font: Option<PathBuf>,
}

impl SceneArgs {
    fn load(&self) -> anyhow::Result<SweepConfig> {
        let mut cfg = match &self.config {
            Some(path) => SweepConfig::from_path(path)?,
            None => SweepConfig::default(),
        };

        if self.initial_x.is_some() || self.final_x.is_some() || self.step.is_some() {
            cfg.range = SweepRange::new(
                self.initial_x.unwrap_or(cfg.range.initial_x),
                self.final_x.unwrap_or(cfg.range.final_x),
                self.step.unwrap_or(cfg.range.step),
            )?;
        }
        if let Some(fps) = self.fps {
            cfg.fps = circle_sweep::Fps::new(fps, 1)?;
        }
        if let Some(scale) = self.scale {
            cfg.scene.scale_factor = scale;
        }
        if let Some(dir) = &self.frames_dir {
            cfg.frames_dir = dir.clone();
        }
        if self.no_labels {
            cfg.scene.draw_labels = false;
        }
        if let Some(font) = &self.font {
            cfg.scene.font_path = Some(font.clone());
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Displacement to render, in pixels.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "index")]
    x: Option<f64>,

    /// Frame index within the configured sweep (0-based).
    #[arg(long)]
    index: Option<u64>,

    /// Output image path; the extension picks PNG or JPEG.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = args.scene.load()?;
    if let Some(out) = args.out {
        cfg.output = out;
    }
    if !circle_sweep::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg not found on PATH");
    }

    let report = circle_sweep::run(&cfg)?;
    eprintln!(
        "wrote {} ({} frames)",
        report.output.display(),
        report.frames_encoded
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.scene.load()?;
    let x = match (args.x, args.index) {
        (Some(x), _) => x,
        (None, Some(i)) => {
            let total = cfg.range.frame_count();
            if i >= total {
                anyhow::bail!("frame index {i} out of range (sweep has {total} frames)");
            }
            cfg.range.x_at(FrameIndex(i))
        }
        (None, None) => 0.0,
    };

    let mut generator = FrameGenerator::new(cfg.scene.clone())?;
    let frame = generator.render_at(x)?;
    let rgb = frame.to_rgb8(cfg.scene.background_color.rgb_bytes())?;

    let format = image::ImageFormat::from_path(&args.out)
        .with_context(|| format!("unknown image format for '{}'", args.out.display()))?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &rgb,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        format,
    )
    .with_context(|| format!("write image '{}'", args.out.display()))?;

    eprintln!("wrote {} (x = {x})", args.out.display());
    Ok(())
}

fn cmd_config(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = args.load()?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}
