use clap::{ArgAction, Args, Parser, Subcommand};
use deskplan::core::Viewport;
use deskplan::image_io::{self, ImageIoError};
use deskplan::services::{Intent, PromptClassifier, PromptDetector, StaticBackend};
use deskplan::{
    rectify_photo, ConfigError, DeskPhoto, PlanError, PlanOutcome, PlanRequest, Planner,
    PlannerConfig,
};
use nalgebra::Point2;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    ImageIo(#[from] ImageIoError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no items detected; rectified canvas written to {}", .0.display())]
    NoItems(PathBuf),
}

#[derive(Parser, Debug)]
#[command(
    name = "deskplan",
    version,
    about = "Rectify a desk photo, split it into zones and draw where every item should go"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Planner configuration JSON; missing fields use defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON log lines through tracing
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the zone layout of a canvas size as JSON
    Zones(ZonesArgs),
    /// Crop to the viewport and rectify the tapped desk quad
    Rectify(RectifyArgs),
    /// Run the full planning pipeline on recorded service replies
    Plan(PlanArgs),
    /// Print the effective configuration as JSON
    #[command(name = "print-config")]
    PrintConfig,
}

#[derive(Args, Debug)]
struct ZonesArgs {
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
}

#[derive(Args, Debug)]
struct PhotoArgs {
    /// Desk photo
    #[arg(long)]
    image: PathBuf,
    /// Size of the viewport the taps were made on, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport)]
    viewport: Viewport,
    /// Four taps in viewport coordinates, as "x,y;x,y;x,y;x,y"
    #[arg(long, value_parser = parse_corners, allow_hyphen_values = true)]
    corners: Corners4,
}

#[derive(Args, Debug)]
struct RectifyArgs {
    #[command(flatten)]
    photo: PhotoArgs,
    /// Where to write the rectified canvas
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    photo: PhotoArgs,
    /// File holding a raw detection reply; absent means the detector is offline
    #[arg(long)]
    detections: Option<PathBuf>,
    /// File holding a raw classification reply; absent means the classifier is offline
    #[arg(long)]
    assignment: Option<PathBuf>,
    /// work, art, leisure, or any other label
    #[arg(long, default_value = "custom")]
    intent: String,
    /// Where to write the annotated canvas
    #[arg(long)]
    out: PathBuf,
    /// Write the plan report JSON here instead of stdout
    #[arg(long)]
    report: Option<PathBuf>,
}

type Corners4 = [Point2<f32>; 4];

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if !(w > 0.0 && h > 0.0) {
        return Err(format!("viewport must be positive, got {s:?}"));
    }
    Ok(Viewport::new(w, h))
}

fn parse_corners(s: &str) -> Result<Corners4, String> {
    let pts = s
        .split(';')
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| format!("expected x,y, got {pair:?}"))?;
            let x: f32 = x.trim().parse().map_err(|e| format!("x in {pair:?}: {e}"))?;
            let y: f32 = y.trim().parse().map_err(|e| format!("y in {pair:?}: {e}"))?;
            Ok(Point2::new(x, y))
        })
        .collect::<Result<Vec<_>, String>>()?;
    <Corners4>::try_from(pts).map_err(|v| format!("expected 4 corners, got {}", v.len()))
}

fn read_reply(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn replay_backend(path: Option<&Path>, service: &str) -> Result<StaticBackend, CliError> {
    Ok(match path {
        Some(p) => StaticBackend::new(read_reply(p)?),
        None => StaticBackend::failing(format!("no recorded {service} reply")),
    })
}

fn init_logging(cli: &Cli) {
    let level = deskplan::core::level_from_verbosity(cli.verbose);
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        deskplan::core::init_tracing(level, cli.log_json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = deskplan::core::init_with_level(level);
    }
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig, CliError> {
    Ok(match path {
        Some(p) => PlannerConfig::load_json(p)?,
        None => PlannerConfig::default(),
    })
}

fn command_zones(cfg: &PlannerConfig, args: ZonesArgs) -> Result<(), CliError> {
    let layout = cfg.zones.layout(args.width, args.height);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn command_rectify(cfg: &PlannerConfig, args: RectifyArgs) -> Result<(), CliError> {
    let img = image_io::load_rgb(&args.photo.image)?;
    let photo = DeskPhoto {
        image: img.view(),
        viewport: args.photo.viewport,
        taps: args.photo.corners,
    };
    let rect = rectify_photo(&photo, cfg)?;
    image_io::save_rgb(&rect.canvas, &args.out)?;
    let summary = json!({
        "width": rect.canvas.width,
        "height": rect.canvas.height,
        "degenerate": rect.is_degenerate(),
        "corners": rect.corners,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn command_plan(cfg: &PlannerConfig, args: PlanArgs) -> Result<(), CliError> {
    let img = image_io::load_rgb(&args.photo.image)?;
    let detector = PromptDetector::new(replay_backend(args.detections.as_deref(), "detection")?)
        .with_jpeg_quality(cfg.jpeg_quality);
    let classifier =
        PromptClassifier::new(replay_backend(args.assignment.as_deref(), "classification")?);
    let planner = Planner::new(detector, classifier, cfg.clone());

    let outcome = planner.plan(PlanRequest {
        photo: DeskPhoto {
            image: img.view(),
            viewport: args.photo.viewport,
            taps: args.photo.corners,
        },
        intent: Intent::parse(&args.intent),
    })?;

    match outcome {
        PlanOutcome::NoItemsDetected { canvas } => {
            image_io::save_rgb(&canvas, &args.out)?;
            Err(CliError::NoItems(args.out))
        }
        PlanOutcome::Planned(plan) => {
            image_io::save_rgb(&plan.annotated, &args.out)?;
            let report = serde_json::to_string_pretty(&plan.report())?;
            match args.report {
                Some(path) => fs::write(path, report)?,
                None => println!("{report}"),
            }
            Ok(())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(&cli);
    let cfg = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Zones(args) => command_zones(&cfg, args),
        Commands::Rectify(args) => command_rectify(&cfg, args),
        Commands::Plan(args) => command_plan(&cfg, args),
        Commands::PrintConfig => {
            println!("{}", serde_json::to_string_pretty(&cfg)?);
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
