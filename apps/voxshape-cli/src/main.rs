use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;
use voxshape_capture::{Classifier, HttpClassifier, KeywordClassifier, ScriptedCapture};
use voxshape_kernel::SimulationLoop;
use voxshape_render::{DebugTextRenderer, RecordingSurface, SceneRenderer};
use voxshape_shapes::ShapeRegistry;
use voxshape_stage::{Stage, StageConfig};

#[derive(Parser)]
#[command(name = "voxshape-cli", about = "Spoken shape requests on a headless canvas")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the registered shape names
    Shapes,
    /// Classify one utterance and print the shape request as JSON
    Classify {
        text: String,
        /// Use the keyword classifier instead of the HTTP endpoint
        #[arg(long)]
        offline: bool,
    },
    /// Feed utterances through capture and run the stage headless
    Run {
        /// Utterances, one per capture session
        utterances: Vec<String>,
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// RNG seed for placement and colors
        #[arg(short, long)]
        seed: Option<u64>,
        /// Use the keyword classifier instead of the HTTP endpoint
        #[arg(long)]
        offline: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut config = match &cli.config {
        Some(path) => StageConfig::load(path)?,
        None => StageConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("voxshape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("shapes: {}", voxshape_shapes::crate_info());
            println!("kernel: tick={}", SimulationLoop::new().tick());
            println!("capture: {}", voxshape_capture::crate_info());
            println!("render: {}", voxshape_render::crate_info());
            println!("stage: {}", voxshape_stage::crate_info());
        }
        Commands::Shapes => {
            for name in ShapeRegistry::with_builtins().list_names() {
                println!("{name}");
            }
        }
        Commands::Classify { text, offline } => {
            let shapes = ShapeRegistry::with_builtins().list_names();
            let request = if offline {
                KeywordClassifier::new(shapes).classify_now(&text)?
            } else {
                let classifier = HttpClassifier::from_config(&config.classifier, &shapes)?;
                runtime()?.block_on(classifier.classify(&text))?
            };
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Commands::Run {
            utterances,
            frames,
            seed,
            offline,
        } => {
            if seed.is_some() {
                config.spawn.seed = seed;
            }
            run(config, utterances, frames, offline)?;
        }
    }

    Ok(())
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn run(
    config: StageConfig,
    utterances: Vec<String>,
    frames: u64,
    offline: bool,
) -> anyhow::Result<()> {
    println!(
        "Running {frames} frames at {} fps on a {:.0}x{:.0} canvas",
        config.frame_rate, config.canvas.width, config.canvas.height
    );
    let canvas = config.canvas;
    let mut stage = Stage::new(config, ShapeRegistry::with_builtins());
    let mut surface = RecordingSurface::new(canvas);

    let local = LocalSet::new();
    let report = local.block_on(&runtime()?, async {
        let shapes = stage.registry().list_names();
        let attached = if offline {
            attach(&mut stage, utterances, KeywordClassifier::new(shapes));
            true
        } else {
            match HttpClassifier::from_config(&stage.config().classifier, &shapes) {
                Ok(classifier) => {
                    attach(&mut stage, utterances, classifier);
                    true
                }
                Err(err) => {
                    tracing::error!(error = %err, "capture unavailable; running without it");
                    false
                }
            }
        };
        if attached {
            if let Err(err) = stage.toggle_capture() {
                tracing::error!(error = %err, "could not start capture");
            }
        }
        stage.run(&mut surface, frames).await
    });

    println!(
        "Spawned {}, rejected {}, {} draw commands in total, {} in the last frame",
        report.spawned,
        report.rejected,
        surface.total_commands(),
        surface.commands().len()
    );
    print!("{}", DebugTextRenderer::new().render(stage.simulation(), canvas));
    Ok(())
}

/// Wire scripted capture to `classifier`. Must run inside the `LocalSet`.
fn attach<C>(stage: &mut Stage, utterances: Vec<String>, classifier: C)
where
    C: Classifier + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let source = ScriptedCapture::new(utterances, events_tx);
    stage.attach_capture(Box::new(source), events_rx, classifier);
}
