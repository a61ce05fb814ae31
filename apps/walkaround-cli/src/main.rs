use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walkaround_common::WalkConfig;
use walkaround_input::{InputEvent, InputQueue};
use walkaround_locomotion::{FixedLook, Locomotion, LocomotionEvent, PlayerState};
use walkaround_scene::{DebugTextRenderer, RenderView, Renderer, RoomScene};

#[derive(Parser)]
#[command(name = "walkaround-cli", about = "Headless walkaround tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and derived movement constants
    Info,
    /// Print the room layout
    Scene,
    /// Run the locomotion update for a number of frames with scripted keys
    Simulate(SimulateArgs),
    /// Print the effective config, or write it to a file
    Config {
        /// Write to this path (.yaml, .yml or .json) instead of stdout
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of frames to run
    #[arg(short, long, default_value = "200")]
    frames: u64,
    /// Keys held for the whole run, e.g. `w,d` or `ArrowUp`
    #[arg(long, value_delimiter = ',')]
    hold: Vec<String>,
    /// Frames on which the jump key is tapped
    #[arg(long, value_delimiter = ',')]
    jump_at: Vec<u64>,
    /// Facing direction in degrees, 0 = -Z, 90 = +X
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    yaw: f32,
    /// Print every locomotion event as a JSON line
    #[arg(long)]
    json: bool,
}

/// Outcome of a scripted run.
struct SimulationReport {
    player: PlayerState,
    frames: u64,
    events: Vec<LocomotionEvent>,
}

impl SimulationReport {
    fn count(&self, pred: impl Fn(&LocomotionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

fn simulate(config: &WalkConfig, args: &SimulateArgs) -> SimulationReport {
    let mut locomotion = Locomotion::new(config);
    let look = FixedLook::from_yaw_degrees(args.yaw);
    let mut queue = InputQueue::new();
    let mut events = Vec::new();
    let jump_key = locomotion.bindings().jump_key().to_string();

    for key in &args.hold {
        queue.push(InputEvent::down(key));
    }

    for frame in 1..=args.frames {
        if args.jump_at.contains(&frame) {
            queue.push(InputEvent::down(&jump_key));
            queue.push(InputEvent::up(&jump_key));
        }
        locomotion.tick(&mut queue, &look);
        events.extend(locomotion.drain_events());
    }

    SimulationReport {
        player: *locomotion.player(),
        frames: locomotion.frame(),
        events,
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<WalkConfig> {
    match path {
        Some(path) => WalkConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(WalkConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("walkaround-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", walkaround_scene::crate_info());
            println!("boundary limit: {}", config.boundary_limit());
            println!("ground level: {}", config.player.ground_level);
            println!("move speed: {} per frame", config.player.move_speed);
            println!("jump velocity: {:.4} per frame", config.jump_velocity());
        }
        Commands::Scene => {
            let scene = RoomScene::build(&config.room);
            let view = RenderView {
                eye: glam::Vec3::new(0.0, config.player.ground_level, 0.0),
                fov_degrees: config.camera.fov_degrees,
                ..RenderView::default()
            };
            print!("{}", DebugTextRenderer::new().render(&scene, &view));
        }
        Commands::Simulate(args) => {
            tracing::info!(frames = args.frames, hold = ?args.hold, "simulating");
            let report = simulate(&config, &args);

            if args.json {
                for event in &report.events {
                    println!("{}", serde_json::to_string(event)?);
                }
            }

            let p = report.player.position;
            println!("frames: {}", report.frames);
            println!("position: ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z);
            println!(
                "vertical velocity: {:.4}, jumping: {}",
                report.player.vertical_velocity, report.player.jumping
            );
            println!(
                "moves: {}, rejected: {}, jumps: {}, landings: {}",
                report.count(|e| matches!(e, LocomotionEvent::Moved { .. })),
                report.count(|e| matches!(e, LocomotionEvent::MoveRejected { .. })),
                report.count(|e| matches!(e, LocomotionEvent::JumpStarted { .. })),
                report.count(|e| matches!(e, LocomotionEvent::Landed { .. })),
            );
        }
        Commands::Config { write } => match write {
            Some(path) => {
                config
                    .save(&path)
                    .with_context(|| format!("writing config {}", path.display()))?;
                tracing::info!("config written to {}", path.display());
            }
            None => print!("{}", config.to_yaml()?),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(frames: u64, hold: &[&str], jump_at: &[u64], yaw: f32) -> SimulateArgs {
        SimulateArgs {
            frames,
            hold: hold.iter().map(|k| k.to_string()).collect(),
            jump_at: jump_at.to_vec(),
            yaw,
            json: false,
        }
    }

    #[test]
    fn idle_run_stays_put() {
        let report = simulate(&WalkConfig::default(), &args(50, &[], &[], 0.0));
        assert_eq!(report.frames, 50);
        assert_eq!(report.player.position, glam::Vec3::new(0.0, 2.0, 0.0));
        assert!(report.events.is_empty());
    }

    #[test]
    fn walking_forward_stalls_at_back_wall() {
        let report = simulate(&WalkConfig::default(), &args(200, &["W"], &[], 0.0));
        let z = report.player.position.z;
        assert!(z >= -24.0 && z < -23.8);
        assert!(report.count(|e| matches!(e, LocomotionEvent::MoveRejected { .. })) >= 40);
    }

    #[test]
    fn scripted_jump_lands() {
        let report = simulate(&WalkConfig::default(), &args(100, &[], &[5], 0.0));
        assert_eq!(report.count(|e| matches!(e, LocomotionEvent::JumpStarted { .. })), 1);
        assert_eq!(report.count(|e| matches!(e, LocomotionEvent::Landed { .. })), 1);
        assert_eq!(report.player.position.y, 2.0);
    }

    #[test]
    fn scripted_jump_uses_configured_key() {
        let mut config = WalkConfig::default();
        config.keys.jump = vec!["j".to_string()];
        let report = simulate(&config, &args(10, &[], &[1], 0.0));
        assert_eq!(report.count(|e| matches!(e, LocomotionEvent::JumpStarted { .. })), 1);
        assert!(report.player.jumping);
    }

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "walkaround-cli",
            "simulate",
            "--frames",
            "10",
            "--hold",
            "w,d",
            "--jump-at",
            "1,4",
            "--yaw",
            "-45",
        ])
        .unwrap();
        let Commands::Simulate(a) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(a.frames, 10);
        assert_eq!(a.hold, vec!["w", "d"]);
        assert_eq!(a.jump_at, vec![1, 4]);
        assert_eq!(a.yaw, -45.0);
    }
}
