#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Masquerade session without a window.

mod headless;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use masquerade_core::{config::GameConfig, Event, WELCOME_BANNER};
use masquerade_rendering::{Color, Presentation, RenderingBackend, Scene};
use masquerade_system_simulation::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use headless::HeadlessBackend;

/// Size of the virtual window scenes are captured for.
const VIEWPORT: Vec2 = Vec2::new(640.0, 480.0);

#[derive(Debug, Parser)]
#[command(author, version, about = "Hunt the monster hiding in the crowd", long_about = None)]
struct Args {
    /// TOML file overriding the built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of host ticks to run before giving up.
    #[arg(short, long, default_value_t = 3_600)]
    ticks: u32,

    /// Host clock advance per tick, in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Replaces the configured crowd seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Prints the effective configuration as TOML and exits.
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

/// Tallies gathered from the event stream.
#[derive(Debug, Default)]
struct Tally {
    frames: u64,
    presented: u64,
    retargets: u64,
    swings: u64,
    hits: u64,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::NpcRetargeted { .. } => self.retargets += 1,
                Event::AttackStarted => self.swings += 1,
                Event::EntityDamaged { .. } => self.hits += 1,
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.session.seed = seed;
    }

    if args.print_config {
        let rendered = toml::to_string(&config).context("failed to render configuration")?;
        print!("{rendered}");
        return Ok(());
    }

    init_logging();
    println!("{WELCOME_BANNER}");

    let mut simulation = Simulation::new(&config).context("failed to set up the session")?;
    let mut tally = Tally::default();
    let mut events = Vec::new();

    let presentation = Presentation::new(
        "Masquerade",
        Color::from_rgb_u8(24, 24, 32),
        VIEWPORT,
    );
    let backend = HeadlessBackend::new(args.ticks, Duration::from_millis(args.step_ms));
    backend.run(presentation, |now, input| {
        events.clear();
        let Some(frame) = simulation.tick(&input, now, &mut events) else {
            return Some(Scene::capture(&simulation, VIEWPORT));
        };
        tally.frames += 1;
        if frame.present() {
            tally.presented += 1;
        }
        tally.record(&events);

        let scene = Scene::capture(&simulation, VIEWPORT);
        let decided = events
            .iter()
            .any(|event| matches!(event, Event::OutcomeDecided { .. }));
        (!decided).then_some(scene)
    })?;

    info!(
        outcome = ?simulation.outcome(),
        frames = tally.frames,
        presented = tally.presented,
        retargets = tally.retargets,
        swings = tally.swings,
        hits = tally.hits,
        countdown_ms = simulation.countdown().as_millis() as u64,
        "session finished"
    );
    println!("outcome: {:?}", simulation.outcome());
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GameConfig = toml::from_str(&source)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
