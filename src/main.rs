//! vrpong - headless runner for the in-scene mode menu
//!
//! Replays a scripted camera path against the HUD at a fixed tick rate and
//! reports every preset change, optionally writing them to a JSONL log.

mod scripted_rays;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use scripted_rays::{Aim, ScriptedRayPlayer};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};
use vrpong_core::{EventBus, SimTick};
use vrpong_testkit::{EventRecord, JsonlSink};
use vrpong_ui3d::{FixedAdvance, FontMetrics, GlyphMeasure, Hud, HudConfig};

const DEFAULT_SCRIPT: &str = include_str!("../scripts/pick_ping_pong.json");

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless runner for the vrpong mode menu", long_about = None)]
struct Args {
    /// HUD configuration file (TOML)
    #[arg(long, default_value = vrpong_ui3d::config::DEFAULT_HUD_CONFIG_PATH)]
    config: PathBuf,

    /// Scripted camera path (JSON); a built-in path is used when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of frames to simulate (default: script length)
    #[arg(long)]
    ticks: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Start a countdown from this value once a preset is committed
    #[arg(long)]
    countdown: Option<u32>,

    /// Write preset changes as newline-delimited JSON
    #[arg(long)]
    event_log: Option<PathBuf>,
}

/// Counts the overlay down once per second.
struct CountdownTimer {
    remaining: u32,
    until_next: f32,
}

impl CountdownTimer {
    fn start(hud: &mut Hud, from: u32) -> Self {
        hud.show_countdown(&from.to_string());
        Self {
            remaining: from,
            until_next: 1.0,
        }
    }

    /// Returns false once the countdown has finished and the overlay is hidden.
    fn tick(&mut self, hud: &mut Hud, dt: f32) -> bool {
        self.until_next -= dt;
        if self.until_next > 0.0 {
            return true;
        }
        self.until_next += 1.0;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            hud.hide_countdown();
            info!("countdown finished");
            false
        } else {
            hud.set_countdown(&self.remaining.to_string());
            true
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting vrpong HUD runner v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    if args.tick_rate == 0 {
        anyhow::bail!("--tick-rate must be positive");
    }
    let config = HudConfig::load_from_path(&args.config);
    let measure = load_measure(&config);

    let mut player = match &args.script {
        Some(path) => ScriptedRayPlayer::from_path(path)
            .with_context(|| format!("failed to load ray script {}", path.display()))?,
        None => ScriptedRayPlayer::from_json(DEFAULT_SCRIPT)?,
    };

    let mut event_log = match &args.event_log {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => None,
    };

    let bus = Rc::new(EventBus::new());
    let events = bus.subscribe();
    let mut hud = Hud::new(config, bus);
    hud.setup(measure);

    let dt = 1.0 / args.tick_rate as f32;
    let ticks = args
        .ticks
        .unwrap_or_else(|| (player.total_duration() * args.tick_rate as f32).ceil() as u64);
    let camera = Vec3::from(hud.config().camera_position);

    let mut tick = SimTick::ZERO;
    let mut countdown: Option<CountdownTimer> = None;
    let mut changes = 0usize;

    for _ in 0..ticks {
        tick = tick.advance(1);

        let target = match player.advance(dt) {
            Some(Aim::Preset(preset)) => hud.button_center(preset),
            Some(Aim::Point(point)) => Some(Vec3::from(point)),
            None => None,
        };
        // Looking straight up misses the menu.
        let ray = hud.ray_towards(target.unwrap_or(camera + Vec3::Y));
        hud.camera_ray_updated(&ray);
        hud.tick(dt);

        for event in events.try_iter() {
            changes += 1;
            info!(tick = tick.0, preset = event.payload(), "preset changed");
            if let Some(log) = event_log.as_mut() {
                log.write(&EventRecord::from_event(tick, &event))?;
            }
            if let Some(from) = args.countdown {
                countdown = Some(CountdownTimer::start(&mut hud, from));
            }
        }

        if let Some(timer) = countdown.as_mut() {
            if !timer.tick(&mut hud, dt) {
                countdown = None;
            }
        }
    }

    match hud.selected_preset() {
        Some(preset) => println!("selected {preset} after {} ticks ({changes} change(s))", tick.0),
        None => println!("no preset selected after {} ticks", tick.0),
    }
    Ok(())
}

fn load_measure(config: &HudConfig) -> Box<dyn GlyphMeasure> {
    match &config.font_path {
        Some(path) => match FontMetrics::from_file(path) {
            Ok(metrics) => Box::new(metrics),
            Err(err) => {
                warn!("{err:#}. Falling back to fixed-width glyph metrics");
                Box::new(FixedAdvance::default())
            }
        },
        None => Box::new(FixedAdvance::default()),
    }
}
