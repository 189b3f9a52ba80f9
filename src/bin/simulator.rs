//! Flappy Shrimp Headless Simulator
//!
//! Flies an autopilot through the real `Driver` with in-memory collaborators
//! and reports score and death statistics. Useful for tuning gap size,
//! gravity and spawn period without a terminal.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --seed N        RNG seed (default: 42)
//!   --frames N      Frames per run (default: 36000 = 10 minutes at 60 fps)
//!   --fps F         Host frame rate (default: 60)
//!   --jitter        Vary frame time by +/-50%
//!   --strategy S    mask | bbox (default: mask)
//!   --quiet         Only the summary

use flappy_shrimp::core::{
    CollisionStrategy, DeathCause, Driver, GameConfig, GameInput, GamePhase, GameSession,
    TickEvent,
};
use flappy_shrimp::host::{Cue, CueLog, HeadlessRenderer, MemoryScoreStore};
use flappy_shrimp::utils::logging;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    runs: u32,
    seed: u64,
    frames: u64,
    fps: f64,
    jitter: bool,
    strategy: CollisionStrategy,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 1,
            seed: 42,
            frames: 36_000,
            fps: 60.0,
            jitter: false,
            strategy: CollisionStrategy::PixelMask,
            quiet: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.runs = number(args.get(i), "--runs");
            }
            "--seed" => {
                i += 1;
                config.seed = number(args.get(i), "--seed");
            }
            "--frames" => {
                i += 1;
                config.frames = number(args.get(i), "--frames");
            }
            "--fps" => {
                i += 1;
                config.fps = number(args.get(i), "--fps");
                if !(config.fps > 0.0) {
                    eprintln!("--fps must be positive");
                    std::process::exit(1);
                }
            }
            "--jitter" => config.jitter = true,
            "--strategy" => {
                i += 1;
                match args.get(i).and_then(|s| CollisionStrategy::parse(s)) {
                    Some(s) => config.strategy = s,
                    None => {
                        eprintln!("--strategy must be 'mask' or 'bbox'");
                        std::process::exit(1);
                    }
                }
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn number<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("{flag} requires a number");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Flappy Shrimp Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --frames N      Frames per run (default: 36000)\n\
         \x20 --fps F         Host frame rate (default: 60)\n\
         \x20 --jitter        Vary frame time by +/-50%\n\
         \x20 --strategy S    mask | bbox (default: mask)\n\
         \x20 --quiet         Only the summary\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct SimStats {
    frames: u64,
    sim_seconds: f64,
    lives: u64,
    obstacle_deaths: u64,
    floor_deaths: u64,
    flaps: u64,
    pipes_spawned: u64,
    pipes_retired: u64,
    goals: u64,
    life_scores: Vec<u32>,
    high_score: u32,
    store_writes: usize,
    score_cues: usize,
}

impl SimStats {
    fn process_tick(&mut self, events: &[TickEvent]) {
        for event in events {
            match event {
                TickEvent::Started => self.lives += 1,
                TickEvent::Spawned { .. } => self.pipes_spawned += 1,
                TickEvent::Retired { .. } => self.pipes_retired += 1,
                TickEvent::GoalReached { .. } => self.goals += 1,
                TickEvent::Died { cause, score } => {
                    match cause {
                        DeathCause::Obstacle(_) => self.obstacle_deaths += 1,
                        DeathCause::Floor => self.floor_deaths += 1,
                    }
                    self.life_scores.push(*score);
                }
                _ => {}
            }
        }
    }

    fn best_life(&self) -> u32 {
        self.life_scores.iter().copied().max().unwrap_or(0)
    }

    fn mean_life(&self) -> f64 {
        if self.life_scores.is_empty() {
            0.0
        } else {
            self.life_scores.iter().map(|s| *s as f64).sum::<f64>() / self.life_scores.len() as f64
        }
    }
}

// ── Autopilot ────────────────────────────────────────────────────────

/// Frames to sit on the game-over screen before tapping again.
const RESTART_DELAY_FRAMES: u64 = 30;

/// Flap when falling below the next gap's centre.
fn autopilot(session: &GameSession) -> Option<GameInput> {
    match session.phase {
        GamePhase::Idle => return Some(GameInput::Tap),
        GamePhase::Dead => return None,
        GamePhase::Flying => {}
    }
    let player = &session.player;
    let target = session
        .pipes
        .iter()
        .filter(|p| p.trailing_edge() > player.display_bounds().min_x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|p| p.gap_center + session.config.gap_height * 0.15)
        .unwrap_or(session.config.world_height * 0.5);

    if player.position.y > target && player.velocity_y >= 0.0 {
        Some(GameInput::Flap)
    } else {
        None
    }
}

// ── Core Simulation Loop ─────────────────────────────────────────────

fn run_simulation(config: &SimConfig, seed: u64) -> SimStats {
    let game_config = GameConfig {
        collision: config.strategy,
        ..GameConfig::default()
    };
    let session = match GameSession::new(game_config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    let mut driver = Driver::new(
        session,
        HeadlessRenderer::default(),
        CueLog::default(),
        MemoryScoreStore::default(),
        ChaCha8Rng::seed_from_u64(seed),
    );
    let mut frame_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let base_dt = 1.0 / config.fps;

    let mut stats = SimStats::default();
    let mut dead_frames = 0;

    for _ in 0..config.frames {
        let input = if driver.session.phase == GamePhase::Dead {
            dead_frames += 1;
            (dead_frames >= RESTART_DELAY_FRAMES).then_some(GameInput::Tap)
        } else {
            dead_frames = 0;
            autopilot(&driver.session)
        };
        if let Some(input) = input {
            if let Some(event) = driver.input(input) {
                if event == TickEvent::Flapped {
                    stats.flaps += 1;
                }
                stats.process_tick(std::slice::from_ref(&event));
            }
        }

        let dt = if config.jitter {
            base_dt * frame_rng.gen_range(0.5..=1.5)
        } else {
            base_dt
        };
        let result = driver.frame(dt);
        stats.process_tick(&result.events);
        stats.frames += 1;
        stats.sim_seconds += dt;
    }

    stats.high_score = driver.session.high_score();
    stats.store_writes = driver.store.writes;
    stats.score_cues = driver.audio.count(Cue::Score);
    stats
}

// ── Reporting ────────────────────────────────────────────────────────

fn print_summary(stats: &SimStats, seed: u64, config: &SimConfig) {
    println!("============================================================");
    println!("  Flappy Shrimp Simulation Report  (seed={seed})");
    println!("============================================================");
    println!();
    println!(
        "Duration: {} frames ({:.1}s simulated, {} fps{})",
        stats.frames,
        stats.sim_seconds,
        config.fps,
        if config.jitter { ", jittered" } else { "" }
    );
    println!("Collision: {}", config.strategy.name());
    println!();
    println!("--- Lives ---");
    println!("Lives started: {}", stats.lives);
    println!(
        "Deaths: {} (pipes: {}, floor: {})",
        stats.obstacle_deaths + stats.floor_deaths,
        stats.obstacle_deaths,
        stats.floor_deaths
    );
    println!("Flaps: {}", stats.flaps);
    println!();
    println!("--- Scoring ---");
    println!("Best life: {}", stats.best_life());
    println!("Mean life: {:.2}", stats.mean_life());
    println!("Goals reached: {}", stats.goals);
    println!("High score: {} ({} writes)", stats.high_score, stats.store_writes);
    println!();
    println!("--- Pipes ---");
    println!(
        "Spawned: {}  Retired: {}  Scored: {}",
        stats.pipes_spawned, stats.pipes_retired, stats.score_cues
    );
    println!();
}

fn print_multi_run_summary(all_stats: &[SimStats]) {
    let n = all_stats.len() as f64;
    println!("============================================================");
    println!("  Aggregate Results ({} runs)", all_stats.len());
    println!("============================================================");
    println!();

    let avg = |vals: &[u64]| -> f64 { vals.iter().sum::<u64>() as f64 / n };
    let min_max = |vals: &[u64]| -> (u64, u64) {
        (
            *vals.iter().min().unwrap_or(&0),
            *vals.iter().max().unwrap_or(&0),
        )
    };

    let rows: [(&str, Vec<u64>); 5] = [
        ("Best Life", all_stats.iter().map(|s| s.best_life() as u64).collect()),
        ("Lives", all_stats.iter().map(|s| s.lives).collect()),
        ("Pipe Deaths", all_stats.iter().map(|s| s.obstacle_deaths).collect()),
        ("Floor Deaths", all_stats.iter().map(|s| s.floor_deaths).collect()),
        ("Goals", all_stats.iter().map(|s| s.goals).collect()),
    ];

    println!("{:<20} {:>10} {:>10} {:>10}", "Metric", "Min", "Avg", "Max");
    println!("{}", "-".repeat(52));
    for (label, vals) in &rows {
        let (lo, hi) = min_max(vals);
        println!("{:<20} {:>10} {:>10.1} {:>10}", label, lo, avg(vals), hi);
    }
    println!();
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() {
    let config = parse_args();
    logging::init_stderr_logging(config.quiet);

    if !config.quiet {
        eprintln!(
            "Flappy Shrimp Simulator: {} frames x {} run(s), seed={}, fps={}, strategy={}",
            config.frames,
            config.runs,
            config.seed,
            config.fps,
            config.strategy.name(),
        );
    }

    let mut all_stats = Vec::with_capacity(config.runs as usize);

    for run in 0..config.runs {
        let seed = config.seed + run as u64;

        if !config.quiet && config.runs > 1 {
            eprintln!("--- Run {}/{} (seed={seed}) ---", run + 1, config.runs);
        }

        let stats = run_simulation(&config, seed);

        if config.runs == 1 {
            print_summary(&stats, seed, &config);
        } else if !config.quiet {
            println!(
                "  Run {}: best={} mean={:.2} lives={} pipe_deaths={} floor_deaths={}",
                run + 1,
                stats.best_life(),
                stats.mean_life(),
                stats.lives,
                stats.obstacle_deaths,
                stats.floor_deaths,
            );
        }

        all_stats.push(stats);
    }

    if config.runs > 1 {
        println!();
        print_multi_run_summary(&all_stats);
    }
}
