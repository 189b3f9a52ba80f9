//! Flappy Shrimp terminal host.

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_shrimp::core::constants::REFERENCE_FRAME_MS;
use flappy_shrimp::core::{CollisionStrategy, Driver, GameConfig, GameSession, Result, Vec2};
use flappy_shrimp::host::NullAudio;
use flappy_shrimp::input::{map_key, HostCommand};
use flappy_shrimp::ui::{self, TerminalScene};
use flappy_shrimp::utils::build_info;
use flappy_shrimp::utils::logging;
use flappy_shrimp::utils::persistence::{self, JsonScoreStore};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

struct HostArgs {
    seed: Option<u64>,
    strategy: Option<CollisionStrategy>,
}

fn parse_args() -> HostArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut host = HostArgs {
        seed: None,
        strategy: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                host.seed = Some(parse_or_exit(args.get(i), "--seed requires a number"));
            }
            "--strategy" => {
                i += 1;
                let value = args.get(i).map(String::as_str).unwrap_or("");
                match CollisionStrategy::parse(value) {
                    Some(s) => host.strategy = Some(s),
                    None => {
                        eprintln!("--strategy must be 'mask' or 'bbox'");
                        std::process::exit(1);
                    }
                }
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'flappy-shrimp --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    host
}

fn parse_or_exit<T: std::str::FromStr>(value: Option<&String>, message: &str) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Flappy Shrimp - terminal flappy game\n");
    println!("Usage: flappy-shrimp [OPTIONS]\n");
    println!("Options:");
    println!("  --seed N            Seed the pipe generator");
    println!("  --strategy mask|bbox  Collision test (default: mask)");
    println!("  --version           Show version information");
    println!("  --help              Show this help message\n");
    println!("Keys: Space/Enter/Up flap, R restart, Q/Esc quit");
    println!("Tuning: ~/.flappy-shrimp/config.json");
}

fn main() -> Result<()> {
    let args = parse_args();

    if let Err(e) = logging::init_file_logging() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let mut config: GameConfig = persistence::load_config();
    if let Some(strategy) = args.strategy {
        config.collision = strategy;
    }
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(seed, strategy = config.collision.name(), "starting");

    let session = GameSession::new(config.clone())?;
    let sprite_size = Vec2::new(
        session.player.mask.width() as f64,
        session.player.mask.height() as f64,
    );
    let scene = TerminalScene::new(&config, sprite_size);
    let store = JsonScoreStore::open_default()?;
    let mut driver = Driver::new(
        session,
        scene,
        NullAudio,
        store,
        ChaCha8Rng::seed_from_u64(seed),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut driver);
    driver.shutdown();

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(high_score = driver.session.high_score(), "exiting");
    outcome
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    driver: &mut Driver<TerminalScene, NullAudio, JsonScoreStore, ChaCha8Rng>,
) -> Result<()> {
    let frame_budget = Duration::from_millis(REFERENCE_FRAME_MS);
    let mut last = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &driver.renderer))?;

        let wait = frame_budget.saturating_sub(last.elapsed());
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(HostCommand::Quit) => return Ok(()),
                    Some(HostCommand::Game(input)) => {
                        driver.input(input);
                    }
                    None => {}
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;
        driver.frame(dt);
    }
}
