mod ui;

use code_runner::config::Settings;
use code_runner::core::constants::FRAME_MS;
use code_runner::core::Difficulty;
use code_runner::daily::today;
use code_runner::modes::GameMode;
use code_runner::session::{GameSession, NoopObserver};
use code_runner::storage::{FileStore, KeyValueStore, MemoryStore, ProgressRepository};
use code_runner::utils::{build_info, persistence};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "code_runner.log";
/// Longest wall-clock gap fed into the simulation at once.
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

struct CliOptions {
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    daily: bool,
}

fn print_help() {
    println!("Code Runner - Terminal Endless Runner\n");
    println!("Usage: code_runner [options]\n");
    println!("Options:");
    println!("  --mode <classic|sprint|debug|chaos>       Game mode");
    println!("  --difficulty <easy|normal|hard|expert>   Difficulty");
    println!("  --seed <n>                                Reproducible run");
    println!("  --no-daily                                Don't track today's challenge");
    println!("  --version                                 Show version information");
    println!("  --help                                    Show this help message");
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'code_runner --help' for usage.");
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        mode: None,
        difficulty: None,
        seed: None,
        daily: true,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--mode" | "-m" => {
                let value = iter.next().map(String::as_str).unwrap_or_default();
                options.mode = Some(
                    GameMode::parse(value)
                        .unwrap_or_else(|| fail(&format!("Unknown mode: {}", value))),
                );
            }
            "--difficulty" | "-d" => {
                let value = iter.next().map(String::as_str).unwrap_or_default();
                options.difficulty = Some(
                    Difficulty::parse(value)
                        .unwrap_or_else(|| fail(&format!("Unknown difficulty: {}", value))),
                );
            }
            "--seed" | "-s" => {
                let value = iter.next().map(String::as_str).unwrap_or_default();
                options.seed = Some(
                    value
                        .parse()
                        .unwrap_or_else(|_| fail(&format!("Invalid seed: {}", value))),
                );
            }
            "--no-daily" => options.daily = false,
            other => fail(&format!("Unknown option: {}", other)),
        }
    }
    options
}

/// Log to a file in the data directory so the TUI stays clean.
fn init_logging() {
    let Ok(path) = persistence::data_path(LOG_FILE) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn open_store() -> Box<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "Progress will not be saved this session");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    init_logging();

    let mut settings = Settings::load();
    if let Some(mode) = options.mode {
        settings.game_mode = mode;
    }
    if let Some(difficulty) = options.difficulty {
        settings.difficulty = difficulty;
    }
    let seed = options.seed.or(settings.seed);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let repository = ProgressRepository::new(open_store(), settings.user_id.clone());
    let mut session = GameSession::new(repository, &settings, rng, NoopObserver);
    if options.daily {
        session.activate_challenge(today());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    // Release events only arrive with the kitty keyboard protocol.
    let key_events = supports_keyboard_enhancement().unwrap_or(false);
    if key_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    if key_events {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    let best = session.repository().high_score(settings.game_mode);
    println!("Best {} score: {}", settings.game_mode.name(), best);
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Jump,
    Release,
    Start,
    TogglePause,
    Reset,
}

/// Auto-repeat is ignored so holding jump never fires the double jump.
fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    match key.kind {
        KeyEventKind::Repeat => None,
        KeyEventKind::Release => {
            matches!(key.code, KeyCode::Char(' ') | KeyCode::Up).then_some(KeyAction::Release)
        }
        KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyAction::Quit)
            }
            KeyCode::Char(' ') | KeyCode::Up => Some(KeyAction::Jump),
            // Terminals without release events use Down to cut a jump short.
            KeyCode::Down => Some(KeyAction::Release),
            KeyCode::Enter => Some(KeyAction::Start),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(KeyAction::TogglePause),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Reset),
            _ => None,
        },
    }
}

fn run<B, S>(
    terminal: &mut Terminal<B>,
    session: &mut GameSession<S, StdRng, NoopObserver>,
) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    S: KeyValueStore,
{
    let frame_duration = Duration::from_millis(FRAME_MS);
    let mut accumulator = Duration::ZERO;
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| {
            ui::render_runner_scene(frame, frame.size(), session.state(), session.challenge());
        })?;

        if event::poll(Duration::from_millis(4))? {
            if let Event::Key(key) = event::read()? {
                match key_action(&key) {
                    Some(KeyAction::Quit) => break,
                    Some(KeyAction::Jump) => session.jump(),
                    Some(KeyAction::Release) => session.release(),
                    Some(KeyAction::Start) => session.start(),
                    Some(KeyAction::TogglePause) => {
                        if session.state().is_playing() {
                            session.pause();
                        } else {
                            session.resume();
                        }
                    }
                    Some(KeyAction::Reset) => session.reset(),
                    None => {}
                }
            }
        }

        let now = Instant::now();
        accumulator += (now - last_frame).min(MAX_FRAME_GAP);
        last_frame = now;
        while accumulator >= frame_duration {
            session.tick();
            accumulator -= frame_duration;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_held_jump_does_not_repeat() {
        assert_eq!(
            key_action(&key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(KeyAction::Jump)
        );
        assert_eq!(key_action(&key(KeyCode::Char(' '), KeyEventKind::Repeat)), None);
        assert_eq!(key_action(&key(KeyCode::Up, KeyEventKind::Repeat)), None);
    }

    #[test]
    fn test_release_cuts_jump() {
        assert_eq!(
            key_action(&key(KeyCode::Char(' '), KeyEventKind::Release)),
            Some(KeyAction::Release)
        );
        assert_eq!(
            key_action(&key(KeyCode::Down, KeyEventKind::Press)),
            Some(KeyAction::Release)
        );
        assert_eq!(key_action(&key(KeyCode::Char('p'), KeyEventKind::Release)), None);
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(&ctrl_c), Some(KeyAction::Quit));
        assert_eq!(key_action(&key(KeyCode::Esc, KeyEventKind::Press)), Some(KeyAction::Quit));
        assert_eq!(key_action(&key(KeyCode::Char('c'), KeyEventKind::Press)), None);
    }
}
