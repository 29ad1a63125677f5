use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use crossterm::cursor::Show;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use simplelog::WriteLogger;

use kbmirror::app::{self, App};
use kbmirror::config::Config;
use kbmirror::event::EventHandler;
use kbmirror::store::json_store::JsonStore;
use kbmirror::ui::theme::ThemeFlag;

#[derive(Parser)]
#[command(
    name = "kbmirror",
    version,
    about = "Virtual keyboard that mirrors your key presses"
)]
struct Cli {
    #[arg(short, long, help = "Apply and remember a theme (dark, light)")]
    theme: Option<ThemeFlag>,

    #[arg(long, help = "Milliseconds before a clicked key is released")]
    release_delay_ms: Option<u64>,

    #[arg(long, help = "Directory for persisted state and the log file")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {e:#}");
        Config::default()
    });
    if let Some(ms) = cli.release_delay_ms {
        config.release_delay_ms = ms;
    }

    let data_dir = cli.data_dir.unwrap_or_else(JsonStore::default_dir);
    init_logging(&config, &data_dir);

    let store = JsonStore::with_base_dir(data_dir).unwrap_or_else(|e| {
        log::warn!("storage unavailable, theme will not persist: {e:#}");
        JsonStore::in_memory()
    });

    let mut session = TerminalSession::default();
    let result = session.enter().and_then(|()| {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let mut app = App::new(config, store, session.keyboard_enhanced);
        if let Some(flag) = cli.theme {
            app.theme.apply(flag, &mut app.store);
        }

        let mut events = EventHandler::new(app.config.tick_rate());
        app::run(&mut terminal, &mut app, &mut events)
    });
    drop(session);

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Terminal modes turned on for the UI. Whatever was enabled is undone on
/// drop, including after a failed setup step.
#[derive(Default)]
struct TerminalSession {
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        self.raw_mode = true;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        self.alternate_screen = true;
        execute!(stdout, EnableMouseCapture)?;
        self.mouse_capture = true;

        // Key release events need the kitty keyboard protocol.
        self.keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .is_ok();
        log::info!("keyboard enhancement: {}", self.keyboard_enhanced);
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        // Reverse order of enabling.
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        if self.mouse_capture {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}

/// Log to a file; the terminal belongs to the UI. Failure leaves logging off.
fn init_logging(config: &Config, data_dir: &Path) {
    let result = fs::create_dir_all(data_dir)
        .and_then(|_| File::create(data_dir.join("kbmirror.log")))
        .map_err(anyhow::Error::from)
        .and_then(|file| {
            WriteLogger::init(
                config.log_level_filter(),
                simplelog::Config::default(),
                file,
            )
            .map_err(anyhow::Error::from)
        });
    if let Err(e) = result {
        eprintln!("Logging disabled: {e:#}");
    }
}
