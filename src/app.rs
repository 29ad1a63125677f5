use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::{Position, Rect};

use crate::config::Config;
use crate::engine::KeyboardState;
use crate::engine::simulator::ClickSimulator;
use crate::event::{AppEvent, EventSource};
use crate::keyboard::code::KeyInput;
use crate::keyboard::layout::KeyboardLayout;
use crate::store::json_store::JsonStore;
use crate::ui::components::keyboard_view::KeyboardGeometry;
use crate::ui::layout::AppLayout;
use crate::ui::screen;
use crate::ui::theme::ThemeManager;

pub struct App {
    pub config: Config,
    pub keyboard: KeyboardState,
    pub simulator: ClickSimulator,
    pub theme: ThemeManager,
    pub store: JsonStore,
    /// Terminal area of the last drawn frame; mouse hit-testing uses it.
    pub viewport: Rect,
    pub should_quit: bool,
    /// Whether the terminal reports key releases. When it does not, releases
    /// are synthesized after `release_fallback_ms`.
    release_events: bool,
}

impl App {
    pub fn new(config: Config, mut store: JsonStore, release_events: bool) -> Self {
        let theme = ThemeManager::load(&mut store);
        let keyboard = KeyboardState::new(KeyboardLayout::ansi(), &config.suppressed_keys);
        let simulator = ClickSimulator::new(config.release_delay());
        Self {
            config,
            keyboard,
            simulator,
            theme,
            store,
            viewport: Rect::default(),
            should_quit: false,
            release_events,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::new(self.viewport, &self.keyboard.layout)
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
            AppEvent::Resize(w, h) => self.viewport = Rect::new(0, 0, w, h),
            AppEvent::Tick => {}
        }
        // Ticks only arrive while input is idle, so releases are also
        // delivered after every other event.
        self.on_tick(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(input) = KeyInput::from_crossterm(&key) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let outcome = self.keyboard.key_down(&input);
                if !self.release_events {
                    self.simulator
                        .reschedule_release(input.clone(), now + self.config.release_fallback());
                }
                if outcome.default_prevented {
                    log::debug!("suppressed default handling for {}", input.code);
                } else if key.kind == KeyEventKind::Press {
                    self.run_binding(&input);
                }
            }
            KeyEventKind::Release => self.keyboard.key_up(&input),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let layout = self.layout();
        let geometry = KeyboardGeometry::for_area(&self.keyboard.layout, layout.keyboard);
        let over = geometry.key_at(mouse.column, mouse.row).copied();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let pos = Position::new(mouse.column, mouse.row);
                if layout.theme_toggle.contains(pos) {
                    self.toggle_theme();
                } else if let Some(key) = over {
                    let input = self.simulator.press(&key, now);
                    self.keyboard.key_down(&input);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(code) = self.simulator.pointer_up() {
                    self.keyboard.highlighter.set_active(code, false);
                }
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                if let Some(code) = self.simulator.pointer_moved(over.map(|k| k.code)) {
                    self.keyboard.highlighter.set_active(code, false);
                }
            }
            _ => {}
        }
    }

    /// Deliver the delayed key-ups that are due.
    pub fn on_tick(&mut self, now: Instant) {
        for input in self.simulator.take_due(now) {
            self.keyboard.key_up(&input);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle(&mut self.store);
    }

    /// Start over as if freshly launched: counts, held keys and highlights
    /// are dropped and the theme is read back from storage.
    pub fn reload(&mut self) {
        self.keyboard.reset();
        self.simulator.detach();
        self.theme.reload(&mut self.store);
        log::info!("reloaded");
    }

    fn run_binding(&mut self, input: &KeyInput) {
        match input.code.as_str() {
            "KeyC" if input.ctrl => self.should_quit = true,
            "F2" => self.toggle_theme(),
            "F5" => self.reload(),
            _ => {}
        }
    }
}

/// Draw, wait for an event, apply it; until quit or the source runs dry.
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut impl EventSource,
) -> Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    loop {
        let completed = terminal.draw(|frame| screen::render(frame, app))?;
        app.viewport = completed.area;

        let Some(event) = events.next_event()? else {
            return Ok(());
        };
        app.handle_event(event, Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, ModifierKeyCode};
    use std::time::Duration;

    use crate::ui::theme::{THEME_KEY, ThemeFlag};

    fn make_app(release_events: bool) -> App {
        let mut app = App::new(Config::default(), JsonStore::in_memory(), release_events);
        app.viewport = Rect::new(0, 0, 140, 40);
        app
    }

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key_center(app: &App, code: &str) -> (u16, u16) {
        let layout = app.layout();
        let geometry = KeyboardGeometry::for_area(&app.keyboard.layout, layout.keyboard);
        let rect = geometry.rect_of(code).unwrap();
        (rect.x + rect.width / 2, rect.y)
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = make_app(true);
        app.handle_key(
            key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
            Instant::now(),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_suppressed_key_skips_binding() {
        let mut app = make_app(true);
        app.keyboard.key_down(&KeyInput::new("KeyA", "a"));
        app.handle_key(press(KeyCode::F(5)), Instant::now());
        // F5 is on the default deny-list, so no reload happened.
        assert_eq!(app.keyboard.counter.get("A"), 1);
        assert_eq!(app.keyboard.counter.get("F5"), 1);
    }

    #[test]
    fn test_reload_binding_when_not_suppressed() {
        let config = Config {
            suppressed_keys: vec!["F1".to_string()],
            ..Config::default()
        };
        let mut app = App::new(config, JsonStore::in_memory(), true);
        app.handle_key(press(KeyCode::Char('a')), Instant::now());
        app.handle_key(press(KeyCode::F(5)), Instant::now());
        assert!(app.keyboard.counter.is_empty());
        assert_eq!(app.keyboard.display.last_key(), "None");
    }

    #[test]
    fn test_f2_toggles_theme() {
        let mut app = make_app(true);
        app.handle_key(press(KeyCode::F(2)), Instant::now());
        assert_eq!(app.theme.flag(), ThemeFlag::Light);
        assert_eq!(app.store.get(THEME_KEY), Some("light"));
        assert_eq!(app.keyboard.counter.get("F2"), 1);
    }

    #[test]
    fn test_control_modifier_event_is_tracked() {
        let mut app = make_app(true);
        let now = Instant::now();
        app.handle_key(
            key(
                KeyCode::Modifier(ModifierKeyCode::LeftControl),
                KeyModifiers::CONTROL,
                KeyEventKind::Press,
            ),
            now,
        );
        app.handle_key(
            key(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyEventKind::Press),
            now,
        );
        assert_eq!(app.keyboard.display.combination(), "Control Left + A");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_release_event_clears_held() {
        let mut app = make_app(true);
        let now = Instant::now();
        app.handle_key(press(KeyCode::Char('x')), now);
        app.handle_key(release(KeyCode::Char('x')), now);
        assert!(app.keyboard.held.is_empty());
        assert_eq!(app.keyboard.display.combination(), "None");
    }

    #[test]
    fn test_release_fallback_without_release_events() {
        let mut app = make_app(false);
        let start = Instant::now();
        app.handle_key(press(KeyCode::Char('x')), start);
        app.on_tick(start + Duration::from_millis(100));
        assert!(app.keyboard.held.contains("KeyX"));

        // Auto-repeat pushes the release back.
        app.handle_key(
            key(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Repeat),
            start + Duration::from_millis(100),
        );
        app.on_tick(start + Duration::from_millis(200));
        assert!(app.keyboard.held.contains("KeyX"));

        app.on_tick(start + Duration::from_millis(250));
        assert!(app.keyboard.held.is_empty());
        assert_eq!(app.keyboard.counter.get("X"), 2);
    }

    #[test]
    fn test_click_virtual_key() {
        let mut app = make_app(true);
        let start = Instant::now();
        let (x, y) = key_center(&app, "KeyQ");

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), start);
        assert_eq!(app.keyboard.display.last_key(), "q");
        assert_eq!(app.keyboard.counter.get("Q"), 1);
        assert!(app.keyboard.held.contains("KeyQ"));
        assert!(app.keyboard.highlighter.is_active("KeyQ"));

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), start);
        assert!(!app.keyboard.highlighter.is_active("KeyQ"));
        assert!(app.keyboard.held.contains("KeyQ"));

        app.on_tick(start + Duration::from_millis(199));
        assert!(app.keyboard.held.contains("KeyQ"));
        app.on_tick(start + Duration::from_millis(200));
        assert!(app.keyboard.held.is_empty());
        assert_eq!(app.keyboard.counter.get("Q"), 1);
    }

    #[test]
    fn test_pointer_leaving_key_drops_highlight() {
        let mut app = make_app(true);
        let now = Instant::now();
        let (x, y) = key_center(&app, "KeyQ");
        let (wx, wy) = key_center(&app, "KeyW");

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), now);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), wx, wy), now);
        assert!(!app.keyboard.highlighter.is_active("KeyQ"));
        assert!(!app.keyboard.highlighter.is_active("KeyW"));
    }

    #[test]
    fn test_click_outside_keys_is_noop() {
        let mut app = make_app(true);
        let now = Instant::now();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 39), now);
        assert!(app.keyboard.counter.is_empty());
        assert_eq!(app.simulator.pending_count(), 0);
    }

    #[test]
    fn test_click_theme_toggle() {
        let mut app = make_app(true);
        let toggle = app.layout().theme_toggle;
        app.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), toggle.x + 1, toggle.y),
            Instant::now(),
        );
        assert_eq!(app.theme.flag(), ThemeFlag::Light);
        assert!(app.keyboard.counter.is_empty());
    }

    #[test]
    fn test_reload_detaches_pending_release() {
        let mut app = make_app(true);
        let start = Instant::now();
        let (x, y) = key_center(&app, "KeyQ");
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), start);
        app.reload();

        app.handle_key(press(KeyCode::Char('q')), start + Duration::from_millis(100));
        app.on_tick(start + Duration::from_millis(250));
        // The release from before the reload must not release the new press.
        assert!(app.keyboard.held.contains("KeyQ"));
    }
}
