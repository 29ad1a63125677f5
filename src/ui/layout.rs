use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::keyboard::layout::KeyboardLayout;

pub const THEME_TOGGLE_WIDTH: u16 = 16;
pub const SIDEBAR_WIDTH: u16 = 32;
const KEY_DISPLAY_HEIGHT: u16 = 4;
/// Left and right border of a bordered panel.
const BORDER: u16 = 2;

pub const FOOTER_HINTS: &[&str] = &[
    "[click] Press key",
    "[F2] Toggle theme",
    "[F5] Reload",
    "[Ctrl+C] Quit",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // whole keyboard fits beside the statistics sidebar
    Narrow, // statistics stacked below the keyboard
}

impl LayoutTier {
    pub fn from_area(area: Rect, keyboard: &KeyboardLayout) -> Self {
        if area.width >= Self::wide_min_width(keyboard) {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    /// Narrowest terminal that shows every key next to the sidebar.
    pub fn wide_min_width(keyboard: &KeyboardLayout) -> u16 {
        keyboard.width() + BORDER + SIDEBAR_WIDTH
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub theme_toggle: Rect,
    pub key_display: Rect,
    pub keyboard: Rect,
    pub stats: Rect,
    pub footer: Rect,
    pub footer_lines: Vec<String>,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, keyboard: &KeyboardLayout) -> Self {
        let tier = LayoutTier::from_area(area, keyboard);
        let mut footer_lines = pack_hint_lines(FOOTER_HINTS, area.width as usize);
        footer_lines.truncate(2);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(footer_lines.len() as u16),
            ])
            .split(area);
        let header = vertical[0];

        let toggle_width = THEME_TOGGLE_WIDTH.min(header.width);
        let theme_toggle = Rect::new(
            header.x + header.width - toggle_width,
            header.y,
            toggle_width,
            header.height,
        );

        let (main, stats) = if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
                .split(vertical[1]);
            (horizontal[0], Some(horizontal[1]))
        } else {
            (vertical[1], None)
        };

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(KEY_DISPLAY_HEIGHT),
                Constraint::Length(keyboard.height() + BORDER),
                Constraint::Min(0),
            ])
            .split(main);

        Self {
            header,
            theme_toggle,
            key_display: main_layout[0],
            keyboard: main_layout[1],
            stats: stats.unwrap_or(main_layout[2]),
            footer: vertical[2],
            footer_lines,
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::keyboard_view::KeyboardGeometry;

    fn layout_for(width: u16, height: u16) -> AppLayout {
        AppLayout::new(Rect::new(0, 0, width, height), &KeyboardLayout::ansi())
    }

    #[test]
    fn test_wide_layout_has_sidebar() {
        let layout = layout_for(140, 40);
        assert_eq!(layout.tier, LayoutTier::Wide);
        assert_eq!(layout.stats.width, SIDEBAR_WIDTH);
        assert_eq!(layout.stats.x, 140 - SIDEBAR_WIDTH);
        assert_eq!(layout.keyboard.height, 9);
    }

    #[test]
    fn test_every_key_fits_on_both_sides_of_wide_threshold() {
        let keyboard = KeyboardLayout::ansi();
        let threshold = LayoutTier::wide_min_width(&keyboard);
        assert_eq!(threshold, 121);

        for width in [threshold - 1, threshold] {
            let layout = AppLayout::new(Rect::new(0, 0, width, 40), &keyboard);
            let geometry = KeyboardGeometry::for_area(&keyboard, layout.keyboard);
            for key in keyboard.keys() {
                assert!(
                    geometry.rect_of(key.code).is_some(),
                    "{} missing at width {width}",
                    key.code
                );
            }
        }
        assert_eq!(layout_for(threshold - 1, 40).tier, LayoutTier::Narrow);
        assert_eq!(layout_for(threshold, 40).tier, LayoutTier::Wide);
    }

    #[test]
    fn test_narrow_layout_stacks_stats() {
        let layout = layout_for(90, 40);
        assert_eq!(layout.tier, LayoutTier::Narrow);
        assert!(layout.stats.y >= layout.keyboard.y + layout.keyboard.height);
        assert_eq!(layout.stats.width, 90);
    }

    #[test]
    fn test_theme_toggle_right_aligned_in_header() {
        let layout = layout_for(100, 30);
        assert_eq!(layout.theme_toggle.y, layout.header.y);
        assert_eq!(layout.theme_toggle.x + layout.theme_toggle.width, 100);
        assert_eq!(layout.theme_toggle.width, THEME_TOGGLE_WIDTH);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let layout = layout_for(4, 2);
        assert!(layout.theme_toggle.width <= 4);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[a] One", "[b] Two", "[c] Three"], 20);
        assert_eq!(lines, vec!["  [a] One  [b] Two", "  [c] Three"]);
        assert!(pack_hint_lines(&["x"], 0).is_empty());
    }
}
