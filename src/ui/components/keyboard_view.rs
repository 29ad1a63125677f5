use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::highlight::Highlighter;
use crate::keyboard::layout::{KeyboardLayout, VirtualKey};
use crate::ui::theme::Theme;

/// Where each on-screen key lands inside a keyboard area. Keys that do not
/// fit are left out, so they can be neither drawn nor clicked.
pub struct KeyboardGeometry<'a> {
    keys: Vec<(Rect, &'a VirtualKey)>,
}

impl<'a> KeyboardGeometry<'a> {
    /// `inner` is the area inside the keyboard border.
    pub fn new(layout: &'a KeyboardLayout, inner: Rect) -> Self {
        let mut keys = Vec::new();
        for (row_idx, row) in layout.rows.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let mut x = inner.x;
            for key in row {
                if x + key.width > inner.x + inner.width {
                    break;
                }
                keys.push((Rect::new(x, y, key.width, 1), key));
                x += key.width + 1;
            }
        }
        Self { keys }
    }

    /// Geometry for a keyboard drawn bordered into `area`.
    pub fn for_area(layout: &'a KeyboardLayout, area: Rect) -> Self {
        Self::new(layout, Block::bordered().inner(area))
    }

    pub fn key_at(&self, column: u16, row: u16) -> Option<&'a VirtualKey> {
        let pos = Position::new(column, row);
        self.keys
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, key)| *key)
    }

    pub fn rect_of(&self, code: &str) -> Option<Rect> {
        self.keys
            .iter()
            .find(|(_, key)| key.code == code)
            .map(|(rect, _)| *rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, &'a VirtualKey)> {
        self.keys.iter()
    }
}

pub struct KeyboardView<'a> {
    layout: &'a KeyboardLayout,
    highlighter: &'a Highlighter,
    theme: &'a Theme,
}

impl<'a> KeyboardView<'a> {
    pub fn new(
        layout: &'a KeyboardLayout,
        highlighter: &'a Highlighter,
        theme: &'a Theme,
    ) -> Self {
        Self {
            layout,
            highlighter,
            theme,
        }
    }
}

fn centered_label(label: &str, width: u16) -> String {
    let width = width as usize;
    let len = label.chars().count().min(width);
    let left = (width - len) / 2;
    let right = width - len - left;
    let label: String = label.chars().take(len).collect();
    format!("{}{label}{}", " ".repeat(left), " ".repeat(right))
}

impl Widget for KeyboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Keyboard ({}) ", self.layout.name))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        for (rect, key) in KeyboardGeometry::new(self.layout, inner).iter() {
            let style = if self.highlighter.is_active(key.code) {
                Style::default()
                    .fg(colors.key_active_fg())
                    .bg(colors.key_active_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.key_fg()).bg(colors.key_bg())
            };
            buf.set_string(rect.x, rect.y, centered_label(key.label, rect.width), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{Theme, ThemeFlag};

    #[test]
    fn test_key_at_and_rect_of_agree() {
        let layout = KeyboardLayout::ansi();
        let geometry = KeyboardGeometry::new(&layout, Rect::new(1, 1, 100, 7));
        let rect = geometry.rect_of("KeyQ").unwrap();
        assert_eq!(rect.y, 3);
        let hit = geometry.key_at(rect.x + rect.width / 2, rect.y).unwrap();
        assert_eq!(hit.code, "KeyQ");
    }

    #[test]
    fn test_gaps_are_not_keys() {
        let layout = KeyboardLayout::ansi();
        let geometry = KeyboardGeometry::new(&layout, Rect::new(0, 0, 100, 7));
        let esc = geometry.rect_of("Escape").unwrap();
        assert!(geometry.key_at(esc.x + esc.width, esc.y).is_none());
    }

    #[test]
    fn test_keys_that_do_not_fit_are_dropped() {
        let layout = KeyboardLayout::ansi();
        let geometry = KeyboardGeometry::new(&layout, Rect::new(0, 0, 30, 3));
        assert!(geometry.rect_of("KeyQ").is_some());
        assert!(geometry.rect_of("KeyP").is_none());
        assert!(geometry.rect_of("KeyA").is_none());
        assert!(geometry.iter().all(|(rect, _)| rect.x + rect.width <= 30));
    }

    #[test]
    fn test_active_key_rendered_with_active_colors() {
        let layout = KeyboardLayout::ansi();
        let mut highlighter = Highlighter::new(&layout);
        highlighter.set_active("KeyQ", true);
        let theme = Theme::for_flag(ThemeFlag::Dark);

        let area = Rect::new(0, 0, 100, 9);
        let mut buf = Buffer::empty(area);
        KeyboardView::new(&layout, &highlighter, &theme).render(area, &mut buf);

        let geometry = KeyboardGeometry::for_area(&layout, area);
        let q = geometry.rect_of("KeyQ").unwrap();
        let w = geometry.rect_of("KeyW").unwrap();
        assert_eq!(buf[(q.x, q.y)].bg, theme.colors.key_active_bg());
        assert_eq!(buf[(w.x, w.y)].bg, theme.colors.key_bg());
        assert_eq!(buf[(q.x + 2, q.y)].symbol(), "q");
    }

    #[test]
    fn test_centered_label() {
        assert_eq!(centered_label("q", 5), "  q  ");
        assert_eq!(centered_label("Shift", 4), "Shif");
    }
}
