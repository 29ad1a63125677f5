use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::display::KeyDisplay;
use crate::ui::theme::Theme;

pub struct KeyDisplayPanel<'a> {
    display: &'a KeyDisplay,
    theme: &'a Theme,
}

impl<'a> KeyDisplayPanel<'a> {
    pub fn new(display: &'a KeyDisplay, theme: &'a Theme) -> Self {
        Self { display, theme }
    }
}

impl Widget for KeyDisplayPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let value_style = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Last key:    ", Style::default().fg(colors.fg())),
                Span::styled(self.display.last_key(), value_style),
            ]),
            Line::from(vec![
                Span::styled("Combination: ", Style::default().fg(colors.fg())),
                Span::styled(self.display.combination(), value_style),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
