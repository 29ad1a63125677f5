use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::key_stats::{KeyCount, KeyPressCounter};
use crate::ui::theme::Theme;

/// Press counts, most pressed first. The list is rebuilt from the counter on
/// every render.
pub struct StatsPanel<'a> {
    counter: &'a KeyPressCounter,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(counter: &'a KeyPressCounter, theme: &'a Theme) -> Self {
        Self { counter, theme }
    }

    /// `name: count` rows, at most `limit` of them.
    #[cfg(test)]
    pub fn rows(&self, limit: usize) -> Vec<String> {
        self.counter
            .sorted()
            .into_iter()
            .take(limit)
            .map(row_text)
            .collect()
    }
}

fn row_text(entry: &KeyCount) -> String {
    format!("{}: {}", entry.name, entry.count)
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Key Statistics ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{} presses", self.counter.total()),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(", {} keys", self.counter.distinct()),
                Style::default().fg(colors.muted()),
            ),
        ])];

        if self.counter.is_empty() {
            lines.push(Line::from(Span::styled(
                "Press or click a key",
                Style::default().fg(colors.muted()),
            )));
        } else {
            let limit = inner.height.saturating_sub(1) as usize;
            let entries = self.counter.sorted();
            let max = entries.first().map(|e| e.count).unwrap_or(1).max(1);
            let bar_room = (inner.width as usize).saturating_sub(15).min(10);
            for entry in entries.into_iter().take(limit) {
                let filled = (entry.count as usize * bar_room).div_ceil(max as usize);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:<14}", row_text(entry)),
                        Style::default().fg(colors.fg()),
                    ),
                    Span::styled(
                        "\u{2588}".repeat(filled),
                        Style::default().fg(colors.bar_filled()),
                    ),
                ]));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
