use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::ui::components::key_display::KeyDisplayPanel;
use crate::ui::components::keyboard_view::KeyboardView;
use crate::ui::components::stats_panel::StatsPanel;
use crate::ui::layout::{AppLayout, THEME_TOGGLE_WIDTH};
use crate::ui::theme::ThemeFlag;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = app.theme.theme();
    let colors = &theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area, &app.keyboard.layout);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " kbmirror ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} keys held", app.keyboard.held.len()),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let toggle = Paragraph::new(Span::styled(
        theme_toggle_label(app.theme.flag()),
        Style::default()
            .fg(colors.bg())
            .bg(colors.accent())
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(toggle, layout.theme_toggle);

    frame.render_widget(
        KeyDisplayPanel::new(&app.keyboard.display, theme),
        layout.key_display,
    );
    frame.render_widget(
        KeyboardView::new(&app.keyboard.layout, &app.keyboard.highlighter, theme),
        layout.keyboard,
    );
    frame.render_widget(StatsPanel::new(&app.keyboard.counter, theme), layout.stats);

    let footer_lines: Vec<Line> = layout
        .footer_lines
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}

/// Fixed-width so the clickable area does not move between themes.
pub fn theme_toggle_label(flag: ThemeFlag) -> String {
    let text = format!("[ theme: {flag} ]");
    format!("{text:^width$}", width = THEME_TOGGLE_WIDTH as usize)
}
