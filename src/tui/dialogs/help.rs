use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use grist_calendar::ui::Theme;

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.size();
    let help_width = 56;
    let help_height = 26;
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width.min(area.width),
        height: help_height.min(area.height),
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(theme.help_section);

    let help_text = vec![
        Line::from(vec![Span::styled("Reservations Help", Style::default().fg(theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Previous/next half hour"),
        Line::from("  n/p      - Next/previous week"),
        Line::from("  t        - Jump to today"),
        Line::from(""),
        Line::from(vec![Span::styled("Reservations:", section)]),
        Line::from("  a        - New reservation at cursor"),
        Line::from("  Enter    - Edit reservation (or create)"),
        Line::from("  J/K      - Move reservation 30 min later/earlier"),
        Line::from("  +/-      - Lengthen/shorten by 30 min"),
        Line::from("  r        - Reload from Grist"),
        Line::from(""),
        Line::from(vec![Span::styled("Form:", section)]),
        Line::from("  Tab      - Next field (Shift-Tab back)"),
        Line::from("  Left/Right - Change team"),
        Line::from("  Enter    - Save"),
        Line::from("  Ctrl-D   - Delete reservation"),
        Line::from("  Esc      - Cancel"),
        Line::from(""),
        Line::from("  q        - Quit"),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Help (? or Esc to close) ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
