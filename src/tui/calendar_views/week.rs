use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::Datelike;
use grist_calendar::ui::{
    theme::text_color_on,
    week_view::{SLOT_MINUTES, slot_start},
};
use crate::tui::presentation::Screen;

const LABEL_WIDTH: u16 = 6;

pub fn render(f: &mut Frame, screen: &Screen, area: ratatui::layout::Rect) {
    let layout = screen.layout;
    let theme = screen.theme;

    let week_range = if let Some(last_day) = layout.days.last() {
        format!("{} - {}",
            layout.week_start.format("%b %d"),
            last_day.date.format("%b %d, %Y"))
    } else {
        layout.week_start.format("%b %d, %Y").to_string()
    };

    let day_count = layout.days.len().max(1) as u16;
    let column_width = (area.width.saturating_sub(LABEL_WIDTH + 2) / day_count).max(4) as usize;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(week_range, Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    let mut header_spans = vec![Span::raw(" ".repeat(LABEL_WIDTH as usize))];
    for day in &layout.days {
        let day_str = fit(&format!(" {} {}", day.date.format("%a"), day.date.day()), column_width);

        let style = if day.is_selected {
            Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
        } else if day.is_today {
            Style::default().fg(theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.weekday_header)
        };

        header_spans.push(Span::styled(day_str, style));
    }
    lines.push(Line::from(header_spans));

    for slot in 0..layout.slot_count {
        let minutes = slot as i64 * SLOT_MINUTES;
        let label = match slot_start(layout.week_start, slot, screen.options) {
            Some(start) if minutes % 60 == 0 => format!("{} ", start.format("%H:%M")),
            _ => " ".repeat(LABEL_WIDTH as usize),
        };
        let mut spans = vec![Span::styled(label, Style::default().fg(theme.slot_label))];

        for day in &layout.days {
            let is_cursor = day.is_selected && slot == screen.view.selected_slot;
            let block = day.blocks.iter().find(|b| b.covers(slot));

            let (text, mut style) = match block {
                Some(block) => {
                    let background = theme.team_color(&block.color);
                    let text = if block.first_slot == slot { block.title.as_str() } else { "" };
                    (
                        fit(&format!(" {}", text), column_width),
                        Style::default().bg(background).fg(text_color_on(background)),
                    )
                }
                None => (fit(" ·", column_width), Style::default().fg(theme.slot_label)),
            };
            if is_cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }

            spans.push(Span::styled(text, style));
        }

        lines.push(Line::from(spans));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

fn fit(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.push_str(&" ".repeat(width.saturating_sub(len)));
    fitted
}
