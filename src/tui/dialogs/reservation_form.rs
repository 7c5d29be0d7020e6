use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use grist_calendar::{
    app::{FormBuffer, FormField},
    calendar::Team,
    ui::Theme,
};

pub fn render(f: &mut Frame, form: &FormBuffer, teams: &[Team], theme: &Theme) {
    let area = f.size();
    let form_width = 64;
    let form_height = 16;
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width.min(area.width),
        height: form_height.min(area.height),
    };

    f.render_widget(Clear, form_area);

    let label_style = |field: FormField| {
        let color = if form.active_field == field { theme.active_field } else { Color::DarkGray };
        Style::default().fg(color)
    };

    let team_label = match &form.team {
        Some(id) => teams
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "(none)".to_string(),
    };
    let team_hint = if form.active_field == FormField::Team { "  < Left/Right >" } else { "" };

    let form_title = if form.is_editing() { "Edit Reservation" } else { "New Reservation" };

    let mut form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Subject: ", label_style(FormField::Subject)),
            Span::raw(&form.subject),
        ]),
        Line::from(vec![
            Span::styled("Start:   ", label_style(FormField::Start)),
            Span::raw(&form.start),
        ]),
        Line::from(vec![
            Span::styled("End:     ", label_style(FormField::End)),
            Span::raw(&form.end),
        ]),
        Line::from(vec![
            Span::styled("Team:    ", label_style(FormField::Team)),
            Span::raw(team_label),
            Span::styled(team_hint, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        form_text.push(Line::from(vec![Span::styled(error.to_string(), Style::default().fg(theme.error))]));
        form_text.push(Line::from(""));
    }

    let mut hints = vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Save | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancel"),
    ];
    if form.is_editing() {
        hints.push(Span::raw(" | "));
        hints.push(Span::styled("Ctrl-D", Style::default().fg(Color::Red)));
        hints.push(Span::raw(" = Delete"));
    }
    form_text.push(Line::from(hints));

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", form_title))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
