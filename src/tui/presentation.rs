use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use grist_calendar::{
    app::{AppState, SyncStatus, ViewState},
    ui::{Theme, WeekLayout, WeekOptions},
};
use crate::tui::{calendar_views, dialogs};

pub struct Screen<'a> {
    pub state: &'a AppState,
    pub view: &'a ViewState,
    pub layout: &'a WeekLayout,
    pub theme: &'a Theme,
    pub options: &'a WeekOptions,
}

pub fn ui(f: &mut Frame, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let title = Paragraph::new("Team reservations - Week")
        .style(Style::default().fg(screen.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    calendar_views::week::render(f, screen, chunks[1]);

    let (sync_text, sync_color) = match &screen.state.sync_status {
        SyncStatus::Synced => ("Synced".to_string(), screen.theme.success),
        SyncStatus::Syncing => ("Syncing...".to_string(), screen.theme.status_bar),
        SyncStatus::Error(message) => (format!("Error: {}", message), screen.theme.error),
    };
    let status_text = format!(
        "Reservations: {} | {} | Press 'q' to quit, '?' for help",
        screen.state.events.len(),
        sync_text
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(sync_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    if screen.view.show_help {
        dialogs::help::render(f, screen.theme);
    }

    if let Some(form) = &screen.state.form {
        dialogs::reservation_form::render(f, form, &screen.state.teams, screen.theme);
    }
}
