use std::io;
use anyhow::Context;
use chrono::Duration;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use grist_calendar::{
    app::ViewState,
    input::{form_mode, normal_mode, Action},
    storage::config::Config,
    sync::{GristClient, Message, SyncEngine},
    ui::{calculate_layout, Theme, WeekDisplay, WeekOptions},
};
use crate::tui::presentation::{ui, Screen};

type Engine = SyncEngine<GristClient, WeekDisplay>;

pub async fn run_tui(config: Config) -> anyhow::Result<()> {
    let mut engine = SyncEngine::connect(&config, WeekDisplay::new())
        .context("Cannot connect to Grist")?;
    let options = WeekOptions::from(&config.ui);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut engine, &options).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    engine: &mut Engine,
    options: &WeekOptions,
) -> anyhow::Result<()> {
    let theme = Theme::default();
    let mut view = ViewState::new();
    view.selected_date = options.first_visible_from(view.selected_date);

    engine.dispatch(Message::Load).await;

    loop {
        let layout = calculate_layout(engine.display().events(), view.selected_date, options);
        terminal.draw(|f| {
            ui(f, &Screen {
                state: engine.state(),
                view: &view,
                layout: &layout,
                theme: &theme,
                options,
            })
        })?;

        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if view.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                view.show_help = false;
            }
            continue;
        }

        let form_message = engine
            .state()
            .form
            .as_ref()
            .map(|form| form_mode::handle_key(key, form, &engine.state().teams));
        if let Some(message) = form_message {
            if let Some(message) = message {
                engine.dispatch(message).await;
            }
            continue;
        }

        match normal_mode::handle_key(key.code, &mut view, &layout, options) {
            Action::Quit => return Ok(()),
            Action::Dispatch(message) => engine.dispatch(message).await,
            Action::Move { id, minutes } => {
                if let Some((start, end)) = engine.display_mut().move_event(&id, Duration::minutes(minutes)) {
                    engine.dispatch(Message::EventDropped { id, start, end }).await;
                }
            }
            Action::Resize { id, minutes } => {
                if let Some(end) = engine.display_mut().resize_event(&id, Duration::minutes(minutes)) {
                    engine.dispatch(Message::EventResized { id, end }).await;
                }
            }
            Action::None => {}
        }
    }
}
