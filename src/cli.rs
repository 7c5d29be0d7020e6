use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use grist_calendar::{
    app::SyncStatus,
    calendar::CalendarEvent,
    storage::config::Config,
    sync::{Message, SyncEngine},
    ui::{WeekDisplay, WeekLayout},
};

pub const USAGE: &str = "Usage: grist-calendar [--config <path>] [--agenda [YYYY-MM-DD]]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Calendar,
    Agenda(NaiveDate),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub config_path: Option<PathBuf>,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliOptions, String> {
    let mut mode = CliMode::Calendar;
    let mut config_path = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?,
                    None => Local::now().date_naive(),
                };
                mode = CliMode::Agenda(target_date);
            }
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => mode = CliMode::Help,
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliOptions { mode, config_path })
}

pub async fn run_agenda_mode(config: Config, date: NaiveDate) -> anyhow::Result<()> {
    let mut engine = SyncEngine::connect(&config, WeekDisplay::new())
        .context("Cannot connect to Grist")?;
    engine.dispatch(Message::Load).await;

    if let SyncStatus::Error(message) = &engine.state().sync_status {
        eprintln!("Failed to fetch reservations: {}", message);
    }

    let agenda = format_agenda_text(date, engine.display().events());
    display_with_pager(&agenda)?;
    Ok(())
}

fn format_agenda_text(date: NaiveDate, events: &[CalendarEvent]) -> String {
    let week_start = WeekLayout::week_of_date(date);
    let mut lines = vec![
        format!("Reservations - week of {}", week_start.format("%A, %B %d, %Y")),
        String::new(),
    ];

    let mut any = false;
    for day in week_start.iter_days().take(7) {
        let mut day_events: Vec<_> = events
            .iter()
            .filter(|e| e.start_at().map(|s| s.date_naive()) == Some(day))
            .collect();
        if day_events.is_empty() {
            continue;
        }
        day_events.sort_by_key(|e| e.start_at());
        any = true;

        lines.push(day.format("%A %d").to_string());
        for event in day_events {
            lines.push(format!("  {}", build_agenda_line(event)));
        }
        lines.push(String::new());
    }

    if !any {
        lines.push("No reservations this week.".to_string());
    }

    lines.join("\n")
}

fn build_agenda_line(event: &CalendarEvent) -> String {
    let time_label = match (event.start_at(), event.end_at()) {
        (Some(start), Some(end)) => format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
        (Some(start), None) => start.format("%H:%M").to_string(),
        _ => "--:--".to_string(),
    };

    format!("{:<13} {}", time_label, event.title)
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}
