use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::fmt;
use thiserror::Error;

use crate::calendar::timestamp::{format_timestamp, parse_timestamp};
use crate::calendar::{CalendarEvent, RecordId, ReservationFields, Team};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Error(String),
}

/// Everything the sync controller owns. Only `sync::controller::update`
/// mutates it; displays read it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub events: Vec<CalendarEvent>,
    pub teams: Vec<Team>,
    pub form: Option<FormBuffer>,
    pub sync_status: SyncStatus,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            teams: Vec::new(),
            form: None,
            sync_status: SyncStatus::Synced,
        }
    }

    pub fn event(&self, id: &RecordId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Subject,
    Start,
    End,
    Team,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Subject => "subject",
            FormField::Start => "start",
            FormField::End => "end",
            FormField::Team => "team",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(FormField),
    #[error("{0} is not a valid date and time (YYYY-MM-DDTHH:MM)")]
    InvalidTimestamp(FormField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Subject(String),
    Start(String),
    End(String),
    Team(Option<RecordId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormBuffer {
    pub mode: FormMode,
    pub subject: String,
    pub start: String,
    pub end: String,
    pub team: Option<RecordId>,
    pub active_field: FormField,
    pub error: Option<FormError>,
}

impl FormBuffer {
    pub fn for_slot(start: DateTime<Utc>) -> Self {
        Self {
            mode: FormMode::Create,
            subject: String::new(),
            start: format_timestamp(start),
            end: format_timestamp(start + Duration::hours(1)),
            team: None,
            active_field: FormField::Subject,
            error: None,
        }
    }

    pub fn for_event(event: &CalendarEvent) -> Self {
        Self {
            mode: FormMode::Edit(event.id.clone()),
            subject: event.title.clone(),
            start: event.start.clone(),
            end: event.end.clone(),
            team: event.team().cloned(),
            active_field: FormField::Subject,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn editing_id(&self) -> Option<&RecordId> {
        match &self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Subject(value) => self.subject = value,
            FormEdit::Start(value) => self.start = value,
            FormEdit::End(value) => self.end = value,
            FormEdit::Team(value) => self.team = value,
        }
        self.error = None;
    }

    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Subject => &self.subject,
            FormField::Start => &self.start,
            FormField::End => &self.end,
            FormField::Team => "",
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Subject => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::Team,
            FormField::Team => FormField::Subject,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Subject => FormField::Team,
            FormField::Start => FormField::Subject,
            FormField::End => FormField::Start,
            FormField::Team => FormField::End,
        };
    }

    pub fn validate(&self) -> Result<ReservationFields, FormError> {
        if self.subject.trim().is_empty() {
            return Err(FormError::MissingField(FormField::Subject));
        }
        let start = required_timestamp(&self.start, FormField::Start)?;
        let end = required_timestamp(&self.end, FormField::End)?;
        let team = match &self.team {
            Some(team) if !team.is_blank() => team.clone(),
            _ => return Err(FormError::MissingField(FormField::Team)),
        };

        Ok(ReservationFields {
            subject: self.subject.clone(),
            start: format_timestamp(start),
            end: format_timestamp(end),
            team,
        })
    }
}

fn required_timestamp(value: &str, field: FormField) -> Result<DateTime<Utc>, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    parse_timestamp(value).ok_or(FormError::InvalidTimestamp(field))
}

/// Cursor and overlays of the terminal week view. Not part of the synced state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub selected_date: NaiveDate,
    pub selected_slot: usize,
    pub show_help: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            selected_date: Local::now().date_naive(),
            selected_slot: 0,
            show_help: false,
        }
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = date;
        self
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
