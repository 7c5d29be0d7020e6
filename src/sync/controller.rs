//! Pure transition function for the calendar's synced state.
//!
//! `update` never touches the network or the display. It returns the next
//! state plus the [`Command`]s the engine has to run; the outcome of each
//! command comes back in as another [`Message`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::app::{AppState, FormBuffer, FormEdit, FormMode, SyncStatus};
use crate::calendar::team::teams_from_records;
use crate::calendar::{CalendarEvent, Record, RecordId, ReservationPatch, build_events};
use crate::sync::grist_api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOrigin {
    Drag,
    Resize,
    Submit,
    Delete,
}

impl WriteOrigin {
    pub fn is_form_driven(self) -> bool {
        matches!(self, WriteOrigin::Submit | WriteOrigin::Delete)
    }
}

#[derive(Debug)]
pub enum Message {
    Load,
    Reload,
    TeamsFetched(Result<Vec<Record>, ApiError>),
    ReservationsFetched(Result<Vec<Record>, ApiError>),
    EventDropped {
        id: RecordId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    },
    EventResized {
        id: RecordId,
        end: DateTime<Utc>,
    },
    DateClicked(DateTime<Utc>),
    EventClicked(RecordId),
    FormEdited(FormEdit),
    FormFocusNext,
    FormFocusPrev,
    FormCancelled,
    FormSubmitted,
    DeleteRequested,
    WriteFinished {
        origin: WriteOrigin,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchTeams,
    FetchReservations,
    CreateReservation {
        fields: Map<String, Value>,
    },
    UpdateReservation {
        id: RecordId,
        fields: Map<String, Value>,
        origin: WriteOrigin,
    },
    DeleteReservation {
        id: RecordId,
    },
    RefreshDisplay(Vec<CalendarEvent>),
    RevertDisplay,
}

pub fn update(mut state: AppState, message: Message) -> (AppState, Vec<Command>) {
    let commands = match message {
        Message::Load => {
            state.sync_status = SyncStatus::Syncing;
            vec![Command::FetchTeams, Command::FetchReservations]
        }
        Message::Reload => {
            state.sync_status = SyncStatus::Syncing;
            vec![Command::FetchReservations]
        }
        Message::TeamsFetched(result) => {
            match result {
                Ok(records) => {
                    state.teams = teams_from_records(&records);
                    tracing::info!("Loaded {} teams", state.teams.len());
                }
                Err(e) => {
                    tracing::error!("Failed to fetch teams: {}", e);
                    state.sync_status = SyncStatus::Error(format!("Failed to fetch teams: {}", e));
                }
            }
            vec![]
        }
        Message::ReservationsFetched(result) => match result {
            Ok(records) => {
                state.events = build_events(&records, &state.teams);
                state.sync_status = SyncStatus::Synced;
                tracing::info!("Rebuilt {} calendar events", state.events.len());
                vec![Command::RefreshDisplay(state.events.clone())]
            }
            Err(e) => {
                tracing::error!("Failed to fetch reservations: {}", e);
                state.sync_status = SyncStatus::Error(format!("Failed to fetch reservations: {}", e));
                vec![]
            }
        },
        Message::EventDropped { id, start, end } => {
            state.sync_status = SyncStatus::Syncing;
            vec![Command::UpdateReservation {
                id,
                fields: ReservationPatch::moved(start, end).into_fields(),
                origin: WriteOrigin::Drag,
            }]
        }
        Message::EventResized { id, end } => {
            state.sync_status = SyncStatus::Syncing;
            vec![Command::UpdateReservation {
                id,
                fields: ReservationPatch::resized(end).into_fields(),
                origin: WriteOrigin::Resize,
            }]
        }
        Message::DateClicked(at) => {
            state.form = Some(FormBuffer::for_slot(at));
            vec![]
        }
        Message::EventClicked(id) => {
            match state.event(&id).map(FormBuffer::for_event) {
                Some(form) => state.form = Some(form),
                None => tracing::warn!("Clicked event {} is not in the current event set", id),
            }
            vec![]
        }
        Message::FormEdited(edit) => {
            if let Some(form) = state.form.as_mut() {
                form.apply(edit);
            }
            vec![]
        }
        Message::FormFocusNext => {
            if let Some(form) = state.form.as_mut() {
                form.next_field();
            }
            vec![]
        }
        Message::FormFocusPrev => {
            if let Some(form) = state.form.as_mut() {
                form.prev_field();
            }
            vec![]
        }
        Message::FormCancelled => {
            state.form = None;
            vec![]
        }
        Message::FormSubmitted => submit_form(&mut state),
        Message::DeleteRequested => {
            match state.form.as_ref().map(|f| f.editing_id().cloned()) {
                Some(Some(id)) => {
                    state.sync_status = SyncStatus::Syncing;
                    vec![Command::DeleteReservation { id }]
                }
                Some(None) => {
                    tracing::warn!("Delete requested on a reservation that does not exist yet");
                    vec![]
                }
                None => vec![],
            }
        }
        Message::WriteFinished { origin, result } => match result {
            Ok(()) => {
                if origin.is_form_driven() {
                    state.form = None;
                }
                state.sync_status = SyncStatus::Syncing;
                vec![Command::FetchReservations]
            }
            Err(e) => {
                tracing::error!("Failed to save reservation ({:?}): {}", origin, e);
                state.sync_status = SyncStatus::Error(format!("Failed to save: {}", e));
                if origin.is_form_driven() {
                    vec![]
                } else {
                    vec![Command::RevertDisplay]
                }
            }
        },
    };

    (state, commands)
}

fn submit_form(state: &mut AppState) -> Vec<Command> {
    let Some(form) = state.form.as_mut() else {
        return vec![];
    };

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("Reservation form rejected: {}", e);
            form.error = Some(e);
            return vec![];
        }
    };

    state.sync_status = SyncStatus::Syncing;
    match &form.mode {
        FormMode::Create => vec![Command::CreateReservation {
            fields: fields.into_fields(),
        }],
        FormMode::Edit(id) => vec![Command::UpdateReservation {
            id: id.clone(),
            fields: fields.into_fields(),
            origin: WriteOrigin::Submit,
        }],
    }
}
