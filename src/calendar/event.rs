use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::record::{Record, RecordId};
use crate::calendar::reservation::Reservation;
use crate::calendar::team::Team;
use crate::calendar::timestamp::parse_timestamp;

pub const FALLBACK_COLOR: &str = "#cccccc";

/// A reservation as the calendar surface sees it, joined with its team color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: RecordId,
    pub title: String,
    pub start: String,
    pub end: String,
    pub color: String,
    #[serde(rename = "extendedProps")]
    pub extended_props: ExtendedProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProps {
    #[serde(rename = "equipeId")]
    pub team_id: Option<RecordId>,
}

impl CalendarEvent {
    pub fn team(&self) -> Option<&RecordId> {
        self.extended_props.team_id.as_ref()
    }

    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start)
    }

    pub fn end_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.end)
    }
}

pub fn color_for(team: Option<&RecordId>, teams: &[Team]) -> String {
    team.and_then(|id| teams.iter().find(|t| &t.id == id))
        .and_then(|t| t.color.clone())
        .unwrap_or_else(|| FALLBACK_COLOR.to_string())
}

pub fn to_calendar_event(record: &Record, teams: &[Team]) -> CalendarEvent {
    let reservation = Reservation::from_record(record);
    let color = color_for(reservation.team.as_ref(), teams);
    CalendarEvent {
        id: reservation.id,
        title: reservation.subject,
        start: reservation.start,
        end: reservation.end,
        color,
        extended_props: ExtendedProps {
            team_id: reservation.team,
        },
    }
}

pub fn build_events(records: &[Record], teams: &[Team]) -> Vec<CalendarEvent> {
    records.iter().map(|r| to_calendar_event(r, teams)).collect()
}
