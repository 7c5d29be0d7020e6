use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::calendar::record::{Record, RecordId};
use crate::calendar::timestamp::format_timestamp;

pub const SUBJECT_FIELD: &str = "objet";
pub const START_FIELD: &str = "debut";
pub const END_FIELD: &str = "fin";
pub const TEAM_FIELD: &str = "equipe";

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: RecordId,
    pub subject: String,
    pub start: String,
    pub end: String,
    pub team: Option<RecordId>,
}

impl Reservation {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            subject: record.text(SUBJECT_FIELD),
            start: record.text(START_FIELD),
            end: record.text(END_FIELD),
            team: record.reference(TEAM_FIELD),
        }
    }
}

/// The editable subset written on create and on a form-driven update.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationFields {
    pub subject: String,
    pub start: String,
    pub end: String,
    pub team: RecordId,
}

impl ReservationFields {
    pub fn into_fields(self) -> Map<String, Value> {
        ReservationPatch::from(self).into_fields()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationPatch {
    pub subject: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub team: Option<RecordId>,
}

impl ReservationPatch {
    /// A drag without an end keeps the reservation well-formed by ending it
    /// where it starts.
    pub fn moved(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        let start = format_timestamp(start);
        let end = end.map(format_timestamp).unwrap_or_else(|| start.clone());
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn resized(end: DateTime<Utc>) -> Self {
        Self {
            end: Some(format_timestamp(end)),
            ..Self::default()
        }
    }

    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(subject) = self.subject {
            fields.insert(SUBJECT_FIELD.to_string(), Value::String(subject));
        }
        if let Some(start) = self.start {
            fields.insert(START_FIELD.to_string(), Value::String(start));
        }
        if let Some(end) = self.end {
            fields.insert(END_FIELD.to_string(), Value::String(end));
        }
        if let Some(team) = self.team {
            fields.insert(TEAM_FIELD.to_string(), Value::from(team));
        }
        fields
    }
}

impl From<ReservationFields> for ReservationPatch {
    fn from(fields: ReservationFields) -> Self {
        Self {
            subject: Some(fields.subject),
            start: Some(fields.start),
            end: Some(fields.end),
            team: Some(fields.team),
        }
    }
}
