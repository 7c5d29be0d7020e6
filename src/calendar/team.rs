use serde::{Deserialize, Serialize};

use crate::calendar::record::{Record, RecordId};

pub const NAME_FIELD: &str = "nom";
pub const COLOR_FIELD: &str = "couleur";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: RecordId,
    pub name: String,
    pub color: Option<String>,
}

impl Team {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            name: record.text(NAME_FIELD),
            color: record.optional_text(COLOR_FIELD),
        }
    }
}

pub fn teams_from_records(records: &[Record]) -> Vec<Team> {
    records.iter().map(Team::from_record).collect()
}
