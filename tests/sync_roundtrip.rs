use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use grist_calendar::app::{FormEdit, SyncStatus};
use grist_calendar::calendar::{Record, RecordId};
use grist_calendar::sync::{ApiError, Collection, Message, RecordStore, SyncEngine};
use grist_calendar::ui::WeekDisplay;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

struct MemoryStore {
    teams: Vec<Record>,
    reservations: Mutex<Vec<Record>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    fn new() -> Self {
        let teams = vec![
            record(json!({ "id": 1, "fields": { "nom": "Ops", "couleur": "#ff0000" } })),
            record(json!({ "id": 2, "fields": { "nom": "Dev", "couleur": "#00ff00" } })),
        ];
        let reservations = vec![record(json!({
            "id": 10,
            "fields": {
                "objet": "Sync",
                "debut": "2024-01-01T09:00:00Z",
                "fin": "2024-01-01T10:00:00Z",
                "equipe": 1
            }
        }))];
        Self {
            teams,
            reservations: Mutex::new(reservations),
            next_id: AtomicI64::new(100),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        let store = Self::new();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    fn snapshot(&self) -> Vec<Record> {
        self.reservations.lock().unwrap().clone()
    }

    fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), ApiError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApiError::RequestError("Status 500: unavailable".to_string()));
        }
        Ok(())
    }
}

fn record(value: Value) -> Record {
    serde_json::from_value(value).unwrap()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ApiError> {
        Ok(match collection {
            Collection::Teams => self.teams.clone(),
            Collection::Reservations => self.snapshot(),
        })
    }

    async fn create(&self, _: Collection, fields: Map<String, Value>) -> Result<Record, ApiError> {
        self.check_write()?;
        let id = RecordId::Int(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Record { id, fields };
        self.reservations.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        _: Collection,
        id: RecordId,
        fields: Map<String, Value>,
    ) -> Result<Record, ApiError> {
        self.check_write()?;
        let mut reservations = self.reservations.lock().unwrap();
        let existing = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        existing.fields.extend(fields);
        Ok(existing.clone())
    }

    async fn delete(&self, _: Collection, id: RecordId) -> Result<(), ApiError> {
        self.check_write()?;
        self.reservations.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

async fn loaded(store: MemoryStore) -> SyncEngine<MemoryStore, WeekDisplay> {
    let mut engine = SyncEngine::new(store, WeekDisplay::new());
    engine.dispatch(Message::Load).await;
    engine
}

#[tokio::test]
async fn load_shows_reservations_in_team_colors() {
    let engine = loaded(MemoryStore::new()).await;

    let events = engine.display().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Sync");
    assert_eq!(events[0].color, "#ff0000");
}

#[tokio::test]
async fn created_reservation_comes_back_from_the_store() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine.dispatch(Message::DateClicked(Utc.with_ymd_and_hms(2024, 1, 2, 14, 0, 0).unwrap())).await;
    engine.dispatch(Message::FormEdited(FormEdit::Subject("Retro".to_string()))).await;
    engine.dispatch(Message::FormEdited(FormEdit::Team(Some(RecordId::Int(2))))).await;
    engine.dispatch(Message::FormSubmitted).await;

    assert!(engine.state().form.is_none());
    let retro = engine
        .display()
        .events()
        .iter()
        .find(|e| e.title == "Retro")
        .cloned()
        .unwrap();
    assert_eq!(retro.start, "2024-01-02T14:00:00Z");
    assert_eq!(retro.end, "2024-01-02T15:00:00Z");
    assert_eq!(retro.color, "#00ff00");
    assert_eq!(retro.team(), Some(&RecordId::Int(2)));
}

#[tokio::test]
async fn saving_an_unchanged_form_twice_leaves_the_same_record() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine.dispatch(Message::EventClicked(RecordId::Int(10))).await;
    engine.dispatch(Message::FormSubmitted).await;
    let after_first = engine.store().snapshot();

    engine.dispatch(Message::EventClicked(RecordId::Int(10))).await;
    engine.dispatch(Message::FormSubmitted).await;

    assert_eq!(engine.store().snapshot(), after_first);
    assert_eq!(engine.store().write_count(), 2);
}

#[tokio::test]
async fn failed_drag_reverts_display_and_leaves_store_alone() {
    let mut engine = loaded(MemoryStore::failing()).await;
    let before = engine.store().snapshot();
    let id = RecordId::Int(10);

    let (start, end) = engine.display_mut().move_event(&id, Duration::hours(2)).unwrap();
    assert_eq!(engine.display().events()[0].start, "2024-01-01T11:00:00Z");
    engine.dispatch(Message::EventDropped { id, start, end }).await;

    assert_eq!(engine.display().events()[0].start, "2024-01-01T09:00:00Z");
    assert_eq!(engine.store().snapshot(), before);
    assert!(matches!(engine.state().sync_status, SyncStatus::Error(_)));
}

#[tokio::test]
async fn drop_without_end_writes_end_equal_to_start() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine
        .dispatch(Message::EventDropped {
            id: RecordId::Int(10),
            start: Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap(),
            end: None,
        })
        .await;

    let stored = &engine.store().snapshot()[0];
    assert_eq!(stored.text("debut"), "2024-01-01T13:00:00Z");
    assert_eq!(stored.text("fin"), "2024-01-01T13:00:00Z");
    assert_eq!(engine.display().events()[0].end, "2024-01-01T13:00:00Z");
}

#[tokio::test]
async fn resize_changes_only_the_end() {
    let mut engine = loaded(MemoryStore::new()).await;
    let id = RecordId::Int(10);

    let end = engine.display_mut().resize_event(&id, Duration::minutes(30)).unwrap();
    engine.dispatch(Message::EventResized { id, end }).await;

    let stored = &engine.store().snapshot()[0];
    assert_eq!(stored.text("debut"), "2024-01-01T09:00:00Z");
    assert_eq!(stored.text("fin"), "2024-01-01T10:30:00Z");
}

#[tokio::test]
async fn empty_subject_is_never_written() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine.dispatch(Message::DateClicked(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap())).await;
    engine.dispatch(Message::FormEdited(FormEdit::Subject("   ".to_string()))).await;
    engine.dispatch(Message::FormEdited(FormEdit::Team(Some(RecordId::Int(1))))).await;
    engine.dispatch(Message::FormSubmitted).await;

    assert_eq!(engine.store().write_count(), 0);
    let form = engine.state().form.as_ref().unwrap();
    assert_eq!(form.error.as_ref().unwrap().to_string(), "subject is required");
}

#[tokio::test]
async fn delete_removes_reservation_everywhere() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine.dispatch(Message::EventClicked(RecordId::Int(10))).await;
    engine.dispatch(Message::DeleteRequested).await;

    assert!(engine.state().form.is_none());
    assert!(engine.store().snapshot().is_empty());
    assert!(engine.display().events().is_empty());
}

#[tokio::test]
async fn cancelling_the_form_writes_nothing() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine.dispatch(Message::EventClicked(RecordId::Int(10))).await;
    engine.dispatch(Message::FormEdited(FormEdit::Subject("Renamed".to_string()))).await;
    engine.dispatch(Message::FormCancelled).await;

    assert!(engine.state().form.is_none());
    assert_eq!(engine.store().write_count(), 0);
    assert_eq!(engine.display().events()[0].title, "Sync");
}

#[tokio::test]
async fn malformed_start_is_never_written() {
    let mut engine = loaded(MemoryStore::new()).await;

    engine.dispatch(Message::DateClicked(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap())).await;
    engine.dispatch(Message::FormEdited(FormEdit::Subject("Retro".to_string()))).await;
    engine.dispatch(Message::FormEdited(FormEdit::Team(Some(RecordId::Int(1))))).await;
    engine.dispatch(Message::FormEdited(FormEdit::Start("2024-01-01T0".to_string()))).await;
    engine.dispatch(Message::FormSubmitted).await;

    assert_eq!(engine.store().write_count(), 0);
    let form = engine.state().form.as_ref().unwrap();
    assert_eq!(form.error.as_ref().unwrap().to_string(), "start is not a valid date and time (YYYY-MM-DDTHH:MM)");
}
