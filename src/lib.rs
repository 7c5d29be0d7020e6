pub mod app;
pub mod calendar;
pub mod input;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::{AppState, FormBuffer, SyncStatus, ViewState};
pub use calendar::{CalendarEvent, Record, RecordId, Team};
pub use sync::{GristClient, Message, RecordStore, SyncEngine};
