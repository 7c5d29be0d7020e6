pub mod controller;
pub mod display;
pub mod grist_api;
pub mod sync_engine;

pub use controller::{Command, Message, WriteOrigin};
pub use display::CalendarDisplay;
pub use grist_api::{ApiError, Collection, GristClient, RecordStore};
pub use sync_engine::{SyncEngine, SyncError};
