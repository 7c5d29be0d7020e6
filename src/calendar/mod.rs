pub mod event;
pub mod record;
pub mod reservation;
pub mod team;
pub mod timestamp;

pub use event::{CalendarEvent, ExtendedProps, FALLBACK_COLOR, build_events, color_for, to_calendar_event};
pub use record::{Record, RecordId};
pub use reservation::{Reservation, ReservationFields, ReservationPatch};
pub use team::Team;
