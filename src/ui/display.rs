use chrono::{DateTime, Duration, Utc};

use crate::calendar::timestamp::format_timestamp;
use crate::calendar::{CalendarEvent, RecordId};
use crate::sync::display::CalendarDisplay;

/// The event set currently on screen. Moves and resizes land here first and
/// can be undone once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekDisplay {
    events: Vec<CalendarEvent>,
    undo: Option<Vec<CalendarEvent>>,
}

impl WeekDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn event(&self, id: &RecordId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Shifts an event by `delta`. Returns the new start and, when the event
    /// had a readable end, the new end.
    pub fn move_event(
        &mut self,
        id: &RecordId,
        delta: Duration,
    ) -> Option<(DateTime<Utc>, Option<DateTime<Utc>>)> {
        let index = self.events.iter().position(|e| &e.id == id)?;
        let start = self.events[index].start_at()? + delta;
        let end = self.events[index].end_at().map(|end| end + delta);

        self.undo = Some(self.events.clone());
        let event = &mut self.events[index];
        event.start = format_timestamp(start);
        if let Some(end) = end {
            event.end = format_timestamp(end);
        }

        Some((start, end))
    }

    /// Moves an event's end by `delta`. Refuses to end before the start.
    pub fn resize_event(&mut self, id: &RecordId, delta: Duration) -> Option<DateTime<Utc>> {
        let index = self.events.iter().position(|e| &e.id == id)?;
        let start = self.events[index].start_at()?;
        let end = self.events[index].end_at().unwrap_or(start) + delta;
        if end < start {
            return None;
        }

        self.undo = Some(self.events.clone());
        self.events[index].end = format_timestamp(end);

        Some(end)
    }
}

impl CalendarDisplay for WeekDisplay {
    fn refresh(&mut self, events: &[CalendarEvent]) {
        self.events = events.to_vec();
        self.undo = None;
    }

    fn revert_last_change(&mut self) {
        if let Some(previous) = self.undo.take() {
            self.events = previous;
        }
    }
}
