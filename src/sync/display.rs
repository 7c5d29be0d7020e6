use crate::calendar::CalendarEvent;

/// The surface events are drawn on. It applies moves and resizes itself
/// before the controller hears about them, so it also knows how to undo one.
pub trait CalendarDisplay {
    fn refresh(&mut self, events: &[CalendarEvent]);

    fn revert_last_change(&mut self);
}
