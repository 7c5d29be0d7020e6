use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::calendar::{CalendarEvent, RecordId};
use crate::storage::config::UiConfig;

pub const SLOT_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekOptions {
    pub slot_min_hour: u32,
    pub slot_max_hour: u32,
    pub show_weekends: bool,
}

impl WeekOptions {
    pub fn slot_count(&self) -> usize {
        let hours = self.slot_max_hour.saturating_sub(self.slot_min_hour) as i64;
        (hours * 60 / SLOT_MINUTES) as usize
    }

    pub fn shows(&self, date: NaiveDate) -> bool {
        self.show_weekends || !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn first_visible_from(&self, date: NaiveDate) -> NaiveDate {
        date.iter_days()
            .take(7)
            .find(|d| self.shows(*d))
            .unwrap_or(date)
    }
}

impl From<&UiConfig> for WeekOptions {
    fn from(ui: &UiConfig) -> Self {
        Self {
            slot_min_hour: ui.slot_min_hour,
            slot_max_hour: ui.slot_max_hour,
            show_weekends: ui.show_weekends,
        }
    }
}

impl Default for WeekOptions {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub slot_count: usize,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub blocks: Vec<EventBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: RecordId,
    pub title: String,
    pub color: String,
    pub first_slot: usize,
    pub slot_span: usize,
}

impl EventBlock {
    pub fn covers(&self, slot: usize) -> bool {
        slot >= self.first_slot && slot < self.first_slot + self.slot_span
    }
}

impl WeekLayout {
    pub fn week_of_date(date: NaiveDate) -> NaiveDate {
        let weekday = date.weekday();
        let days_from_monday = weekday.num_days_from_monday() as u64;
        date.checked_sub_days(chrono::Days::new(days_from_monday))
            .unwrap_or(date)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayColumn> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn block_at(&self, date: NaiveDate, slot: usize) -> Option<&EventBlock> {
        self.day(date)?.blocks.iter().find(|b| b.covers(slot))
    }
}

pub fn slot_start(date: NaiveDate, slot: usize, options: &WeekOptions) -> Option<DateTime<Utc>> {
    let open = date.and_hms_opt(options.slot_min_hour, 0, 0)?.and_utc();
    Some(open + chrono::Duration::minutes(slot as i64 * SLOT_MINUTES))
}

pub fn calculate_layout(
    events: &[CalendarEvent],
    selected_date: NaiveDate,
    options: &WeekOptions,
) -> WeekLayout {
    let week_start = WeekLayout::week_of_date(selected_date);
    let today = chrono::Local::now().date_naive();
    let slot_count = options.slot_count();

    let mut days = Vec::new();

    for day_offset in 0..7u64 {
        let Some(date) = week_start.checked_add_days(chrono::Days::new(day_offset)) else {
            continue;
        };
        if !options.shows(date) {
            continue;
        }

        let mut placed: Vec<(DateTime<Utc>, EventBlock)> = events
            .iter()
            .filter_map(|e| place_event(e, date, options))
            .collect();
        placed.sort_by_key(|(start, _)| *start);

        days.push(DayColumn {
            date,
            is_selected: date == selected_date,
            is_today: date == today,
            blocks: placed.into_iter().map(|(_, block)| block).collect(),
        });
    }

    WeekLayout { week_start, slot_count, days }
}

fn place_event(
    event: &CalendarEvent,
    date: NaiveDate,
    options: &WeekOptions,
) -> Option<(DateTime<Utc>, EventBlock)> {
    let start = event.start_at()?;
    if start.date_naive() != date {
        return None;
    }
    let end = event.end_at().filter(|end| *end >= start).unwrap_or(start);

    let open = slot_start(date, 0, options)?;
    let visible_minutes = options.slot_count() as i64 * SLOT_MINUTES;
    let start_minute = (start - open).num_minutes();
    let end_minute = (end - open).num_minutes();

    if start_minute >= visible_minutes || end_minute < 0 || (end_minute == 0 && start_minute < 0) {
        return None;
    }

    let first_slot = (start_minute.max(0) / SLOT_MINUTES) as usize;
    let clamped_end = end_minute.min(visible_minutes);
    let last_slot = ((clamped_end + SLOT_MINUTES - 1) / SLOT_MINUTES) as usize;
    let slot_span = last_slot.saturating_sub(first_slot).max(1);

    Some((
        start,
        EventBlock {
            event_id: event.id.clone(),
            title: event.title.clone(),
            color: event.color.clone(),
            first_slot,
            slot_span,
        },
    ))
}
