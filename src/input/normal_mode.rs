use chrono::Days;
use crossterm::event::KeyCode;

use crate::app::ViewState;
use crate::calendar::RecordId;
use crate::sync::Message;
use crate::ui::week_view::{SLOT_MINUTES, WeekLayout, WeekOptions, slot_start};

#[derive(Debug)]
pub enum Action {
    None,
    Quit,
    Dispatch(Message),
    Move { id: RecordId, minutes: i64 },
    Resize { id: RecordId, minutes: i64 },
}

pub fn handle_key(
    key: KeyCode,
    view: &mut ViewState,
    layout: &WeekLayout,
    options: &WeekOptions,
) -> Action {
    match key {
        KeyCode::Char('h') | KeyCode::Left => step_day(view, options, false),
        KeyCode::Char('l') | KeyCode::Right => step_day(view, options, true),
        KeyCode::Char('j') | KeyCode::Down => move_slot_down(view, layout),
        KeyCode::Char('k') | KeyCode::Up => move_slot_up(view),
        KeyCode::Char('n') => step_week(view, options, true),
        KeyCode::Char('p') => step_week(view, options, false),
        KeyCode::Char('t') => jump_to_today(view, options),
        KeyCode::Char('a') => return open_new_reservation(view, options),
        KeyCode::Enter => return handle_enter_key(view, layout, options),
        KeyCode::Char('J') => return move_selected(view, layout, SLOT_MINUTES),
        KeyCode::Char('K') => return move_selected(view, layout, -SLOT_MINUTES),
        KeyCode::Char('+') => return resize_selected(view, layout, SLOT_MINUTES),
        KeyCode::Char('-') => return resize_selected(view, layout, -SLOT_MINUTES),
        KeyCode::Char('r') => return Action::Dispatch(Message::Reload),
        KeyCode::Char('?') => view.show_help = !view.show_help,
        KeyCode::Char('q') => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn step_day(view: &mut ViewState, options: &WeekOptions, forward: bool) {
    let mut date = view.selected_date;
    for _ in 0..7 {
        let next = if forward {
            date.checked_add_days(Days::new(1))
        } else {
            date.checked_sub_days(Days::new(1))
        };
        let Some(next) = next else {
            return;
        };
        date = next;
        if options.shows(date) {
            view.selected_date = date;
            return;
        }
    }
}

fn step_week(view: &mut ViewState, options: &WeekOptions, forward: bool) {
    let next = if forward {
        view.selected_date.checked_add_days(Days::new(7))
    } else {
        view.selected_date.checked_sub_days(Days::new(7))
    };
    if let Some(date) = next {
        view.selected_date = options.first_visible_from(date);
    }
}

fn jump_to_today(view: &mut ViewState, options: &WeekOptions) {
    view.selected_date = options.first_visible_from(chrono::Local::now().date_naive());
}

fn move_slot_down(view: &mut ViewState, layout: &WeekLayout) {
    if view.selected_slot + 1 < layout.slot_count {
        view.selected_slot += 1;
    }
}

fn move_slot_up(view: &mut ViewState) {
    view.selected_slot = view.selected_slot.saturating_sub(1);
}

fn open_new_reservation(view: &ViewState, options: &WeekOptions) -> Action {
    match slot_start(view.selected_date, view.selected_slot, options) {
        Some(start) => Action::Dispatch(Message::DateClicked(start)),
        None => Action::None,
    }
}

fn handle_enter_key(view: &ViewState, layout: &WeekLayout, options: &WeekOptions) -> Action {
    match layout.block_at(view.selected_date, view.selected_slot) {
        Some(block) => Action::Dispatch(Message::EventClicked(block.event_id.clone())),
        None => open_new_reservation(view, options),
    }
}

fn move_selected(view: &mut ViewState, layout: &WeekLayout, minutes: i64) -> Action {
    let Some(block) = layout.block_at(view.selected_date, view.selected_slot) else {
        return Action::None;
    };
    let id = block.event_id.clone();
    if minutes > 0 {
        move_slot_down(view, layout);
    } else {
        move_slot_up(view);
    }
    Action::Move { id, minutes }
}

fn resize_selected(view: &ViewState, layout: &WeekLayout, minutes: i64) -> Action {
    match layout.block_at(view.selected_date, view.selected_slot) {
        Some(block) => Action::Resize {
            id: block.event_id.clone(),
            minutes,
        },
        None => Action::None,
    }
}
