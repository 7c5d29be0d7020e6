use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{FormBuffer, FormEdit, FormField};
use crate::calendar::{RecordId, Team};
use crate::sync::Message;

/// Maps a key press inside the reservation form to the message it stands for.
pub fn handle_key(key: KeyEvent, form: &FormBuffer, teams: &[Team]) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => Some(Message::DeleteRequested),
            KeyCode::Char('s') => Some(Message::FormSubmitted),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Message::FormCancelled),
        KeyCode::Enter => Some(Message::FormSubmitted),
        KeyCode::Tab => Some(Message::FormFocusNext),
        KeyCode::BackTab => Some(Message::FormFocusPrev),
        KeyCode::Left if form.active_field == FormField::Team => {
            Some(team_edit(cycle_team(form.team.as_ref(), teams, false)))
        }
        KeyCode::Right | KeyCode::Char(' ') if form.active_field == FormField::Team => {
            Some(team_edit(cycle_team(form.team.as_ref(), teams, true)))
        }
        KeyCode::Backspace if form.active_field == FormField::Team => Some(team_edit(None)),
        KeyCode::Backspace => {
            let mut text = form.text(form.active_field).to_string();
            text.pop();
            text_edit(form.active_field, text)
        }
        KeyCode::Char(c) => {
            let mut text = form.text(form.active_field).to_string();
            text.push(c);
            text_edit(form.active_field, text)
        }
        _ => None,
    }
}

fn team_edit(team: Option<RecordId>) -> Message {
    Message::FormEdited(FormEdit::Team(team))
}

fn text_edit(field: FormField, text: String) -> Option<Message> {
    let edit = match field {
        FormField::Subject => FormEdit::Subject(text),
        FormField::Start => FormEdit::Start(text),
        FormField::End => FormEdit::End(text),
        FormField::Team => return None,
    };
    Some(Message::FormEdited(edit))
}

pub fn cycle_team(current: Option<&RecordId>, teams: &[Team], forward: bool) -> Option<RecordId> {
    if teams.is_empty() {
        return None;
    }
    let position = current.and_then(|id| teams.iter().position(|t| &t.id == id));
    let index = match (position, forward) {
        (None, true) => 0,
        (None, false) => teams.len() - 1,
        (Some(i), true) => (i + 1) % teams.len(),
        (Some(i), false) => (i + teams.len() - 1) % teams.len(),
    };
    Some(teams[index].id.clone())
}
