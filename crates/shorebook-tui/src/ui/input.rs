//! Keyboard input handling for the TUI.
//!
//! Translates key events into booking form operations. Pickers capture the
//! keyboard while open; Escape is the universal dismissal signal.

use anyhow::Result;
use chrono::Days;
use crossterm::event::{KeyCode, KeyEvent};

use shorebook_core::booking::Picker;

use crate::app::{App, AppState, FormField};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.cancel_submission();
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // An open picker captures the keyboard until dismissed
    if app.form.open_picker_kind().is_some() {
        handle_picker_input(app, key);
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Esc => {
            // Escape cancels an in-flight booking, otherwise dismisses the
            // oldest toast
            if !app.cancel_submission() {
                app.toasts.dismiss_oldest();
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus = app.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus = app.focus.prev();
        }
        KeyCode::Enter => match app.focus {
            FormField::BookButton => app.begin_submit(),
            _ => app.open_focused_picker(),
        },
        KeyCode::Char(c) => handle_typed_char(app, c),
        KeyCode::Backspace => handle_backspace(app),
        _ => {}
    }

    Ok(false)
}

/// Direct typing into the numeric fields, mirroring the digit-filtered text
/// inputs: the controller ignores anything that is not a digit string.
fn handle_typed_char(app: &mut App, c: char) {
    match app.focus {
        FormField::Guests => {
            let input = format!("{}{}", app.form.draft().guests.text(), c);
            app.form.set_guests(&input);
        }
        FormField::Rooms => {
            let input = format!("{}{}", app.form.draft().rooms.text(), c);
            app.form.set_rooms(&input);
        }
        _ => {}
    }
}

fn handle_backspace(app: &mut App) {
    match app.focus {
        FormField::Guests => {
            let mut input = app.form.draft().guests.text();
            input.pop();
            app.form.set_guests(&input);
        }
        FormField::Rooms => {
            let mut input = app.form.draft().rooms.text();
            input.pop();
            app.form.set_rooms(&input);
        }
        _ => {}
    }
}

fn handle_picker_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.form.close_pickers();
        }
        KeyCode::Enter => {
            // Committing a selection also closes the picker
            app.commit_picker();
        }
        _ => match app.form.open_picker_kind() {
            Some(Picker::CheckIn) => handle_date_picker(app, key, true),
            Some(Picker::CheckOut) => handle_date_picker(app, key, false),
            Some(Picker::Guests) | Some(Picker::Rooms) => handle_number_picker(app, key),
            Some(Picker::RoomType) => handle_room_picker(app, key),
            None => {}
        },
    }
}

fn handle_date_picker(app: &mut App, key: KeyEvent, is_check_in: bool) {
    let min = if is_check_in {
        app.min_check_in()
    } else {
        app.min_check_out()
    };

    let date = app.picker_date;
    app.picker_date = match key.code {
        KeyCode::Left => date.checked_sub_days(Days::new(1)).unwrap_or(date),
        KeyCode::Right => date.checked_add_days(Days::new(1)).unwrap_or(date),
        KeyCode::Up => date.checked_sub_days(Days::new(7)).unwrap_or(date),
        KeyCode::Down => date.checked_add_days(Days::new(7)).unwrap_or(date),
        _ => date,
    }
    .max(min);
}

fn handle_number_picker(app: &mut App, key: KeyEvent) {
    let max = app.picker_number_max();
    let n = app.picker_number;
    app.picker_number = match key.code {
        KeyCode::Left => n.saturating_sub(1),
        KeyCode::Right => n.saturating_add(1),
        KeyCode::Up => n.saturating_sub(5),
        KeyCode::Down => n.saturating_add(5),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            // Typing jumps straight to that value
            c.to_digit(10).unwrap_or(n)
        }
        _ => n,
    }
    .clamp(1, max);
}

fn handle_room_picker(app: &mut App, key: KeyEvent) {
    let count = app.catalog.room_count();
    if count == 0 {
        return;
    }
    match key.code {
        KeyCode::Up => {
            app.picker_room = app.picker_room.saturating_sub(1);
        }
        KeyCode::Down => {
            app.picker_room = (app.picker_room + 1).min(count - 1);
        }
        _ => {}
    }
}
