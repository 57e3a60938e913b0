use crate::app::AppState;
use crate::domain::{Focus, IdleDisposition, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events
///
/// Returns `true` when the application should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingLabels => handle_label_form_mode(app, key),
        UiMode::EditingInterval => handle_interval_form_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
        UiMode::FilterTasks | UiMode::FilterClients => handle_filter_mode(app, key),
        UiMode::IdleCheck => handle_idle_check_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    app.clear_status();

    match key.code {
        // Start / stop / ask for labels, whichever applies
        KeyCode::Char(' ') => app.primary_action(),

        KeyCode::Char('s') => app.start_tracking(),
        KeyCode::Char('x') => app.stop_tracking(),
        KeyCode::Char('a') => app.abort_tracking(),
        KeyCode::Char('t') => app.open_label_form(),

        // Recent pairs by number
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_recent_pair(index);
        }

        KeyCode::Tab => app.toggle_focus(),

        KeyCode::Up => match app.focus {
            Focus::Tracker => app.move_recent_up(),
            Focus::History => app.move_history_up(),
        },
        KeyCode::Down => match app.focus {
            Focus::Tracker => app.move_recent_down(),
            Focus::History => app.move_history_down(),
        },
        KeyCode::Enter => match app.focus {
            Focus::Tracker => app.select_recent_pair(app.recent_selected),
            Focus::History => app.open_interval_editor(),
        },

        // History
        KeyCode::Char('e') => app.open_interval_editor(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('w') => app.cycle_window(),
        KeyCode::Char('T') => app.open_task_filter(),
        KeyCode::Char('C') => app.open_client_filter(),
        KeyCode::Char('r') => app.clear_filters(),
        KeyCode::Char('y') => app.copy_summary(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the task/client form
fn handle_label_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_label_form(),
        KeyCode::Esc => app.cancel_label_form(),
        // Accept completion, or switch field
        KeyCode::Tab => app.label_form_tab(),
        KeyCode::Up | KeyCode::Down | KeyCode::BackTab => app.label_form_toggle_field(),
        KeyCode::Backspace => app.label_form_backspace(),
        KeyCode::Char(c) => app.label_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the interval editor
fn handle_interval_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_interval_form(),
        KeyCode::Esc => app.cancel_interval_form(),
        KeyCode::Tab | KeyCode::Down => app.interval_form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.interval_form_prev_field(),
        KeyCode::Backspace => app.interval_form_backspace(),
        KeyCode::Char(c) => app.interval_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the task/client filter picker
fn handle_filter_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.filter_move_up(),
        KeyCode::Down => app.filter_move_down(),
        KeyCode::Char(' ') => app.filter_toggle(),
        KeyCode::Char('a') => app.filter_select_all(true),
        KeyCode::Char('n') => app.filter_select_all(false),
        KeyCode::Enter => app.apply_filter(),
        KeyCode::Esc => app.cancel_filter(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in idle check mode
fn handle_idle_check_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => app.abort_from_idle(),
        KeyCode::Char(c) => {
            if let Some(disposition) = IdleDisposition::from_key(c) {
                app.resolve_idle(disposition);
            }
        }
        // Dismissing the prompt keeps the session as it is
        KeyCode::Esc => app.resolve_idle(IdleDisposition::Continue),
        _ => {}
    }
    Ok(false)
}
