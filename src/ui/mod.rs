pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod recent_pane;
pub mod styles;
pub mod summary_pane;
pub mod tracker_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use history_pane::render_history_pane;
use input_form::{render_interval_form, render_label_form};
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use modal::{render_confirm_delete_modal, render_filter_picker, render_idle_check_modal};
use ratatui::Frame;
use recent_pane::render_recent_pane;
use summary_pane::render_summary_pane;
use tracker_pane::render_tracker_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);

    // Render panes
    render_tracker_pane(f, app, layout.tracker_area);
    render_recent_pane(f, app, layout.recent_area);
    render_history_pane(f, app, layout.history_area);
    render_summary_pane(f, app, layout.summary_area);
    render_status_line(f, app, layout.status_area);

    // Render the dialog for the current mode on top
    match app.ui_mode {
        UiMode::Normal => {}
        UiMode::EditingLabels => render_label_form(f, app, size),
        UiMode::EditingInterval => render_interval_form(f, app, size),
        UiMode::ConfirmDelete => render_confirm_delete_modal(f, app, size),
        UiMode::FilterTasks | UiMode::FilterClients => render_filter_picker(f, app, size),
        UiMode::IdleCheck => render_idle_check_modal(f, app, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TrackingState, WorkedInterval, WorkedTimeStore};
    use crate::persistence::Settings;
    use chrono::{Duration, Local};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn create_test_app() -> AppState {
        let mut store = WorkedTimeStore::in_memory();
        let now = Local::now();
        store
            .append(WorkedInterval::new(now - Duration::minutes(2), now - Duration::minutes(1), "Docs", "Acme").unwrap())
            .unwrap();
        AppState::new(TrackingState::new(), store, Settings::default())
    }

    #[test]
    fn test_render_idle_screen() {
        let app = create_test_app();
        let screen = draw(&app);
        assert!(screen.contains("Not working"));
        assert!(screen.contains("Recent"));
        assert!(screen.contains("Docs"));
        assert!(screen.contains("Summary"));
    }

    #[test]
    fn test_render_tracking_and_dialogs() {
        let mut app = create_test_app();
        app.start_tracking();
        assert!(draw(&app).contains("Working"));

        app.open_label_form();
        assert!(draw(&app).contains("Choose Task"));
        app.cancel_label_form();

        app.ui_mode = UiMode::IdleCheck;
        app.idle_since = app.tracking.start_time();
        let screen = draw(&app);
        assert!(screen.contains("Are you still working?"));
        assert!(screen.contains("Saving needs a task and client"));
    }
}
