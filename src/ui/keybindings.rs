use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{error_style, hint_style, info_style};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the keys that mean something in `mode`
fn hints(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " space start/stop   s start   t task   x stop   a abort   1-9 recent   tab focus   \
             ↑/↓ select   e edit   d delete   w window   T/C filter   r reset   y copy summary   q quit"
        }
        UiMode::EditingLabels => " type to edit   tab complete/switch   enter start   esc cancel",
        UiMode::EditingInterval => " type to edit   tab/↑/↓ field   enter save   esc cancel",
        UiMode::ConfirmDelete => " y delete   n keep",
        UiMode::FilterTasks | UiMode::FilterClients => " ↑/↓ move   space toggle   a all   n none   enter apply   esc cancel",
        UiMode::IdleCheck => " c continue   d continue, discard idle   x stop, discard idle   s stop, keep all   a abort",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(hints(app.ui_mode)).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the last message or error
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let style = if status.is_error { error_style() } else { info_style() };
    let paragraph = Paragraph::new(Line::styled(format!(" {}", status.text), style));
    f.render_widget(paragraph, area);
}
