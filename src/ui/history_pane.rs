use crate::app::AppState;
use crate::domain::{end_label, format_duration, Focus, StartFormat};
use crate::ui::styles::{
    border_style, client_style, default_style, focused_border_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Pane title: window name plus any active filters
fn history_title(app: &AppState) -> String {
    let mut title = format!(" History · {} ", app.history.window.name());
    if let Some(tasks) = &app.history.tasks {
        title.push_str(&format!("· {} task(s) ", tasks.len()));
    }
    if let Some(clients) = &app.history.clients {
        title.push_str(&format!("· {} client(s) ", clients.len()));
    }
    if app.store.needs_save() {
        title.push_str("· unsaved ");
    }
    title
}

/// Render the list of worked intervals in the current selection
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { focused_border_style() } else { border_style() })
        .title(Span::styled(history_title(app), title_style()));

    let rows = &app.history.rows;
    if rows.is_empty() {
        let message = if app.store.is_empty() {
            "Nothing recorded yet"
        } else {
            "No worked time in this selection"
        };
        let empty = Paragraph::new(message).style(default_style()).block(block);
        f.render_widget(empty, area);
        return;
    }

    let start_format = StartFormat::for_intervals(rows);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|interval| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{} – {}  {}  ",
                    start_format.format(interval.start),
                    end_label(interval),
                    format_duration(interval.duration(), false)
                )),
                Span::raw(interval.task.as_str()),
                Span::raw(" · "),
                Span::styled(interval.client.as_str(), client_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if focused {
        selected_style()
    } else {
        default_style()
    });

    let mut state = ListState::default();
    state.select(Some(app.history.selected));
    f.render_stateful_widget(list, area, &mut state);
}
