use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{
    border_style, client_style, default_style, disabled_style, focused_border_style, key_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the most recently used (task, client) pairs for quick switching
pub fn render_recent_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let border = if app.focus == Focus::Tracker {
        focused_border_style()
    } else {
        border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Recent ", title_style()));

    let pairs = app.recent_pairs();
    if pairs.is_empty() {
        let empty = Paragraph::new("Nothing recorded yet").style(default_style()).block(block);
        f.render_widget(empty, area);
        return;
    }

    // Choosing a pair is only possible while labels may be set
    let usable = app.tracking.can_set_task();
    let items: Vec<ListItem> = pairs
        .iter()
        .enumerate()
        .map(|(i, (task, client))| {
            let line = if usable {
                Line::from(vec![
                    Span::styled(format!("{} ", i + 1), key_style()),
                    Span::raw(task.as_str()),
                    Span::raw(" · "),
                    Span::styled(client.as_str(), client_style()),
                ])
            } else {
                Line::from(Span::styled(format!("{} {} · {}", i + 1, task, client), disabled_style()))
            };
            if app.focus == Focus::Tracker && i == app.recent_selected {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
