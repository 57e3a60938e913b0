use crate::app::AppState;
use crate::domain::format_duration;
use crate::ui::styles::{border_style, default_style, title_style, tracking_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render per-task totals for the current history selection
pub fn render_summary_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let summary = app.summary();
    let mut lines = Vec::new();

    let width = summary.by_task.keys().map(|task| task.chars().count()).max().unwrap_or(0);
    for (task, duration) in &summary.by_task {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<width$}  ", task, width = width)),
            Span::styled(format_duration(*duration, true), default_style()),
        ]));
    }
    if !summary.by_task.is_empty() {
        lines.push(Line::raw(""));
    }

    // Total, with the open session as a secondary figure
    let mut total = vec![
        Span::styled("Total ", title_style()),
        Span::raw(format_duration(summary.grand_total, true)),
    ];
    if let Some(running) = app.running_elapsed() {
        total.push(Span::styled(
            format!("  (+{} running)", format_duration(running, true)),
            tracking_style(),
        ));
    }
    lines.push(Line::from(total));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Summary ", title_style())),
    );

    f.render_widget(paragraph, area);
}
