use crate::app::AppState;
use crate::domain::{format_duration, Focus, PrimaryAction, TrackingStatus};
use crate::ui::styles::{
    border_style, default_style, disabled_style, focused_border_style, idle_style, key_style, title_style,
    tracking_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// What the space key will do, for the controls line
fn primary_label(action: PrimaryAction) -> &'static str {
    match action {
        PrimaryAction::Start => "Start",
        PrimaryAction::Stop => "Stop",
        PrimaryAction::OpenDialog => "Choose task",
    }
}

/// `[k] Label` styled by whether the control is usable
fn control<'a>(key: &'a str, label: &'a str, enabled: bool) -> Vec<Span<'a>> {
    if enabled {
        vec![Span::styled(key, key_style()), Span::raw(format!(" {}  ", label))]
    } else {
        vec![
            Span::styled(key, disabled_style()),
            Span::styled(format!(" {}", label), disabled_style()),
            Span::raw("  "),
        ]
    }
}

/// Render the tracker: status, labels, elapsed time and the usable controls
pub fn render_tracker_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let tracking = &app.tracking;
    let mut lines = Vec::new();

    // Status
    let status_style = match tracking.status() {
        TrackingStatus::Tracking => tracking_style(),
        TrackingStatus::Idle => idle_style(),
    };
    lines.push(Line::from(Span::styled(tracking.status().label(), status_style)));

    // Labels
    let task = if tracking.task().is_empty() { "(none)" } else { tracking.task() };
    let client = if tracking.client().is_empty() { "(none)" } else { tracking.client() };
    lines.push(Line::from(vec![Span::styled("On:  ", title_style()), Span::raw(task)]));
    lines.push(Line::from(vec![Span::styled("For: ", title_style()), Span::raw(client)]));

    // Start and elapsed
    match tracking.start_time() {
        Some(start) => {
            lines.push(Line::from(vec![
                Span::styled("Since: ", title_style()),
                Span::raw(start.format("%H:%M").to_string()),
                Span::raw("  "),
                Span::styled(format_duration(tracking.elapsed(app.now()), true), tracking_style()),
            ]));
        }
        None => lines.push(Line::from(Span::styled("Since: -", default_style()))),
    }
    lines.push(Line::raw(""));

    // Controls
    let enabled = tracking.enablement();
    lines.push(Line::from(vec![
        Span::styled("[space]", key_style()),
        Span::raw(format!(" {}", primary_label(tracking.primary_action()))),
    ]));

    let mut row = control("[s]", "Start", enabled.can_start);
    row.extend(control("[t]", "Task", enabled.can_set_task));
    lines.push(Line::from(row));
    let mut row = control("[x]", "Stop", enabled.can_stop);
    row.extend(control("[a]", "Abort", enabled.can_abort));
    lines.push(Line::from(row));

    let border = if app.focus == Focus::Tracker {
        focused_border_style()
    } else {
        border_style()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(" Tracker ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
