use crate::app::AppState;
use crate::domain::{format_duration, IdleDisposition, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{disabled_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, modal_title_style()))
        .style(modal_bg_style())
}

/// Render the "are you still working?" prompt
pub fn render_idle_check_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area, 14);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let now = app.now();
    let idle_for = app
        .idle_since
        .map(|since| now.signed_duration_since(since))
        .unwrap_or_else(chrono::Duration::zero);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  No activity for {}.", format_duration(idle_for, false))),
        Line::raw(""),
    ];

    // Anything that closes the interval needs both labels
    let can_stop = app.tracking.can_stop();
    for disposition in IdleDisposition::all() {
        let key = format!("  [{}]", disposition.key());
        if can_stop || !disposition.closes_interval() {
            lines.push(Line::from(vec![
                Span::styled(key, modal_title_style()),
                Span::raw(format!(" {}", disposition.name())),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{} {}", key, disposition.name()),
                disabled_style(),
            )));
        }
    }
    lines.push(Line::from(vec![
        Span::styled("  [a]", modal_title_style()),
        Span::raw(" Abort (record nothing)"),
    ]));

    if !can_stop {
        lines.push(Line::raw(""));
        lines.push(Line::raw("  Saving needs a task and client for this session."));
    }

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Are you still working? "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the delete confirmation for the selected interval
pub fn render_confirm_delete_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(interval) = app.pending_delete_interval() else {
        return;
    };
    let modal_area = create_modal_area(area, 8);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!(
            "  Delete {} for {} started {}?",
            interval.task,
            interval.client,
            interval.start.format("%Y-%m-%d %H:%M")
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Delete  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Delete Worked Time "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the task or client multi-select
pub fn render_filter_picker(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(picker) = &app.filter_picker else {
        return;
    };
    let title = if app.ui_mode == UiMode::FilterTasks {
        " Show Tasks "
    } else {
        " Show Clients "
    };

    let height = (picker.options.len() as u16).saturating_add(5).min(20);
    let modal_area = create_modal_area(area, height);
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    if picker.options.is_empty() {
        lines.push(Line::raw("  Nothing recorded yet"));
    }
    for (i, option) in picker.options.iter().enumerate() {
        let mark = if picker.selected.contains(option) { "[x]" } else { "[ ]" };
        let text = format!("  {} {}", mark, option);
        if i == picker.cursor {
            lines.push(Line::from(Span::styled(text, selected_style())));
        } else {
            lines.push(Line::raw(text));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("  Space toggle · a all · n none · Enter apply · Esc cancel"));

    let paragraph = Paragraph::new(lines)
        .block(modal_block(title))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
