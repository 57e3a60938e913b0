use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// One labelled text field; the active one gets a cursor and an optional
/// greyed-out completion
fn field_lines<'a>(label: &'a str, value: &'a str, active: bool, completion: Option<&'a str>) -> Vec<Line<'a>> {
    let label = if active {
        format!("{} (editing)", label)
    } else {
        label.to_string()
    };

    let mut value_line = vec![Span::raw("> "), Span::styled(value, modal_title_style())];
    if active {
        if let Some(rest) = completion.and_then(|c| c.get(value.len()..)) {
            value_line.push(Span::styled(rest, hint_style()));
        }
        value_line.push(Span::styled("█", modal_title_style())); // Cursor
    }

    vec![Line::raw(label), Line::from(value_line), Line::raw("")]
}

/// Render the task/client form
pub fn render_label_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.label_form else {
        return;
    };
    let modal_area = create_modal_area(area, 12);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let completion = app.label_completion();
    let completion = completion.as_deref();

    let mut lines = vec![Line::raw("")];
    lines.extend(field_lines("Task:", &form.task, form.editing_field == 0, completion));
    lines.extend(field_lines("Client:", &form.client, form.editing_field == 1, completion));
    lines.push(Line::raw("Tab complete/switch  ·  Enter to start  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Choose Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the worked interval editor
pub fn render_interval_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.interval_form else {
        return;
    };
    let modal_area = create_modal_area(area, 16);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    lines.extend(field_lines("Task:", &form.task, form.editing_field == 0, None));
    lines.extend(field_lines("Client:", &form.client, form.editing_field == 1, None));
    lines.extend(field_lines("Start (YYYY-MM-DD HH:MM:SS):", &form.start, form.editing_field == 2, None));
    lines.extend(field_lines("End (YYYY-MM-DD HH:MM:SS):", &form.end, form.editing_field == 3, None));
    lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Edit Worked Time ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
