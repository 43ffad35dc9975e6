use importer::{ImportFailure, ImportWidget, WidgetState, render_result};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, result_panel},
        theme::Theme,
    },
};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let widget = state.active_widget();

    // Rejections keep the current state, so the notice sits under any of them.
    let notice_height = if widget.notice().is_some() { 4 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(notice_height)])
        .split(area);

    match widget.state() {
        WidgetState::Idle => render_upload_area(frame, rows[0], widget, theme),
        WidgetState::Selected(_) => render_file_info(frame, rows[0], widget, theme),
        WidgetState::Uploading(_) => render_progress(frame, rows[0], widget, state.tick, theme),
        WidgetState::Finished(finished) => {
            let panel = render_result(&finished.outcome, widget.target());
            let title = format!(
                "{} · {}",
                finished.file_name,
                finished.finished_at.format("%H:%M:%S")
            );
            result_panel::render(frame, rows[0], &panel, &title, theme);
        }
    }
    if let Some(notice) = widget.notice() {
        render_notice(frame, rows[1], notice, theme);
    }
}

fn render_upload_area(frame: &mut Frame<'_>, area: Rect, widget: &ImportWidget, theme: &Theme) {
    let title = format!("Import {}", widget.target().label());
    let lines = vec![
        Line::from(Span::styled(
            "Drop a CSV file here, or type its path and press Enter",
            Style::default().fg(theme.text_muted),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("› ", Style::default().fg(theme.accent)),
            Span::styled(widget.input().to_string(), Style::default().fg(theme.text)),
            Span::styled("│", Style::default().fg(theme.accent)),
        ]),
    ];
    Card::new(&title, theme)
        .border(theme.border_focused)
        .render_with(frame, area, Paragraph::new(lines));
}

fn render_file_info(frame: &mut Frame<'_>, area: Rect, widget: &ImportWidget, theme: &Theme) {
    let Some(file) = widget.selected_file() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            file.name.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            file.display_size(),
            Style::default().fg(theme.text_muted),
        )),
        Line::default(),
    ];

    match widget.preview() {
        Some(Ok(preview)) => {
            lines.push(Line::from(vec![
                Span::styled("Columns: ", Style::default().fg(theme.text_muted)),
                Span::raw(preview.headers.join(", ")),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Rows: ", Style::default().fg(theme.text_muted)),
                Span::raw(preview.rows_label()),
            ]));
        }
        Some(Err(err)) => lines.push(Line::from(Span::styled(
            format!("Preview unavailable: {err}"),
            Style::default().fg(theme.warning),
        ))),
        None => {}
    }

    Card::new("Selected file", theme)
        .border(theme.accent)
        .render_with(frame, area, Paragraph::new(lines).wrap(Wrap { trim: false }));
}

fn render_progress(
    frame: &mut Frame<'_>,
    area: Rect,
    widget: &ImportWidget,
    tick: u64,
    theme: &Theme,
) {
    let spinner = SPINNER[(tick % SPINNER.len() as u64) as usize];
    let label = widget.file_label().unwrap_or_default();
    let lines = vec![Line::from(vec![
        Span::styled(format!("{spinner} "), Style::default().fg(theme.warning)),
        Span::raw(format!("Uploading {label}…")),
    ])];
    Card::new("Uploading", theme)
        .border(theme.warning)
        .render_with(frame, area, Paragraph::new(lines));
}

fn render_notice(frame: &mut Frame<'_>, area: Rect, notice: &ImportFailure, theme: &Theme) {
    let lines = vec![Line::from(Span::styled(
        notice.message.clone(),
        Style::default().fg(theme.text),
    ))];
    Card::new("Import Failed", theme)
        .border(theme.error)
        .render_with(frame, area, Paragraph::new(lines).wrap(Wrap { trim: false }));
}
