pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use importer::WidgetState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar (label + underline)
            Constraint::Min(0),    // Importer
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state, &theme);
    screens::import::render(frame, layout[2], state, &theme);
    render_bottom_bar(frame, layout[3], state, &theme);
}

pub fn status_label(state: &WidgetState) -> &'static str {
    match state {
        WidgetState::Idle => "waiting for file",
        WidgetState::Selected(_) => "ready",
        WidgetState::Uploading(_) => "uploading",
        WidgetState::Finished(finished) if finished.outcome.is_success() => "done",
        WidgetState::Finished(_) => "failed",
    }
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let widget = state.active_widget();
    let status = status_label(widget.state());
    let status_style = match widget.state() {
        WidgetState::Finished(finished) if !finished.outcome.is_success() => {
            Style::default().fg(theme.error)
        }
        WidgetState::Finished(_) => Style::default().fg(theme.positive),
        WidgetState::Uploading(_) => Style::default().fg(theme.warning),
        _ => Style::default().fg(theme.text),
    };

    let line = Line::from(vec![
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Import", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", widget.target().label())),
        Span::styled("Status", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(
        &components::hints::for_state(state.active_widget().state()),
        theme,
    );

    parts.push(components::hints::hint_separator(theme));
    parts.extend(components::hints::hints_to_spans(
        &components::hints::global(),
        theme,
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
