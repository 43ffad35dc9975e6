use importer::ImportTarget;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::AppState, ui::theme::Theme};

/// Renders the importer tabs. A `•` marks an importer with an upload in
/// flight, even when it is not the active one.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = Vec::new();
    spans.push(Span::raw(" ")); // Leading padding

    for (i, target) in ImportTarget::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  ")); // Gap between tabs
        }

        let label = target.label();
        if *target == state.active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }

        if state.widget(*target).is_uploading() {
            spans.push(Span::styled(" •", Style::default().fg(theme.warning)));
        }
    }

    let underline = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(theme.border),
    ));
    frame.render_widget(Paragraph::new(vec![Line::from(spans), underline]), area);
}
