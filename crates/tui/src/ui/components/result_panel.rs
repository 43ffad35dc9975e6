use importer::{Emphasis, MAX_ERROR_DETAILS, ResultPanel, Tone};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ui::{components::card::Card, theme::Theme};

pub fn tone_color(tone: Tone, theme: &Theme) -> Color {
    match tone {
        Tone::Success => theme.positive,
        Tone::Warning => theme.warning,
        Tone::Danger => theme.error,
    }
}

fn emphasis_color(emphasis: Emphasis, theme: &Theme) -> Color {
    match emphasis {
        Emphasis::Positive => theme.positive,
        Emphasis::Info => theme.info,
        Emphasis::Neutral => theme.accent,
        Emphasis::Negative => theme.error,
        Emphasis::Muted => theme.text_muted,
    }
}

pub fn panel_lines(panel: &ResultPanel, theme: &Theme) -> Vec<Line<'static>> {
    let tone = Style::default().fg(tone_color(panel.tone, theme));
    let muted = Style::default().fg(theme.text_muted);
    let mut lines = vec![Line::from(Span::styled(
        panel.heading,
        tone.add_modifier(Modifier::BOLD),
    ))];

    if let Some(message) = &panel.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.text),
        )));
    }

    if !panel.counters.is_empty() {
        lines.push(Line::default());
        let mut spans = Vec::new();
        for (i, counter) in panel.counters.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("   │   ", Style::default().fg(theme.border)));
            }
            spans.push(Span::styled(
                counter.value.to_string(),
                Style::default()
                    .fg(emphasis_color(counter.emphasis, theme))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {}", counter.label), muted));
        }
        lines.push(Line::from(spans));
    }

    if !panel.error_summary.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Error Summary:",
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )));
        for (kind, count) in &panel.error_summary {
            lines.push(Line::from(format!("  • {kind}: {count}")));
        }
    }

    if !panel.error_details.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Import Errors (showing first {MAX_ERROR_DETAILS}):"),
            Style::default().fg(theme.warning),
        )));
        for detail in &panel.error_details {
            lines.push(Line::from(Span::styled(format!("  • {detail}"), muted)));
        }
        if panel.hidden_errors > 0 {
            lines.push(Line::from(Span::styled(
                format!("  … and {} more", panel.hidden_errors),
                muted,
            )));
        }
    }

    if !panel.hints.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Common Issues:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for hint in &panel.hints {
            lines.push(Line::from(format!("  • {hint}")));
        }
    }

    lines.push(Line::default());
    let mut actions = vec![
        Span::styled("r", Style::default().fg(theme.accent)),
        Span::raw(format!(" {}", panel.retry_label)),
    ];
    for link in &panel.links {
        actions.push(Span::styled("   │   ", Style::default().fg(theme.border)));
        actions.push(Span::styled(
            format!("{} ({})", link.label, link.path),
            muted,
        ));
    }
    lines.push(Line::from(actions));

    lines
}

/// Renders the panel in a card bordered with the tone color.
pub fn render(frame: &mut Frame<'_>, area: Rect, panel: &ResultPanel, title: &str, theme: &Theme) {
    let card = Card::new(title, theme).border(tone_color(panel.tone, theme));
    let content = Paragraph::new(panel_lines(panel, theme)).wrap(Wrap { trim: false });
    card.render_with(frame, area, content);
}
