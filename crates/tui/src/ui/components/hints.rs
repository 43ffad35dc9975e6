use importer::WidgetState;
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for the active importer, by lifecycle step.
pub fn for_state(state: &WidgetState) -> Vec<KeyHint> {
    match state {
        WidgetState::Idle => vec![
            KeyHint::new("Enter", "select"),
            KeyHint::new("Esc", "clear"),
        ],
        WidgetState::Selected(_) => vec![
            KeyHint::new("Enter/u", "upload"),
            KeyHint::new("x", "remove file"),
        ],
        WidgetState::Uploading(_) => vec![KeyHint::new("…", "waiting for server")],
        WidgetState::Finished(finished) if finished.outcome.is_success() => {
            vec![KeyHint::new("r", "import another file")]
        }
        WidgetState::Finished(_) => vec![KeyHint::new("r", "try again")],
    }
}

/// Global application shortcuts.
pub fn global() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Tab", "switch importer"),
        KeyHint::new("Ctrl+C", "quit"),
    ]
}
