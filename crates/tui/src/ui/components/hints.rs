use ratatui::{style::Style, text::Span};

use crate::{
    app::{DraftField, Focus, LedgerState},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Hints for whatever currently receives key presses.
pub fn for_state(state: &LedgerState) -> Vec<KeyHint> {
    if state.confirm_delete.is_some() {
        return vec![KeyHint::new("s", "sim"), KeyHint::new("n", "não")];
    }

    match state.focus {
        Focus::Table => {
            let toggle = if state.form_visible {
                KeyHint::new("a", "Cancelar")
            } else {
                KeyHint::new("a", "Adicionar")
            };
            vec![
                KeyHint::new("/", "Buscar"),
                toggle,
                KeyHint::new("↑↓", "selecionar"),
                KeyHint::new("d", "Excluir"),
                KeyHint::new("r", "atualizar"),
                KeyHint::new("q", "sair"),
            ]
        }
        Focus::Search => vec![
            KeyHint::new("Enter", "Buscar"),
            KeyHint::new("Esc", "voltar"),
        ],
        Focus::Form(DraftField::Status) => vec![
            KeyHint::new("Espaço", "Receita/Despesa"),
            KeyHint::new("Tab", "próximo"),
            KeyHint::new("Enter", "Cadastrar"),
            KeyHint::new("Esc", "Cancelar"),
        ],
        Focus::Form(_) => vec![
            KeyHint::new("Tab", "próximo"),
            KeyHint::new("Enter", "Cadastrar"),
            KeyHint::new("Esc", "Cancelar"),
        ],
    }
}
