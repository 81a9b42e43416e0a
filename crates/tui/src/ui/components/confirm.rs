use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::LedgerState,
    ui::{
        components::{centered_box, money::format_brl},
        theme::Theme,
    },
};

/// Delete confirmation ("Confirma?"). Nothing is sent until the user accepts.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let Some(id) = state.confirm_delete else {
        return;
    };

    let subject = state
        .entries()
        .iter()
        .find(|caixa| caixa.id == id)
        .map(|caixa| format!("{}  {}", caixa.tipo, format_brl(caixa.valor)))
        .unwrap_or_else(|| format!("#{id}"));

    let popup = centered_box(40, 6, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Excluir ", Style::default().fg(theme.error)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));

    let lines = vec![
        Line::from(Span::styled(
            "Confirma?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(subject),
        Line::from(vec![
            Span::styled("s", Style::default().fg(theme.accent)),
            Span::raw(" sim  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" não"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}
