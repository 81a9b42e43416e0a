use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{DraftField, Focus, LedgerState},
    ui::{
        components::{
            card::{Card, StatCard},
            money::{format_brl, status_style, styled_total},
        },
        theme::Theme,
    },
};

/// Height of the create form panel, borders included.
pub const FORM_HEIGHT: u16 = 5;

pub fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let (total, receitas, despesas) = state
        .snapshot
        .as_ref()
        .map(|snap| (snap.valor_total, snap.receitas, snap.despesas))
        .unwrap_or((0.0, 0.0, 0.0));
    let plain = |value: f64| Span::styled(format_brl(value), Style::default().fg(theme.text));

    StatCard::new("Valor total", styled_total(total, theme), theme).render(frame, columns[0]);
    StatCard::new("Receitas", plain(receitas), theme).render(frame, columns[1]);
    StatCard::new("Despesas", plain(despesas), theme).render(frame, columns[2]);
}

pub fn render_search(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let focused = state.focus == Focus::Search;
    let block = Card::new("Buscar", theme).focused(focused).block();

    let input = if state.filter_input.is_empty() && !focused {
        Span::styled("Digite algo ...", Style::default().fg(theme.dim))
    } else {
        input_span(&state.filter_input, focused, theme)
    };

    let toggle = if state.form_visible {
        Span::styled("[a] Cancelar", Style::default().fg(theme.error))
    } else {
        Span::styled("[a] Adicionar", Style::default().fg(theme.positive))
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(inner);
    frame.render_widget(Paragraph::new(Line::from(input)), row[0]);
    frame.render_widget(Paragraph::new(Line::from(toggle)), row[1]);
}

pub fn render_form(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let focused_field = match state.focus {
        Focus::Form(field) => Some(field),
        _ => None,
    };
    let title = if state.is_creating() {
        "Cadastrar (enviando…)"
    } else {
        "Cadastrar"
    };
    let block = Card::new(title, theme)
        .focused(focused_field.is_some())
        .block();

    let label = |text: &'static str, field: DraftField| {
        let style = if focused_field == Some(field) {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.dim)
        };
        Span::styled(format!("{text:<8}"), style)
    };

    let status = state.draft.status;
    let status_focused = focused_field == Some(DraftField::Status);
    let status_value = if status_focused {
        format!("◀ {} ▶", status.label())
    } else {
        status.label().to_string()
    };

    let lines = vec![
        Line::from(vec![
            label("Tipo:", DraftField::Tipo),
            input_span(
                &state.draft.tipo,
                focused_field == Some(DraftField::Tipo),
                theme,
            ),
        ]),
        Line::from(vec![
            label("Valor:", DraftField::Valor),
            input_span(
                &state.draft.valor,
                focused_field == Some(DraftField::Valor),
                theme,
            ),
        ]),
        Line::from(vec![
            label("Status:", DraftField::Status),
            Span::styled(format!(" {status_value} "), status_style(status, theme)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_table(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let header = Row::new(["Tipo", "Valor", "Status", ""]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.entries().iter().enumerate().map(|(index, caixa)| {
        let action = if state.is_deleting(caixa.id) {
            Span::styled("excluindo…", Style::default().fg(theme.dim))
        } else if index == state.selected && state.focus == Focus::Table {
            Span::styled("[d] Excluir", Style::default().fg(theme.error))
        } else {
            Span::raw("")
        };

        Row::new(vec![
            Cell::from(caixa.tipo.clone()),
            Cell::from(format_brl(caixa.valor)),
            Cell::from(caixa.status.label()).style(status_style(caixa.status, theme)),
            Cell::from(action),
        ])
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(12),
    ];

    let title = if state.loading { "Extrato (carregando…)" } else { "Extrato" };
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(Card::new(title, theme).focused(state.focus == Focus::Table).block())
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !state.entries().is_empty() {
        table_state.select(Some(state.selected));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Editable text with a cursor bar when focused.
fn input_span(value: &str, focused: bool, theme: &Theme) -> Span<'static> {
    if focused {
        Span::styled(format!("{value}│"), Style::default().fg(theme.accent))
    } else {
        Span::styled(value.to_string(), Style::default().fg(theme.text))
    }
}
