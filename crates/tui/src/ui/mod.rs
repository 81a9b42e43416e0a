pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::LedgerState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &LedgerState, endpoint: &str) {
    let theme = Theme::default();
    let area = frame.area();

    let form_height = if state.form_visible {
        screens::ledger::FORM_HEIGHT
    } else {
        0
    };

    // Info bar, totals, search, optional form, table, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(form_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, endpoint, &theme);
    screens::ledger::render_totals(frame, layout[1], state, &theme);
    screens::ledger::render_search(frame, layout[2], state, &theme);
    if state.form_visible {
        screens::ledger::render_form(frame, layout[3], state, &theme);
    }
    screens::ledger::render_table(frame, layout[4], state, &theme);
    render_bottom_bar(frame, layout[5], state, &theme);

    components::confirm::render(frame, area, state, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &LedgerState,
    endpoint: &str,
    theme: &Theme,
) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let filter = if state.filter.is_empty() {
        "-"
    } else {
        state.filter.as_str()
    };

    let line = Line::from(vec![
        Span::styled(
            "Fluxo de caixa",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(theme.dim)),
        Span::raw(format!(": {endpoint}  ")),
        Span::styled("Filtro", Style::default().fg(theme.dim)),
        Span::raw(format!(": {filter}  ")),
        Span::styled("Atualizado", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let hints = components::hints::for_state(state);
    let bar = Paragraph::new(Line::from(components::hints::hints_to_spans(&hints, theme)));
    frame.render_widget(bar, area);
}
