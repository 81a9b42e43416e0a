use api_types::caixa::Status;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Formats an amount as shown everywhere in the view: `R$ 1000.00`.
///
/// Always two decimals; no thousands separator.
#[must_use]
pub fn format_brl(value: f64) -> String {
    // `-0.0` would print as `-0.00`.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("R$ {value:.2}")
}

/// Net total in bold, red when negative.
#[must_use]
pub fn styled_total(value: f64, theme: &Theme) -> Span<'static> {
    let color = if value < 0.0 { theme.error } else { theme.text };
    Span::styled(
        format_brl(value),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Background colour marking an entry as income or expense.
#[must_use]
pub fn status_color(status: Status, theme: &Theme) -> Color {
    match status {
        Status::Receita => theme.income,
        Status::Despesa => theme.expense,
    }
}

#[must_use]
pub fn status_style(status: Status, theme: &Theme) -> Style {
    Style::default()
        .bg(status_color(status, theme))
        .fg(Color::Black)
}
