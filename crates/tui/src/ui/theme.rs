use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub surface: Color,
    pub positive: Color,
    pub error: Color,
    /// Background of the status cell of an income row.
    pub income: Color,
    /// Background of the status cell of an expense row.
    pub expense: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(70, 80, 90),
            border_focused: Color::Rgb(80, 160, 160),
            surface: Color::Rgb(20, 26, 32),
            positive: Color::Rgb(110, 190, 120),
            error: Color::Rgb(200, 80, 80),
            income: Color::Rgb(0x8a, 0xab, 0xe0),
            expense: Color::Rgb(255, 0, 0),
        }
    }
}
