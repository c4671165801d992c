use ratatui::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    /// Colors cycled through for project labels
    pub project_palette: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            project_palette: vec![
                Color::Rgb(0x44, 0x88, 0xFF),
                Color::Rgb(0x44, 0xDD, 0xFF),
                Color::Rgb(0x44, 0xFF, 0x88),
                Color::Rgb(0xFF, 0xD7, 0x00),
                Color::Rgb(0xCC, 0x66, 0xFF),
            ],
        }
    }
}

impl Theme {
    /// Stable color for a project label. The default project stays dim.
    pub fn project_color(&self, project: &str) -> Color {
        if project == crate::model::DEFAULT_PROJECT || self.project_palette.is_empty() {
            return self.dim;
        }
        let hash = project
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        self.project_palette[hash % self.project_palette.len()]
    }
}
