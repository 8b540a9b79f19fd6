//! Color theme for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub foreground: Color,
    pub muted: Color,

    // Interactive elements
    pub selected: Style,

    // Entry kinds
    pub directory: Style,
    pub file: Style,
    pub symlink: Style,
    pub missing: Style,

    // Status colors
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Style,
    pub title: Style,
    pub path_line: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Size bar and volume gauge
    pub bar_filled: Style,
    pub bar_empty: Style,
    pub gauge: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);

        let blue_400 = Color::Rgb(96, 165, 250);
        let amber_400 = Color::Rgb(251, 191, 36);
        let red_400 = Color::Rgb(248, 113, 113);
        let cyan_400 = Color::Rgb(34, 211, 238);
        let emerald_400 = Color::Rgb(52, 211, 153);

        Self {
            variant: ThemeVariant::Dark,
            foreground: slate_100,
            muted: slate_400,
            selected: Style::default()
                .bg(slate_700)
                .add_modifier(Modifier::BOLD),
            directory: Style::default().fg(blue_400).add_modifier(Modifier::BOLD),
            file: Style::default().fg(slate_100),
            symlink: Style::default().fg(cyan_400),
            missing: Style::default()
                .fg(slate_600)
                .add_modifier(Modifier::CROSSED_OUT),
            warning: amber_400,
            error: red_400,
            info: blue_400,
            border: Style::default().fg(slate_600),
            title: Style::default()
                .fg(slate_100)
                .add_modifier(Modifier::BOLD),
            path_line: Style::default().fg(slate_100).bg(slate_700),
            help_key: Style::default().fg(amber_400).add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(slate_400),
            bar_filled: Style::default().fg(emerald_400),
            bar_empty: Style::default().fg(slate_600),
            gauge: Style::default().fg(emerald_400).bg(slate_700),
        }
    }

    /// Light theme using the same palette inverted.
    pub fn light() -> Self {
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_800 = Color::Rgb(30, 41, 59);

        let blue_600 = Color::Rgb(37, 99, 235);
        let amber_600 = Color::Rgb(217, 119, 6);
        let red_600 = Color::Rgb(220, 38, 38);
        let cyan_600 = Color::Rgb(8, 145, 178);
        let emerald_600 = Color::Rgb(5, 150, 105);

        Self {
            variant: ThemeVariant::Light,
            foreground: slate_800,
            muted: slate_500,
            selected: Style::default()
                .bg(slate_300)
                .add_modifier(Modifier::BOLD),
            directory: Style::default().fg(blue_600).add_modifier(Modifier::BOLD),
            file: Style::default().fg(slate_800),
            symlink: Style::default().fg(cyan_600),
            missing: Style::default()
                .fg(slate_500)
                .add_modifier(Modifier::CROSSED_OUT),
            warning: amber_600,
            error: red_600,
            info: blue_600,
            border: Style::default().fg(slate_500),
            title: Style::default()
                .fg(slate_800)
                .add_modifier(Modifier::BOLD),
            path_line: Style::default().fg(slate_800).bg(slate_300),
            help_key: Style::default().fg(amber_600).add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(slate_500),
            bar_filled: Style::default().fg(emerald_600),
            bar_empty: Style::default().fg(slate_300),
            gauge: Style::default().fg(emerald_600).bg(slate_300),
        }
    }

    /// Switch between dark and light.
    pub fn toggle(&self) -> Self {
        match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
        }
    }

    /// Style for the alert header of a given severity color.
    pub fn alert_title(&self, color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        let theme = Theme::dark();
        assert_eq!(theme.variant, ThemeVariant::Dark);
        let theme = theme.toggle();
        assert_eq!(theme.variant, ThemeVariant::Light);
        let theme = theme.toggle();
        assert_eq!(theme.variant, ThemeVariant::Dark);
    }
}
