//! Color palette shared by the TUI widgets

use ratatui::style::Color;

pub const BG_DARK: Color = Color::Rgb(22, 24, 30);
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_SECONDARY: Color = Color::Rgb(140, 140, 150);
pub const BORDER_COLOR: Color = Color::Rgb(70, 75, 90);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(130, 170, 255);
pub const ACCENT_WARN: Color = Color::Rgb(240, 180, 100);
pub const ROW_SELECTED: Color = Color::Rgb(45, 55, 80);
