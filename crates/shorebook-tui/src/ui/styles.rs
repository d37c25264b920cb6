use ratatui::style::{Color, Modifier, Style};

use shorebook_core::ToastKind;

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 144, 176);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const WARNING: Color = Color::Rgb(208, 176, 48);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn price_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn button_style(focused: bool, processing: bool) -> Style {
    if processing {
        Style::default().fg(MUTED).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default()
            .fg(Color::White)
            .bg(PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    }
}

pub fn toast_style(kind: ToastKind) -> Style {
    let color = match kind {
        ToastKind::Success => SECONDARY,
        ToastKind::Error => ERROR,
        ToastKind::Warning => WARNING,
        ToastKind::Info => PRIMARY,
    };
    Style::default().fg(color)
}
