//! Theme for the orb viewer
//! Always dark: the orb is designed against a black backdrop

use iced::color;
use iced::widget::{button, container, slider};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// ============================================================================
// Color Palette
// ============================================================================

/// Window background
pub const BACKGROUND: Color = color!(0x000000);

/// Controls panel surface
pub const SURFACE: Color = color!(0x121212);

/// Hovered surface
pub const SURFACE_HOVER: Color = color!(0x2a2a2a);

/// Subtle divider / border
pub const BORDER: Color = color!(0x2a2a2a);

pub const TEXT_PRIMARY: Color = color!(0xffffff);
pub const TEXT_SECONDARY: Color = color!(0xb3b3b3);
pub const TEXT_MUTED: Color = color!(0x6a6a6a);

/// Small caption under the title (white at 70 %)
pub const CAPTION: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.7);

/// Accent used for the active tab and slider rails
pub const ACCENT: Color = color!(0x1e90ff);

/// Hover state for accent
pub const ACCENT_HOVER: Color = color!(0x4169e1);

/// Placeholder disc fill (white at 3 %)
pub const PLACEHOLDER_FILL: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.03);

/// Placeholder ring (white at 10 %)
pub const PLACEHOLDER_RING: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);

/// Bold font weight
pub const BOLD_WEIGHT: iced::font::Weight = iced::font::Weight::Bold;

/// Light font weight, used for the thin half of the title
pub const LIGHT_WEIGHT: iced::font::Weight = iced::font::Weight::Light;

pub fn text_primary(_theme: &Theme) -> Color {
    TEXT_PRIMARY
}

pub fn text_secondary(_theme: &Theme) -> Color {
    TEXT_SECONDARY
}

pub fn text_muted(_theme: &Theme) -> Color {
    TEXT_MUTED
}

// ============================================================================
// Container Styles
// ============================================================================

/// Main window background
pub fn main_content(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND)),
        text_color: Some(text_primary(theme)),
        ..Default::default()
    }
}

/// Bottom controls panel
pub fn controls_panel(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(SURFACE)),
        text_color: Some(text_primary(theme)),
        border: Border {
            radius: 20.0.into(),
            width: 1.0,
            color: BORDER,
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: Vector::new(0.0, -4.0),
            blur_radius: 24.0,
        },
        ..Default::default()
    }
}

/// Empty orb shown before any image is picked
pub fn placeholder_disc(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(PLACEHOLDER_FILL)),
        text_color: Some(TEXT_MUTED),
        border: Border {
            radius: f32::MAX.into(),
            width: 1.0,
            color: PLACEHOLDER_RING,
        },
        ..Default::default()
    }
}

// ============================================================================
// Button Styles
// ============================================================================

/// Pill button in the header and panel toolbar
pub fn secondary_button(theme: &Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: text_primary(theme),
        border: Border {
            radius: 24.0.into(),
            width: 1.0,
            color: BORDER,
        },
        ..Default::default()
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(SURFACE_HOVER)),
            border: Border {
                color: text_muted(theme),
                ..base.border
            },
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: text_muted(theme),
            ..base
        },
        _ => base,
    }
}

/// Tab selector button
pub fn tab_button(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        let (background, text_color) = match (active, status) {
            (true, button::Status::Hovered) => (ACCENT_HOVER, TEXT_PRIMARY),
            (true, _) => (ACCENT, TEXT_PRIMARY),
            (false, button::Status::Hovered) => (SURFACE_HOVER, text_primary(theme)),
            (false, _) => (Color::TRANSPARENT, text_secondary(theme)),
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: 16.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// ============================================================================
// Slider Style
// ============================================================================

pub fn param_slider(theme: &Theme, status: slider::Status) -> slider::Style {
    let handle_radius = match status {
        slider::Status::Hovered | slider::Status::Dragged => 8.0,
        _ => 6.0,
    };
    slider::Style {
        rail: slider::Rail {
            backgrounds: (Background::Color(ACCENT), Background::Color(BORDER)),
            width: 4.0,
            border: Border {
                radius: 2.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle {
                radius: handle_radius,
            },
            background: Background::Color(text_primary(theme)),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
