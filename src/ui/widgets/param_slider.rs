//! Labelled parameter slider
//!
//! One row: label on the left, two-decimal readout on the right, slider
//! underneath. Range and default come from the parameter descriptor.

use iced::widget::{Space, column, row, slider, text};
use iced::{Alignment, Element, Fill};

use crate::features::orb::params::FloatParamDescriptor;
use crate::ui::theme;

/// Slider step for every effect parameter
pub const STEP: f32 = 0.01;

/// Readout text for a slider value
pub fn format_value(value: f32) -> String {
    format!("{:.2}", value)
}

pub fn view<'a, Message: Clone + 'a>(
    descriptor: &'static FloatParamDescriptor,
    value: f32,
    on_change: impl Fn(f32) -> Message + 'a,
) -> Element<'a, Message> {
    let header = row![
        text(descriptor.label)
            .size(13)
            .style(|theme| text::Style {
                color: Some(theme::text_secondary(theme)),
            }),
        Space::new().width(Fill),
        text(format_value(value))
            .size(13)
            .font(iced::Font::MONOSPACE)
            .style(|theme| text::Style {
                color: Some(theme::text_primary(theme)),
            }),
    ]
    .align_y(Alignment::Center);

    let control = slider(descriptor.min..=descriptor.max, value, on_change)
        .step(STEP)
        .shift_step(STEP * 5.0)
        .default(descriptor.default)
        .height(16)
        .style(theme::param_slider);

    column![header, control].spacing(6).into()
}
