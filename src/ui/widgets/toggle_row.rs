//! Label with a toggler on the right

use iced::widget::{Space, row, text, toggler};
use iced::{Alignment, Element, Fill};

use crate::ui::theme;

pub fn view<'a, Message: Clone + 'a>(
    label: &'a str,
    is_on: bool,
    on_toggle: impl Fn(bool) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).size(13).style(|theme| text::Style {
            color: Some(theme::text_secondary(theme)),
        }),
        Space::new().width(Fill),
        toggler(is_on).on_toggle(on_toggle).size(20),
    ]
    .align_y(Alignment::Center)
    .into()
}
