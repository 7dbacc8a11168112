//! Segmented tab selector

use iced::widget::{button, container, row, text};
use iced::{Element, Fill};

use crate::ui::theme::{self, BOLD_WEIGHT};

/// One button per `(label, message)`; the entry at `active` is highlighted
pub fn view<'a, Message: Clone + 'a>(
    tabs: Vec<(&'a str, Message)>,
    active: usize,
) -> Element<'a, Message> {
    let buttons: Vec<Element<'a, Message>> = tabs
        .into_iter()
        .enumerate()
        .map(|(index, (label, message))| {
            button(
                container(text(label).size(12).font(iced::Font {
                    weight: BOLD_WEIGHT,
                    ..Default::default()
                }))
                .center_x(Fill),
            )
            .width(Fill)
            .padding([6, 12])
            .style(theme::tab_button(index == active))
            .on_press(message)
            .into()
        })
        .collect();

    row(buttons).spacing(4).width(Fill).into()
}
