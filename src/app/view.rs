//! View rendering

use iced::widget::{Space, button, column, container, image, mouse_area, row, shader, svg, text};
use iced::{Alignment, Element, Fill, Font, font};

use super::{App, Message};
use crate::features::RenderBackend;
use crate::features::orb::{FloatParam, Tab};
use crate::ui::effects::OrbProgram;
use crate::ui::icons;
use crate::ui::theme::{self, BOLD_WEIGHT, LIGHT_WEIGHT};
use crate::ui::widgets::{param_slider, tab_bar, toggle_row};

/// "Dream" title size
const TITLE_SIZE: f32 = 28.0;
/// "MACHINE" caption size
const CAPTION_SIZE: f32 = 12.0;

impl App {
    /// Build the main window
    pub fn view(&self) -> Element<'_, Message> {
        let orb_area_height = self.ui.window_size.height * self.core.config.orb_area_fraction;

        // Any click on the orb area brings hidden controls back
        let orb_area = mouse_area(
            container(self.view_orb())
                .center_x(Fill)
                .center_y(orb_area_height),
        )
        .on_press(Message::ShowControls);

        let mut content = column![self.view_header(), orb_area].spacing(8);
        if self.ui.controls_visible {
            content = content.push(self.view_controls());
        }

        container(content.padding(16))
            .width(Fill)
            .height(Fill)
            .style(theme::main_content)
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let title = column![
            text("Dream").size(TITLE_SIZE).font(Font {
                family: font::Family::Serif,
                weight: LIGHT_WEIGHT,
                style: font::Style::Italic,
                ..Default::default()
            }),
            text("MACHINE")
                .size(CAPTION_SIZE)
                .font(Font {
                    weight: BOLD_WEIGHT,
                    ..Default::default()
                })
                .style(|_theme| text::Style {
                    color: Some(theme::CAPTION),
                }),
        ]
        .spacing(2);

        let label = if self.core.images.is_loading() {
            "Loading…"
        } else {
            "Image"
        };
        let pick = button(
            row![
                svg(svg::Handle::from_memory(icons::IMAGE.as_bytes()))
                    .width(16)
                    .height(16)
                    .style(|theme, _status| svg::Style {
                        color: Some(theme::text_primary(theme)),
                    }),
                text(label).size(13),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .padding([6, 14])
        .style(theme::secondary_button)
        .on_press(Message::PickImage);

        row![title, Space::new().width(Fill), pick]
            .align_y(Alignment::Center)
            .into()
    }

    fn view_orb(&self) -> Element<'_, Message> {
        let size = self.orb_size() as f32;

        match (self.core.config.backend, self.core.images.current()) {
            (RenderBackend::Gpu, Some(source)) => shader(OrbProgram::new(
                source,
                self.params,
                self.core.clock.time_f32(),
            ))
            .width(size)
            .height(size)
            .into(),
            (RenderBackend::Cpu, Some(_)) => match &self.cpu.frame {
                Some(frame) => image(frame.clone()).width(size).height(size).into(),
                None => Space::new().width(size).height(size).into(),
            },
            (_, None) => view_placeholder(size),
        }
    }

    fn view_controls(&self) -> Element<'_, Message> {
        let toolbar = row![
            button(text("Hide").size(13))
                .padding([4, 12])
                .style(theme::secondary_button)
                .on_press(Message::HideControls),
            Space::new().width(Fill),
            button(text("Reset").size(13))
                .padding([4, 12])
                .style(theme::secondary_button)
                .on_press(Message::ResetTab),
        ]
        .align_y(Alignment::Center);

        let active = Tab::ALL
            .iter()
            .position(|tab| *tab == self.ui.active_tab)
            .unwrap_or(0);
        let tabs = tab_bar::view(
            Tab::ALL
                .iter()
                .map(|tab| (tab.title(), Message::SelectTab(*tab)))
                .collect(),
            active,
        );

        let mut rows = column![].spacing(14);
        if let Some(label) = self.ui.active_tab.toggle_label() {
            rows = rows.push(toggle_row::view(
                label,
                self.params.motion_enabled,
                Message::SetMotionEnabled,
            ));
        }
        for &param in self.ui.active_tab.params() {
            rows = rows.push(self.view_param(param));
        }

        container(column![toolbar, tabs, rows].spacing(14))
            .padding(16)
            .width(Fill)
            .style(theme::controls_panel)
            .into()
    }

    fn view_param(&self, param: FloatParam) -> Element<'_, Message> {
        param_slider::view(param.descriptor(), self.params.get(param), move |value| {
            Message::SetParam(param, value)
        })
    }
}

/// Empty orb with a drop glyph and a hint
fn view_placeholder<'a>(size: f32) -> Element<'a, Message> {
    let hint = column![
        svg(svg::Handle::from_memory(icons::DROP.as_bytes()))
            .width(32)
            .height(32)
            .style(|theme, _status| svg::Style {
                color: Some(theme::text_muted(theme)),
            }),
        text("Select an image").size(13).style(|theme| text::Style {
            color: Some(theme::text_muted(theme)),
        }),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    container(hint)
        .center_x(size)
        .center_y(size)
        .style(theme::placeholder_disc)
        .into()
}
