//! Controls panel message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    /// Handle parameter and panel messages
    pub fn handle_controls(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::SetParam(param, value) => {
                self.params.set(*param, *value);
                tracing::debug!(
                    "{} = {:.2}",
                    param.descriptor().name,
                    self.params.get(*param)
                );
            }

            Message::SetMotionEnabled(enabled) => {
                tracing::debug!("Motion {}", if *enabled { "enabled" } else { "paused" });
                self.params.motion_enabled = *enabled;
            }

            Message::SelectTab(tab) => {
                self.ui.active_tab = *tab;
                return Some(Task::none());
            }

            Message::ResetTab => {
                tracing::debug!("Resetting {} parameters", self.ui.active_tab.title());
                self.params.reset(self.ui.active_tab);
            }

            Message::HideControls => {
                self.ui.controls_visible = false;
                return Some(Task::none());
            }

            Message::ShowControls => {
                self.ui.controls_visible = true;
                return Some(Task::none());
            }

            _ => return None,
        }

        self.refresh_cpu_frame();
        Some(Task::none())
    }
}
