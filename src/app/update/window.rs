//! Window message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    /// Handle window-related messages
    pub fn handle_window(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::WindowResized(size) => {
                let before = self.orb_size();
                self.ui.window_size = *size;
                let after = self.orb_size();
                if before != after {
                    tracing::debug!("Orb size {}px -> {}px", before, after);
                    self.refresh_cpu_frame();
                }
                Some(Task::none())
            }
            _ => None,
        }
    }
}
