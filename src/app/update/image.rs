//! Image pick and decode message handlers

use std::path::PathBuf;

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::media;

impl App {
    /// Handle image-related messages
    pub fn handle_image(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::PickImage => Some(Task::perform(
                media::pick_image_file(),
                Message::ImagePicked,
            )),

            Message::ImagePicked(Some(path)) => Some(self.start_image_load(path.clone())),

            Message::ImagePicked(None) => {
                tracing::debug!("Image pick cancelled");
                Some(Task::none())
            }

            Message::ImageLoaded(ticket, Some(image)) => {
                if self.core.images.complete(*ticket, image.clone()) {
                    tracing::info!(
                        "Showing image {} (generation {})",
                        image.id(),
                        ticket.generation()
                    );
                    self.refresh_cpu_frame();
                }
                Some(Task::none())
            }

            Message::ImageLoaded(ticket, None) => {
                self.core.images.abandon(*ticket);
                Some(Task::none())
            }

            _ => None,
        }
    }

    /// Take a ticket and decode `path` in the background
    pub(crate) fn start_image_load(&mut self, path: PathBuf) -> Task<Message> {
        let ticket = self.core.images.begin();
        tracing::info!(
            "Loading {} (generation {})",
            path.display(),
            ticket.generation()
        );
        Task::perform(media::load_image(path), move |image| {
            Message::ImageLoaded(ticket, image)
        })
    }
}
