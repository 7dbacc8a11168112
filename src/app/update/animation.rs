//! Animation tick and CPU frame rendering

use iced::Task;
use iced::widget::image;

use crate::app::message::Message;
use crate::app::state::{App, CpuFrameState};
use crate::features::RenderBackend;
use crate::features::orb;

impl App {
    /// Handle animation clock messages
    pub fn handle_animation(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::Tick => {
                self.core.clock.tick(self.params.motion_enabled);
                // A frozen clock only needs a frame when something else changed
                if self.params.motion_enabled || self.cpu.frame.is_none() {
                    self.refresh_cpu_frame();
                }
                Some(Task::none())
            }
            _ => None,
        }
    }

    /// Re-render the CPU frame for the current image, time and orb size
    ///
    /// No-op with the GPU backend, which renders inside the shader widget.
    pub(crate) fn refresh_cpu_frame(&mut self) {
        if self.core.config.backend != RenderBackend::Cpu {
            return;
        }
        let Some(source) = self.core.images.current() else {
            self.cpu = CpuFrameState::default();
            return;
        };

        let size = self.orb_size();
        let frame = orb::render_frame(
            Some(&source),
            self.core.clock.time_f32(),
            &self.params,
            size,
            &mut self.cpu.target,
        );
        self.cpu.frame = Some(image::Handle::from_rgba(
            frame.size,
            frame.size,
            frame.pixels,
        ));
    }
}
