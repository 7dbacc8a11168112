//! Main application module

mod message;
mod state;
mod update;
mod view;

use iced::{Size, Task, Theme};

use crate::features::OrbConfig;
use crate::features::orb::{self, clock};
pub use message::Message;
pub use state::{App, CoreState, CpuFrameState, UiState};

impl App {
    /// Create new application instance
    pub fn new(config: OrbConfig) -> (Self, Task<Message>) {
        tracing::info!("Render backend: {}", config.backend);

        let window_size = Size::new(config.window_width, config.window_height);
        let default_image = config.default_image.clone();

        let mut app = Self {
            core: CoreState::new(config),
            params: Default::default(),
            ui: UiState::new(window_size),
            cpu: CpuFrameState::default(),
        };

        // Load the startup image like any other pick
        let init_task = match default_image {
            Some(path) => app.start_image_load(path),
            None => Task::none(),
        };

        (app, init_task)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn title(&self) -> String {
        "Dream Machine".to_string()
    }

    /// Subscriptions for the animation clock and window resizes
    pub fn subscription(&self) -> iced::Subscription<Message> {
        iced::Subscription::batch([
            iced::time::every(clock::TICK_INTERVAL).map(|_| Message::Tick),
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    /// Orb side in logical pixels for the current window
    ///
    /// The orb area spans the full window width and `orb_area_fraction`
    /// of its height.
    pub fn orb_size(&self) -> u32 {
        orb_area_size(
            self.ui.window_size,
            self.core.config.orb_area_fraction,
        )
    }
}

fn orb_area_size(window: Size, fraction: f32) -> u32 {
    orb::orb_size_px(window.width, window.height * fraction)
}
