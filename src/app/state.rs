//! Application state definitions

use iced::Size;
use iced::widget::image;

use crate::features::OrbConfig;
use crate::features::media::ImageSlot;
use crate::features::orb::{AnimationClock, EffectParameters, RenderTarget, Tab};

/// Main application state
pub struct App {
    /// Startup configuration, the clock and the displayed image
    pub core: CoreState,
    /// Current effect parameters
    pub params: EffectParameters,
    /// Layout and panel state
    pub ui: UiState,
    /// Only populated with the CPU backend
    pub cpu: CpuFrameState,
}

/// Core state shared by every view
pub struct CoreState {
    pub config: OrbConfig,
    pub clock: AnimationClock,
    pub images: ImageSlot,
}

impl CoreState {
    pub fn new(config: OrbConfig) -> Self {
        Self {
            config,
            clock: AnimationClock::new(),
            images: ImageSlot::new(),
        }
    }
}

/// UI state
pub struct UiState {
    pub window_size: Size,
    pub active_tab: Tab,
    pub controls_visible: bool,
}

impl UiState {
    pub fn new(window_size: Size) -> Self {
        Self {
            window_size,
            active_tab: Tab::Motion,
            controls_visible: true,
        }
    }
}

/// Cached fit of the source plus the last rendered frame
#[derive(Default)]
pub struct CpuFrameState {
    pub target: Option<RenderTarget>,
    pub frame: Option<image::Handle>,
}
