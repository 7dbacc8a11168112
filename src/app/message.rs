//! Application messages

use std::path::PathBuf;

use iced::Size;

use crate::features::media::{LoadTicket, SourceImage};
use crate::features::orb::{FloatParam, Tab};

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // ============ Animation ============
    /// 60 Hz animation tick
    Tick,

    // ============ Window ============
    /// Window was resized (logical size)
    WindowResized(Size),

    // ============ Image ============
    /// Open the image picker
    PickImage,
    /// Picker closed; `None` when cancelled
    ImagePicked(Option<PathBuf>),
    /// Decode finished; `None` when it failed
    ImageLoaded(LoadTicket, Option<SourceImage>),

    // ============ Controls ============
    /// Slider moved
    SetParam(FloatParam, f32),
    /// Motion toggle flipped
    SetMotionEnabled(bool),
    /// Switch the controls tab
    SelectTab(Tab),
    /// Reset the active tab to its defaults
    ResetTab,
    /// Hide the controls panel
    HideControls,
    /// Bring the controls panel back
    ShowControls,
}
