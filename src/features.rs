//! Feature modules - effect logic separated from UI
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on UI components directly.

pub mod media;
pub mod orb;
pub mod settings;

pub use settings::{OrbConfig, RenderBackend};
