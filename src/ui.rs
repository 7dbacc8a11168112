//! UI module for the orb viewer
//!
//! - **Effects** (`effects`): GPU shader widgets
//! - **Widgets** (`widgets`): Composable UI patterns without business logic
//! - **Theme** (`theme`): Palette and widget styles

pub mod effects;
pub mod icons;
pub mod theme;
pub mod widgets;
