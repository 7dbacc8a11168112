//! Reusable UI widgets - composable components without business logic
//!
//! Widgets must not import from `crate::app`; they take generic message
//! types or callbacks so the app decides what each interaction means.

pub mod param_slider;
pub mod tab_bar;
pub mod toggle_row;
