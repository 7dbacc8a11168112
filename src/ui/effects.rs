//! WGPU Shader system for visual effects
//!
//! Provides custom shader widgets for rendering:
//! - The orb: wavy border, lens/lighting and overlays in one fragment pass

pub mod orb_shader;

pub use orb_shader::OrbProgram;
