//! Orb effect core
//!
//! Pure, renderer-agnostic implementation of the orb effects:
//! - Animation clock advancing a shared time value at a fixed step
//! - Normalized effect parameters with per-tab defaults
//! - Lens/lighting kernel (fisheye warp + contrast/vignette/rim shading)
//! - Wavy border kernel (jelly-like wobble of the circular silhouette)
//! - Overlay compositor (glow, edge vignette, specular reflection arcs)
//! - CPU frame renderer that ties the pieces together
//!
//! Every kernel is a pure function of `(coordinate, time, parameters)`.
//! The GPU widget in `crate::ui::effects::orb_shader` mirrors these functions
//! in WGSL with the same constants.

pub mod clock;
pub mod frame;
pub mod lens;
pub mod overlay;
pub mod params;
pub mod sampler;
pub mod waveform;
pub mod wavy_border;

pub use clock::AnimationClock;
pub use frame::{RenderTarget, orb_size_px, render_frame};
pub use params::{EffectParameters, FloatParam, Tab};

/// Intensity at or below which an overlay layer is skipped entirely
pub const INTENSITY_EPSILON: f32 = 0.01;

/// Straight-alpha RGBA color with channels in 0.0-1.0
pub type Rgba = [f32; 4];

/// Fully transparent color
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

/// Map a pixel center to the centered orb coordinate space `[-1, 1]^2`.
///
/// Y grows downwards, matching screen space.
#[inline]
pub fn to_centered(px: f32, py: f32, size: f32) -> [f32; 2] {
    let half = (size * 0.5).max(f32::EPSILON);
    [(px + 0.5) / half - 1.0, (py + 0.5) / half - 1.0]
}

/// Map a centered coordinate back to texture space `[0, 1]^2` (unclamped)
#[inline]
pub fn to_uv(c: [f32; 2]) -> [f32; 2] {
    [(c[0] + 1.0) * 0.5, (c[1] + 1.0) * 0.5]
}

/// Hermite smoothstep, also valid for `edge0 > edge1`
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Straight-alpha source-over blend of `src` on top of `dst`
#[inline]
pub fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3].clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3].clamp(0.0, 1.0);
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    let mut out = [0.0; 4];
    for i in 0..3 {
        out[i] = (src[i] * sa + dst[i] * da * (1.0 - sa)) / out_a;
    }
    out[3] = out_a;
    out
}
