//! Wavy border kernel
//!
//! Displaces the sampling position before the circular clip so the orb's
//! silhouette ripples. Magnitude is `strength * smoothstep(0.35, 1, r)`: the
//! interior stays put and the rim moves the most. The direction rotates away
//! from the radial axis by `π * w`, with `w` the same blended wave the lens
//! kernel uses.

use std::f32::consts::PI;

use super::waveform;
use super::{EffectParameters, smoothstep};

/// Radius at which the envelope starts rising from zero
pub const ENVELOPE_START: f32 = 0.35;
/// Radius at which the envelope reaches one
pub const ENVELOPE_END: f32 = 1.0;

/// Strength below which the kernel is skipped
const STRENGTH_EPSILON: f32 = 1e-4;

/// Envelope rising from 0 at the center to 1 at the rim
#[inline]
pub fn envelope(r: f32) -> f32 {
    smoothstep(ENVELOPE_START, ENVELOPE_END, r)
}

/// Whether the kernel does any work for these parameters
#[inline]
pub fn is_active(params: &EffectParameters) -> bool {
    params.effective_motion_strength() > STRENGTH_EPSILON
}

/// Displacement vector at centered coordinate `c`
pub fn displacement(c: [f32; 2], time: f32, params: &EffectParameters) -> [f32; 2] {
    if !is_active(params) {
        return [0.0, 0.0];
    }
    let params = params.clamped();
    let r = (c[0] * c[0] + c[1] * c[1]).sqrt();
    if !r.is_finite() {
        return [0.0, 0.0];
    }
    let magnitude = params.effective_motion_strength() * envelope(r);
    if magnitude <= 0.0 {
        return [0.0, 0.0];
    }

    let theta = c[1].atan2(c[0]);
    let w = waveform::angular_for(theta, 0.0, time, &params);
    let direction = theta + PI * w;
    [magnitude * direction.cos(), magnitude * direction.sin()]
}

/// Displaced sampling position. Returns `c` untouched when inactive.
#[inline]
pub fn displace(c: [f32; 2], time: f32, params: &EffectParameters) -> [f32; 2] {
    if !is_active(params) {
        return c;
    }
    let d = displacement(c, time, params);
    [c[0] + d[0], c[1] + d[1]]
}
