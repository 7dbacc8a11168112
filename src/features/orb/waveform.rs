//! Deterministic wave blending shared by both distortion kernels
//!
//! "Noise" is not random: it blends a second, phase-shifted sine into the
//! primary one. For an integer lobe count `n` around the orb:
//!
//! ```text
//! φ         = t * speed * 2π
//! primary   = sin(n * θ + φ + offset)
//! secondary = sin((n + 1) * θ + 1.3 * φ + 2.1 + offset)
//! f(n)      = (1 - noise) * primary + noise * secondary
//! ```
//!
//! The frequency slider maps to a fractional lobe count `k = 2 + 10 * frequency`
//! and the result crossfades `f(floor k)` into `f(floor k + 1)`. Integer lobes
//! keep the wave continuous across the `atan2` seam at `θ = ±π`, and every
//! term is a convex combination of sines, so the output stays in `[-1, 1]`.

use std::f32::consts::TAU;

use super::EffectParameters;

/// Lobe count at `motion_frequency = 0`
pub const LOBES_MIN: f32 = 2.0;
/// Additional lobes at `motion_frequency = 1`
pub const LOBES_SPAN: f32 = 10.0;

/// Extra lobes carried by the secondary wave
pub const SECONDARY_EXTRA_LOBES: f32 = 1.0;
/// Temporal frequency ratio of the secondary wave
pub const SECONDARY_TEMPORAL_RATIO: f32 = 1.3;
/// Fixed phase offset of the secondary wave (radians)
pub const SECONDARY_PHASE_OFFSET: f32 = 2.1;

/// Fractional lobe count for a frequency slider value
#[inline]
pub fn lobes(frequency: f32) -> f32 {
    LOBES_MIN + LOBES_SPAN * frequency.clamp(0.0, 1.0)
}

/// Temporal phase `t * speed * 2π`
#[inline]
pub fn temporal_phase(time: f32, speed: f32) -> f32 {
    time * speed * TAU
}

/// Periodic, continuous, bounded base waveform
#[inline]
pub fn wave(phase: f32) -> f32 {
    phase.sin()
}

#[inline]
fn lobe_blend(n: f32, theta: f32, phase: f32, offset: f32, noise: f32) -> f32 {
    let primary = wave(n * theta + phase + offset);
    let secondary = wave(
        (n + SECONDARY_EXTRA_LOBES) * theta
            + phase * SECONDARY_TEMPORAL_RATIO
            + SECONDARY_PHASE_OFFSET
            + offset,
    );
    (1.0 - noise) * primary + noise * secondary
}

/// Blended angular wave at angle `theta`, with an extra phase `offset`
pub fn angular(theta: f32, offset: f32, time: f32, speed: f32, frequency: f32, noise: f32) -> f32 {
    let k = lobes(frequency);
    let n = k.floor();
    let fade = k - n;
    let phase = temporal_phase(time, speed);
    let noise = noise.clamp(0.0, 1.0);

    let low = lobe_blend(n, theta, phase, offset, noise);
    if fade <= 0.0 {
        return low;
    }
    let high = lobe_blend(n + 1.0, theta, phase, offset, noise);
    low + (high - low) * fade
}

/// [`angular`] reading speed, frequency and noise from the parameters
#[inline]
pub fn angular_for(theta: f32, offset: f32, time: f32, params: &EffectParameters) -> f32 {
    angular(
        theta,
        offset,
        time,
        params.motion_speed,
        params.motion_frequency,
        params.motion_noise,
    )
}
