//! Lens/lighting distortion kernel
//!
//! Produces a fisheye-like radial warp of the source plus baked-in lighting:
//!
//! 1. `r' = r * (1 - lens * 0.35 * r²)` pulls samples toward the center,
//!    more strongly near the rim, with no warp at `r = 0`.
//! 2. An oscillating radial term `strength * r * w(θ, r, t)` wobbles the
//!    interior. It vanishes at the center and when motion is off.
//! 3. The sample radius is clamped and the texture lookup clamps to edge.
//! 4. `light` raises contrast and darkens towards the rim by `light * r'²`;
//!    `edge` adds a darker band as `r'` approaches 1.
//!
//! Reflection is not part of this kernel; it lives in the overlay compositor.

use super::sampler::{Sampler, clamp_uv};
use super::waveform;
use super::{EffectParameters, Rgba, smoothstep, to_uv};

/// Fisheye pull coefficient at the rim for `lens = 1`
pub const LENS_PULL: f32 = 0.35;
/// Radial phase twist of the interior wobble (radians per unit radius)
pub const MOTION_RADIAL_TWIST: f32 = 3.0;
/// Upper bound of the warped sample radius
pub const SAMPLE_RADIUS_MAX: f32 = 1.5;

/// Contrast gain at `light = 1`
pub const LIGHT_CONTRAST: f32 = 0.35;
/// Rim darkening at `light = 1`
pub const LIGHT_VIGNETTE: f32 = 0.45;
/// Exponent of the lighting falloff over `r'`
pub const LIGHT_EXPONENT: i32 = 2;

/// Rim band darkening at `edge = 1`
pub const EDGE_DARKEN: f32 = 0.55;
/// Radius where the rim band starts
pub const EDGE_BAND_START: f32 = 0.6;

/// Below this radius the pixel is treated as the exact center
const CENTER_EPSILON: f32 = 1e-6;

/// Where the kernel samples the source for one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensSample {
    /// Texture coordinate, always within `[0, 1]^2`
    pub uv: [f32; 2],
    /// Warped radius `r'` in centered units
    pub radius: f32,
}

/// Monotonic fisheye profile: zero at the center, increasing with `r`
#[inline]
pub fn fisheye_profile(r: f32) -> f32 {
    LENS_PULL * r * r
}

/// Static lens warp of a radius, before any motion
#[inline]
pub fn warp_radius(r: f32, lens: f32) -> f32 {
    (r * (1.0 - lens * fisheye_profile(r))).max(0.0)
}

/// Compute the warped sample coordinate for a centered position `c`
pub fn sample_coordinate(c: [f32; 2], time: f32, params: &EffectParameters) -> LensSample {
    let params = params.clamped();
    let r = (c[0] * c[0] + c[1] * c[1]).sqrt();
    if !r.is_finite() || r < CENTER_EPSILON {
        return LensSample {
            uv: clamp_uv(to_uv([0.0, 0.0])),
            radius: 0.0,
        };
    }

    let mut warped = warp_radius(r, params.lens_intensity);

    let strength = params.effective_motion_strength();
    if strength > 0.0 {
        let theta = c[1].atan2(c[0]);
        let w = waveform::angular_for(theta, MOTION_RADIAL_TWIST * r, time, &params);
        warped += strength * r * w;
    }
    let warped = warped.clamp(0.0, SAMPLE_RADIUS_MAX);

    let scale = warped / r;
    LensSample {
        uv: clamp_uv(to_uv([c[0] * scale, c[1] * scale])),
        radius: warped,
    }
}

/// Apply contrast, vignette and rim shading at warped radius `r'`
pub fn shade(color: Rgba, radius: f32, params: &EffectParameters) -> Rgba {
    let light = params.light_intensity;
    let edge = params.edge_intensity;
    if light <= 0.0 && edge <= 0.0 {
        return color;
    }

    let r = radius.clamp(0.0, SAMPLE_RADIUS_MAX);
    let contrast = 1.0 + light * LIGHT_CONTRAST;
    let vignette = 1.0 - light * LIGHT_VIGNETTE * r.powi(LIGHT_EXPONENT);
    let rim = 1.0 - edge * EDGE_DARKEN * smoothstep(EDGE_BAND_START, 1.0, r);
    let factor = (vignette * rim).max(0.0);

    let mut out = color;
    for channel in out.iter_mut().take(3) {
        let c = (*channel - 0.5) * contrast + 0.5;
        *channel = (c * factor).clamp(0.0, 1.0);
    }
    out
}

/// Full lens kernel at a centered coordinate
pub fn lens_kernel<S: Sampler + ?Sized>(
    sampler: &S,
    c: [f32; 2],
    time: f32,
    params: &EffectParameters,
) -> Rgba {
    let params = params.clamped();
    let sample = sample_coordinate(c, time, &params);
    shade(sampler.sample(sample.uv), sample.radius, &params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polar(r: f32, theta: f32) -> [f32; 2] {
        [r * theta.cos(), r * theta.sin()]
    }

    fn still(lens: f32) -> EffectParameters {
        EffectParameters {
            motion_enabled: false,
            lens_intensity: lens,
            light_intensity: 0.0,
            edge_intensity: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_center_has_no_warp_for_any_time() {
        let params = EffectParameters::default();
        for t in [0.0, 0.5, 13.37, 1000.0] {
            let sample = sample_coordinate([0.0, 0.0], t, &params);
            assert_eq!(sample.radius, 0.0);
            assert_eq!(sample.uv, [0.5, 0.5]);
        }
    }

    #[test]
    fn test_warp_magnitude_increases_with_radius() {
        let lens = 0.7;
        let mut last = 0.0;
        for i in 1..=20 {
            let r = i as f32 / 20.0;
            let warp = r - warp_radius(r, lens);
            assert!(warp > last, "warp must grow: r={r} warp={warp}");
            last = warp;
        }
    }

    #[test]
    fn test_rim_pull_in_scenario() {
        let params = EffectParameters {
            motion_enabled: true,
            motion_strength: 0.05,
            motion_frequency: 0.24,
            motion_speed: 0.26,
            motion_noise: 0.5,
            lens_intensity: 0.7,
            ..Default::default()
        };
        let sample = sample_coordinate(polar(0.9, 0.0), 0.0, &params);
        assert!(sample.radius < 0.9, "radius {}", sample.radius);
        // Sampling coordinate stays on the same ray (θ = 0), closer to center
        let cx = sample.uv[0] * 2.0 - 1.0;
        assert!(cx > 0.0 && cx < 0.9);
    }

    #[test]
    fn test_zero_lens_is_identity_sampling() {
        let params = still(0.0);
        for &(r, theta) in &[(0.2, 0.3), (0.5, 2.0), (0.95, -1.2)] {
            let c = polar(r, theta);
            let sample = sample_coordinate(c, 3.0, &params);
            let expected = to_uv(c);
            assert!((sample.uv[0] - expected[0]).abs() < 1e-5);
            assert!((sample.uv[1] - expected[1]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_lens_kernel_returns_source_color() {
        let params = still(0.0);
        let gradient = |uv: [f32; 2]| [uv[0], uv[1], 0.5, 1.0];
        let c = polar(0.6, 0.8);
        let out = lens_kernel(&gradient, c, 0.0, &params);
        let expected = gradient(to_uv(c));
        for i in 0..4 {
            assert!((out[i] - expected[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_motion_disabled_is_time_independent() {
        let params = EffectParameters {
            motion_enabled: false,
            ..Default::default()
        };
        let gradient = |uv: [f32; 2]| [uv[0], uv[1], 0.25, 1.0];
        for &(r, theta) in &[(0.3, 0.1), (0.7, 2.5), (0.99, -2.0)] {
            let c = polar(r, theta);
            let a = lens_kernel(&gradient, c, 0.0, &params);
            let b = lens_kernel(&gradient, c, 57.25, &params);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_motion_enabled_varies_with_time() {
        let params = EffectParameters::default();
        let c = polar(0.8, 0.4);
        let a = sample_coordinate(c, 0.0, &params);
        let b = sample_coordinate(c, 0.9, &params);
        assert_ne!(a.uv, b.uv);
    }

    #[test]
    fn test_out_of_range_params_never_produce_nan() {
        let params = EffectParameters {
            lens_intensity: 50.0,
            motion_strength: f32::NAN,
            motion_speed: f32::INFINITY,
            light_intensity: -4.0,
            ..Default::default()
        };
        let gradient = |uv: [f32; 2]| [uv[0], uv[1], 0.0, 1.0];
        for &(r, theta) in &[(0.0, 0.0), (0.5, 1.0), (1.4, 2.0), (1e9, 0.3)] {
            let out = lens_kernel(&gradient, polar(r, theta), 12.0, &params);
            assert!(out.iter().all(|v| v.is_finite()));
            let sample = sample_coordinate(polar(r, theta), 12.0, &params);
            assert!(sample.uv.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_light_darkens_rim_more_than_center() {
        let params = EffectParameters {
            light_intensity: 1.0,
            edge_intensity: 0.0,
            ..Default::default()
        };
        let grey = [0.6, 0.6, 0.6, 1.0];
        let center = shade(grey, 0.0, &params);
        let rim = shade(grey, 0.95, &params);
        assert!(rim[0] < center[0]);
        assert_eq!(rim[3], 1.0);
    }

    #[test]
    fn test_edge_band_only_near_rim() {
        let params = EffectParameters {
            light_intensity: 0.0,
            edge_intensity: 1.0,
            ..Default::default()
        };
        let grey = [0.5, 0.5, 0.5, 1.0];
        assert_eq!(shade(grey, 0.3, &params), grey);
        assert!(shade(grey, 0.95, &params)[0] < 0.5);
    }
}
