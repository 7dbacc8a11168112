//! Overlay compositor
//!
//! Analytic layers drawn over the distorted orb, never sampled from the
//! source image and never animated. Each layer is skipped entirely when its
//! intensity is at or below [`INTENSITY_EPSILON`].
//!
//! Layer order, bottom to top: glow ring, glow highlight, edge rim, edge
//! vignette, reflection arcs, reflection border.
//!
//! Blur radii are given in pixels and converted to centered units with the
//! orb's half size, so the softness looks the same at every orb size.

use std::f32::consts::{PI, TAU};

use super::{EffectParameters, INTENSITY_EPSILON, Rgba, blend_over, smoothstep};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

/// Piecewise-linear gradient stop `(position, alpha)`
type Stop = (f32, f32);

// ==================== GLOW ====================

/// Ring stroke centered on the rim, `0.08 * size` wide
const GLOW_RING_BAND: (f32, f32) = (0.92, 1.08);
const GLOW_RING_STOPS: [Stop; 3] = [(0.96, 0.4), (1.0, 0.2), (1.04, 0.0)];
const GLOW_RING_BLUR_PX: f32 = 8.0;
const GLOW_RING_BLUR_GAIN_PX: f32 = 4.0;

/// Top-left light source
const GLOW_HIGHLIGHT_CENTER: [f32; 2] = [-0.4, -0.4];
const GLOW_HIGHLIGHT_STOPS: [Stop; 3] = [(0.0, 0.3), (0.4, 0.1), (0.8, 0.0)];
const GLOW_HIGHLIGHT_BLUR_PX: f32 = 10.0;

// ==================== EDGE ====================

/// Inner stroke hugging the rim, `0.04 * size` wide
const EDGE_RIM_BAND: (f32, f32) = (0.92, 1.0);
const EDGE_RIM_STOPS: [Stop; 3] = [(0.92, 0.3), (0.96, 0.15), (1.0, 0.0)];
const EDGE_RIM_BLUR_PX: f32 = 4.0;

const EDGE_VIGNETTE_STOPS: [Stop; 5] = [
    (0.7, 0.0),
    (0.775, 0.0),
    (0.85, 0.0),
    (0.925, 0.1),
    (1.0, 0.25),
];

// ==================== REFLECTION ====================

/// A partial-circle specular stroke
#[derive(Debug, Clone, Copy)]
pub struct ReflectionArc {
    /// Arc center angle in degrees, screen space (y down, 0 = right)
    pub angle_deg: f32,
    /// Angular span as a fraction of a full turn
    pub span: f32,
    pub radius: f32,
    pub width: f32,
    pub opacity: f32,
    pub blur_px: f32,
}

pub const REFLECTION_ARCS: [ReflectionArc; 3] = [
    // Dominant highlight, upper-left
    ReflectionArc {
        angle_deg: 225.0,
        span: 0.15,
        radius: 0.86,
        width: 0.06,
        opacity: 0.55,
        blur_px: 6.0,
    },
    // Sharp thin highlight nested inside the dominant one
    ReflectionArc {
        angle_deg: 220.0,
        span: 0.08,
        radius: 0.80,
        width: 0.02,
        opacity: 0.8,
        blur_px: 1.5,
    },
    // Faint secondary highlight, lower-right
    ReflectionArc {
        angle_deg: 45.0,
        span: 0.10,
        radius: 0.88,
        width: 0.04,
        opacity: 0.25,
        blur_px: 5.0,
    },
];

/// Thin full-ring border, brightest towards the dominant highlight
const REFLECTION_BORDER_RADIUS: f32 = 0.99;
const REFLECTION_BORDER_WIDTH: f32 = 0.015;
const REFLECTION_BORDER_MIN: f32 = 0.08;
const REFLECTION_BORDER_MAX: f32 = 0.4;
const REFLECTION_BORDER_ANGLE_DEG: f32 = 225.0;

/// Sample a piecewise-linear gradient, holding the end values outside it
fn gradient(stops: &[Stop], x: f32) -> f32 {
    let Some(&(first_pos, first_alpha)) = stops.first() else {
        return 0.0;
    };
    if x <= first_pos {
        return first_alpha;
    }
    for pair in stops.windows(2) {
        let (p0, a0) = pair[0];
        let (p1, a1) = pair[1];
        if x <= p1 {
            let span = p1 - p0;
            if span <= 0.0 {
                return a1;
            }
            return a0 + (a1 - a0) * (x - p0) / span;
        }
    }
    stops.last().map(|s| s.1).unwrap_or(0.0)
}

/// Band `[inner, outer]` with soft edges of half-width `soft`
fn soft_band(r: f32, inner: f32, outer: f32, soft: f32) -> f32 {
    let soft = soft.max(1e-4);
    smoothstep(inner - soft, inner + soft, r) * (1.0 - smoothstep(outer - soft, outer + soft, r))
}

/// Filled disc of radius `radius` with a soft edge
fn soft_disc(r: f32, radius: f32, soft: f32) -> f32 {
    let soft = soft.max(1e-4);
    1.0 - smoothstep(radius - soft, radius + soft, r)
}

/// Signed shortest angular distance in `[-π, π)`
fn angle_delta(a: f32, b: f32) -> f32 {
    (a - b + PI).rem_euclid(TAU) - PI
}

fn px_to_centered(px: f32, size: f32) -> f32 {
    px / (size * 0.5).max(1.0)
}

fn glow_ring_alpha(r: f32, size: f32, glow: f32) -> f32 {
    let soft = px_to_centered(GLOW_RING_BLUR_PX + glow * GLOW_RING_BLUR_GAIN_PX, size);
    glow * gradient(&GLOW_RING_STOPS, r) * soft_band(r, GLOW_RING_BAND.0, GLOW_RING_BAND.1, soft)
}

fn glow_highlight_alpha(c: [f32; 2], r: f32, size: f32, glow: f32) -> f32 {
    let dx = c[0] - GLOW_HIGHLIGHT_CENTER[0];
    let dy = c[1] - GLOW_HIGHLIGHT_CENTER[1];
    let d = (dx * dx + dy * dy).sqrt();
    let soft = px_to_centered(GLOW_HIGHLIGHT_BLUR_PX, size);
    glow * gradient(&GLOW_HIGHLIGHT_STOPS, d) * soft_disc(r, 1.0, soft)
}

fn edge_rim_alpha(r: f32, size: f32, edge: f32) -> f32 {
    let soft = px_to_centered(EDGE_RIM_BLUR_PX, size);
    edge * gradient(&EDGE_RIM_STOPS, r) * soft_band(r, EDGE_RIM_BAND.0, EDGE_RIM_BAND.1, soft)
}

fn edge_vignette_alpha(r: f32, edge: f32) -> f32 {
    if r > 1.0 {
        return 0.0;
    }
    edge * gradient(&EDGE_VIGNETTE_STOPS, r)
}

/// Opacity of one reflection arc at `(r, θ)` before intensity scaling
pub fn arc_alpha(arc: &ReflectionArc, r: f32, theta: f32, size: f32) -> f32 {
    let half_span = arc.span * PI;
    let delta = angle_delta(theta, arc.angle_deg.to_radians()).abs();
    let angular = 1.0 - smoothstep(half_span * 0.6, half_span, delta);
    if angular <= 0.0 {
        return 0.0;
    }
    let half_width = arc.width * 0.5;
    let soft = px_to_centered(arc.blur_px, size);
    let radial = 1.0 - smoothstep(half_width, half_width + soft, (r - arc.radius).abs());
    arc.opacity * angular * radial
}

fn border_alpha(r: f32, theta: f32, size: f32) -> f32 {
    let soft = px_to_centered(1.0, size);
    let half_width = REFLECTION_BORDER_WIDTH * 0.5;
    let radial = 1.0 - smoothstep(half_width, half_width + soft, (r - REFLECTION_BORDER_RADIUS).abs());
    let facing = 0.5 + 0.5 * (theta - REFLECTION_BORDER_ANGLE_DEG.to_radians()).cos();
    radial * (REFLECTION_BORDER_MIN + (REFLECTION_BORDER_MAX - REFLECTION_BORDER_MIN) * facing)
}

/// Combined reflection opacity at `(r, θ)` for the given intensity
pub fn reflection_alpha(r: f32, theta: f32, size: f32, reflection: f32) -> f32 {
    if reflection <= INTENSITY_EPSILON {
        return 0.0;
    }
    // Union of the strokes, as if drawn one over another
    let mut clear = 1.0 - border_alpha(r, theta, size) * reflection;
    for arc in &REFLECTION_ARCS {
        clear *= 1.0 - arc_alpha(arc, r, theta, size) * reflection;
    }
    (1.0 - clear).clamp(0.0, 1.0)
}

fn layer(base: Rgba, rgb: [f32; 3], alpha: f32) -> Rgba {
    if alpha <= 0.0 {
        return base;
    }
    blend_over(base, [rgb[0], rgb[1], rgb[2], alpha.min(1.0)])
}

/// Composite every enabled overlay over `base` at centered coordinate `c`
/// of an orb with side `size` pixels.
pub fn composite(base: Rgba, c: [f32; 2], size: f32, params: &EffectParameters) -> Rgba {
    let params = params.clamped();
    let r = (c[0] * c[0] + c[1] * c[1]).sqrt();
    if !r.is_finite() {
        return base;
    }
    let mut out = base;

    let glow = params.glow_intensity;
    if glow > INTENSITY_EPSILON {
        out = layer(out, WHITE, glow_ring_alpha(r, size, glow));
        out = layer(out, WHITE, glow_highlight_alpha(c, r, size, glow));
    }

    let edge = params.edge_intensity;
    if edge > INTENSITY_EPSILON {
        out = layer(out, BLACK, edge_rim_alpha(r, size, edge));
        out = layer(out, BLACK, edge_vignette_alpha(r, edge));
    }

    let reflection = params.reflection_intensity;
    if reflection > INTENSITY_EPSILON {
        let theta = c[1].atan2(c[0]);
        out = layer(out, WHITE, reflection_alpha(r, theta, size, reflection));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 352.0;
    const BASE: Rgba = [0.4, 0.5, 0.6, 1.0];

    fn polar_deg(r: f32, deg: f32) -> [f32; 2] {
        let t = deg.to_radians();
        [r * t.cos(), r * t.sin()]
    }

    fn only(glow: f32, edge: f32, reflection: f32) -> EffectParameters {
        EffectParameters {
            glow_intensity: glow,
            edge_intensity: edge,
            reflection_intensity: reflection,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_layers_gated_is_exact_identity() {
        for &g in &[0.0, 0.005, 0.01] {
            let params = only(g, g, g);
            for &(r, deg) in &[(0.0, 0.0), (0.86, 225.0), (0.97, 45.0), (1.02, 10.0)] {
                assert_eq!(composite(BASE, polar_deg(r, deg), SIZE, &params), BASE);
            }
        }
    }

    #[test]
    fn test_glow_gate_removes_only_glow() {
        let c = polar_deg(0.97, 100.0);
        let gated = composite(BASE, c, SIZE, &only(0.01, 0.5, 0.0));
        let edge_only = composite(BASE, c, SIZE, &only(0.0, 0.5, 0.0));
        assert_eq!(gated, edge_only);
    }

    #[test]
    fn test_zero_reflection_draws_no_arcs() {
        for &(r, deg) in &[(0.86, 225.0), (0.80, 220.0), (0.88, 45.0), (0.99, 0.0)] {
            let c = polar_deg(r, deg);
            let with_zero = composite(BASE, c, SIZE, &only(0.5, 0.5, 0.0));
            let base_glow_edge = composite(BASE, c, SIZE, &only(0.5, 0.5, 0.005));
            assert_eq!(with_zero, base_glow_edge);
            assert_eq!(reflection_alpha(r, deg.to_radians(), SIZE, 0.0), 0.0);
        }
    }

    #[test]
    fn test_reflection_is_asymmetric_and_opposite() {
        let upper_left = reflection_alpha(0.86, 225_f32.to_radians(), SIZE, 0.7);
        let lower_right = reflection_alpha(0.88, 45_f32.to_radians(), SIZE, 0.7);
        let side = reflection_alpha(0.5, 135_f32.to_radians(), SIZE, 0.7);
        assert!(upper_left > lower_right);
        assert!(lower_right > 0.0);
        assert_eq!(side, 0.0);
    }

    #[test]
    fn test_glow_brightens_rim_more_than_center() {
        let params = only(1.0, 0.0, 0.0);
        let rim = composite(BASE, polar_deg(0.97, 90.0), SIZE, &params);
        let center = composite(BASE, [0.4, 0.4], SIZE, &params);
        assert!(rim[0] > BASE[0]);
        assert!(rim[0] > center[0]);
    }

    #[test]
    fn test_edge_darkens_rim_band() {
        let params = only(0.0, 1.0, 0.0);
        let rim = composite(BASE, polar_deg(0.95, 60.0), SIZE, &params);
        let inner = composite(BASE, polar_deg(0.3, 60.0), SIZE, &params);
        assert!(rim[2] < BASE[2]);
        assert_eq!(inner, BASE);
    }

    #[test]
    fn test_gradient_holds_end_values() {
        assert_eq!(gradient(&GLOW_RING_STOPS, 0.0), 0.4);
        assert_eq!(gradient(&GLOW_RING_STOPS, 2.0), 0.0);
        assert!((gradient(&GLOW_RING_STOPS, 0.98) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_angle_delta_wraps() {
        let d = angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d + 0.2).abs() < 1e-5);
    }
}
