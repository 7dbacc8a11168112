//! CPU frame renderer
//!
//! Reference implementation of one composited orb frame. Each output pixel
//! goes through:
//!
//! 1. the wavy border displacement of its sampling position,
//! 2. the circular clip (anti-aliased over one pixel),
//! 3. the lens/lighting kernel,
//! 4. the overlay compositor.
//!
//! Rows are evaluated in parallel; pixels share no mutable state.

use image::imageops::{self, FilterType};
use rayon::prelude::*;

use super::sampler::RgbaTexture;
use super::{
    EffectParameters, Rgba, TRANSPARENT, blend_over, lens, overlay, smoothstep, to_centered,
    wavy_border,
};
use crate::features::media::SourceImage;

/// Fraction of the smaller viewport side taken by the orb
pub const ORB_SIZE_FACTOR: f32 = 0.88;

/// Placeholder disc fill (white at 3 %)
const PLACEHOLDER_FILL: Rgba = [1.0, 1.0, 1.0, 0.03];
/// Placeholder ring stroke (white at 10 %, 1 px)
const PLACEHOLDER_RING: Rgba = [1.0, 1.0, 1.0, 0.1];

/// Side of the orb for a viewport of `width` x `height`
pub fn orb_size(width: f32, height: f32) -> f32 {
    let side = width.min(height);
    if side.is_finite() && side > 0.0 {
        side * ORB_SIZE_FACTOR
    } else {
        0.0
    }
}

/// [`orb_size`] rounded down to whole pixels
pub fn orb_size_px(width: f32, height: f32) -> u32 {
    orb_size(width, height).floor() as u32
}

/// Source image fit into a square of side `size`
///
/// Fill-aspect: the shorter side of the source covers the square and the
/// longer side is center-cropped.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    source_id: u64,
    size: u32,
    pixels: Vec<u8>,
}

impl RenderTarget {
    /// Fit `source` into a `size` x `size` square
    pub fn fit(source: &SourceImage, size: u32) -> Option<Self> {
        if size == 0 {
            return None;
        }
        let rgba = image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(
            source.width(),
            source.height(),
            source.pixels().to_vec(),
        )?;
        let side = source.width().min(source.height());
        let x = (source.width() - side) / 2;
        let y = (source.height() - side) / 2;
        let square = imageops::crop_imm(&rgba, x, y, side, side).to_image();
        let fitted = if side == size {
            square
        } else {
            imageops::resize(&square, size, size, FilterType::Triangle)
        };

        Some(Self {
            source_id: source.id(),
            size,
            pixels: fitted.into_raw(),
        })
    }

    /// Reuse `cached` when it was built for the same source and size
    pub fn fit_cached(cached: Option<Self>, source: &SourceImage, size: u32) -> Option<Self> {
        match cached {
            Some(target) if target.is_for(source, size) => Some(target),
            _ => {
                tracing::debug!("Fitting source {} into {}px render target", source.id(), size);
                Self::fit(source, size)
            }
        }
    }

    pub fn is_for(&self, source: &SourceImage, size: u32) -> bool {
        self.source_id == source.id() && self.size == size
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    #[cfg(test)]
    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn texture(&self) -> Option<RgbaTexture<'_>> {
        RgbaTexture::new(self.size, self.size, &self.pixels)
    }
}

/// One rendered frame, straight-alpha RGBA8
#[derive(Debug, Clone)]
pub struct OrbFrame {
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl OrbFrame {
    fn empty(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; size as usize * size as usize * 4],
        }
    }

    /// RGBA of pixel `(x, y)`
    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.size as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Render one frame from an optional source image
///
/// `cache` holds the source fitted to `orb_size` between calls and is
/// refitted only when the image or the size changes. Without an image the
/// cache is cleared and the placeholder is drawn.
pub fn render_frame(
    image: Option<&SourceImage>,
    time: f32,
    params: &EffectParameters,
    orb_size: u32,
    cache: &mut Option<RenderTarget>,
) -> OrbFrame {
    *cache = match image {
        Some(img) => RenderTarget::fit_cached(cache.take(), img, orb_size),
        None => None,
    };
    render_target_frame(cache.as_ref(), time, params, orb_size)
}

/// Render from an already fitted target, or the placeholder on a mismatch
fn render_target_frame(
    target: Option<&RenderTarget>,
    time: f32,
    params: &EffectParameters,
    orb_size: u32,
) -> OrbFrame {
    let texture = target
        .filter(|t| t.size() == orb_size)
        .and_then(|t| t.texture());
    match texture {
        Some(texture) => render_orb(&texture, time, params, orb_size),
        None => render_placeholder(orb_size),
    }
}

fn render_orb(
    texture: &RgbaTexture<'_>,
    time: f32,
    params: &EffectParameters,
    size: u32,
) -> OrbFrame {
    let mut frame = OrbFrame::empty(size);
    if size == 0 {
        return frame;
    }
    let params = params.clamped();
    let side = size as f32;
    let stride = size as usize * 4;
    // One pixel in centered units
    let aa = 2.0 / side;

    frame
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..size as usize {
                let c = to_centered(x as f32, y as f32, side);
                let q = wavy_border::displace(c, time, &params);
                let r = (q[0] * q[0] + q[1] * q[1]).sqrt();

                let coverage = 1.0 - smoothstep(1.0 - aa * 0.5, 1.0 + aa * 0.5, r);
                let mut color = TRANSPARENT;
                if coverage > 0.0 {
                    color = lens::lens_kernel(texture, q, time, &params);
                    color[3] *= coverage;
                }
                let color = overlay::composite(color, q, side, &params);
                write_pixel(&mut row[x * 4..x * 4 + 4], color);
            }
        });

    frame
}

/// Flat disc with a thin ring, shown while no image is selected
pub fn render_placeholder(size: u32) -> OrbFrame {
    let mut frame = OrbFrame::empty(size);
    if size == 0 {
        return frame;
    }
    let side = size as f32;
    let stride = size as usize * 4;
    let px = 2.0 / side;

    frame
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..size as usize {
                let c = to_centered(x as f32, y as f32, side);
                let r = (c[0] * c[0] + c[1] * c[1]).sqrt();
                let inside = 1.0 - smoothstep(1.0 - px * 0.5, 1.0 + px * 0.5, r);
                let mut color = PLACEHOLDER_FILL;
                color[3] *= inside;
                // 1 px ring just inside the rim
                let ring = smoothstep(1.0 - px * 1.5, 1.0 - px, r) * inside;
                let mut stroke = PLACEHOLDER_RING;
                stroke[3] *= ring;
                write_pixel(&mut row[x * 4..x * 4 + 4], blend_over(color, stroke));
            }
        });

    frame
}

#[inline]
fn write_pixel(out: &mut [u8], color: Rgba) {
    if color[3] <= 0.0 {
        out.fill(0);
        return;
    }
    for (dst, v) in out.iter_mut().zip(color) {
        *dst = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_source(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    90,
                    255,
                ]);
            }
        }
        SourceImage::from_rgba(width, height, pixels).unwrap()
    }

    #[test]
    fn test_orb_size_from_viewport() {
        assert_eq!(orb_size(400.0, 800.0), 352.0);
        assert_eq!(orb_size(800.0, 400.0), 352.0);
        assert_eq!(orb_size_px(400.0, 800.0), 352);
        assert_eq!(orb_size(0.0, 100.0), 0.0);
        assert_eq!(orb_size(f32::NAN, 100.0), 88.0);
    }

    #[test]
    fn test_fit_crops_to_square() {
        let source = gradient_source(40, 20);
        let target = RenderTarget::fit(&source, 16).unwrap();
        assert_eq!(target.size(), 16);
        assert_eq!(target.pixels().len(), 16 * 16 * 4);
    }

    #[test]
    fn test_fit_cached_reuses_and_refits() {
        let source = gradient_source(8, 8);
        let first = RenderTarget::fit(&source, 8).unwrap();
        let reused = RenderTarget::fit_cached(Some(first), &source, 8).unwrap();
        assert!(reused.is_for(&source, 8));

        let resized = RenderTarget::fit_cached(Some(reused), &source, 4).unwrap();
        assert_eq!(resized.size(), 4);

        let other = gradient_source(8, 8);
        let swapped = RenderTarget::fit_cached(Some(resized), &other, 4).unwrap();
        assert!(swapped.is_for(&other, 4));
        assert!(!swapped.is_for(&source, 4));
    }

    #[test]
    fn test_missing_image_renders_placeholder() {
        let params = EffectParameters::default();
        let mut cache = None;
        let frame = render_frame(None, 0.0, &params, 64, &mut cache);
        assert_eq!(frame.pixels.len(), 64 * 64 * 4);
        // Center: faint white fill
        let center = frame.pixel(32, 32);
        assert_eq!(&center[..3], &[255, 255, 255]);
        assert_eq!(center[3], (0.03_f32 * 255.0).round() as u8);
        // Corner: outside the disc
        assert_eq!(frame.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_frame_is_clipped_to_circle() {
        let params = EffectParameters {
            motion_enabled: false,
            glow_intensity: 0.0,
            edge_intensity: 0.0,
            reflection_intensity: 0.0,
            ..Default::default()
        };
        let source = gradient_source(32, 32);
        let frame = render_frame(Some(&source), 0.0, &params, 32, &mut None);
        assert_eq!(frame.pixel(0, 0)[3], 0);
        assert_eq!(frame.pixel(16, 16)[3], 255);
    }

    #[test]
    fn test_motion_disabled_frame_is_time_independent() {
        let params = EffectParameters {
            motion_enabled: false,
            ..Default::default()
        };
        let source = gradient_source(24, 24);
        let target = RenderTarget::fit(&source, 24).unwrap();
        let a = render_target_frame(Some(&target), 0.0, &params, 24);
        let b = render_target_frame(Some(&target), 31.5, &params, 24);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_mismatched_target_falls_back_to_placeholder() {
        let params = EffectParameters::default();
        let source = gradient_source(16, 16);
        let target = RenderTarget::fit(&source, 16).unwrap();
        let frame = render_target_frame(Some(&target), 0.0, &params, 32);
        assert_eq!(frame.pixels, render_placeholder(32).pixels);
    }

    #[test]
    fn test_render_frame_keeps_and_clears_cache() {
        let params = EffectParameters::default();
        let source = gradient_source(20, 12);
        let mut cache = None;

        render_frame(Some(&source), 0.0, &params, 16, &mut cache);
        assert!(cache.as_ref().is_some_and(|t| t.is_for(&source, 16)));

        render_frame(Some(&source), 0.5, &params, 8, &mut cache);
        assert!(cache.as_ref().is_some_and(|t| t.is_for(&source, 8)));

        let frame = render_frame(None, 1.0, &params, 8, &mut cache);
        assert!(cache.is_none());
        assert_eq!(frame.pixels, render_placeholder(8).pixels);
    }

    #[test]
    fn test_fit_leaves_source_untouched() {
        let source = gradient_source(30, 10);
        let before = source.pixels().to_vec();
        let target = RenderTarget::fit(&source, 10).unwrap();
        assert_eq!(source.pixels(), &before[..]);
        // Center crop starts at x = 10; the 1:1 fit copies it verbatim
        assert_eq!(&target.pixels()[..4], &before[10 * 4..10 * 4 + 4]);
    }

    #[test]
    fn test_zero_size_is_empty() {
        let frame = render_frame(None, 0.0, &EffectParameters::default(), 0, &mut None);
        assert!(frame.pixels.is_empty());
    }
}
