//! Texel lookup used by the lens kernel
//!
//! Sampling is clamp-to-edge on both axes: coordinates outside `[0, 1]^2`
//! repeat the nearest border texel, never wrap and never read out of bounds.

use super::Rgba;

/// Source texel lookup, `uv` in texture space
pub trait Sampler {
    fn sample(&self, uv: [f32; 2]) -> Rgba;
}

impl<F> Sampler for F
where
    F: Fn([f32; 2]) -> Rgba,
{
    fn sample(&self, uv: [f32; 2]) -> Rgba {
        self(uv)
    }
}

/// Clamp a texture coordinate into `[0, 1]^2`. NaN maps to the center.
#[inline]
pub fn clamp_uv(uv: [f32; 2]) -> [f32; 2] {
    let fix = |v: f32| if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) };
    [fix(uv[0]), fix(uv[1])]
}

/// Borrowed RGBA8 texture with bilinear clamp-to-edge filtering
#[derive(Debug, Clone, Copy)]
pub struct RgbaTexture<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> RgbaTexture<'a> {
    /// Wrap raw RGBA8 pixels. Returns `None` if the buffer does not match.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> Rgba {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i] as f32 / 255.0,
            self.data[i + 1] as f32 / 255.0,
            self.data[i + 2] as f32 / 255.0,
            self.data[i + 3] as f32 / 255.0,
        ]
    }
}

impl Sampler for RgbaTexture<'_> {
    fn sample(&self, uv: [f32; 2]) -> Rgba {
        let uv = clamp_uv(uv);
        // Texel centers sit at (i + 0.5) / size
        let fx = (uv[0] * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = (uv[1] * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x1, y0);
        let c01 = self.texel(x0, y1);
        let c11 = self.texel(x1, y1);

        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = c00[i] + (c10[i] - c00[i]) * tx;
            let bottom = c01[i] + (c11[i] - c01[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }
}
