//! GPU orb renderer
//!
//! Runs the orb kernels as a single fragment shader over the widget bounds:
//! wavy border displacement, circular clip, lens/lighting, then overlays.
//! The WGSL mirrors `crate::features::orb` constant for constant, so the GPU
//! and CPU backends draw the same frame.
//!
//! The source image is uploaded once per image id and cropped to a centered
//! square in the shader, so resizing the window never re-uploads.

use bytemuck::{Pod, Zeroable};
use iced::Rectangle;
use iced::mouse;
use iced::wgpu;
use iced::widget::shader::{self, Viewport};

use crate::features::media::SourceImage;
use crate::features::orb::EffectParameters;

/// Uniform data for the orb shader
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct OrbUniforms {
    /// Source crop: offset (x, y) and scale (x, y) in texture space
    pub crop: [f32; 4],
    /// Orb side in physical pixels
    pub size: f32,
    pub time: f32,
    pub motion_speed: f32,
    /// Effective strength, zero while motion is disabled
    pub motion_strength: f32,
    pub motion_frequency: f32,
    pub motion_noise: f32,
    pub glow_intensity: f32,
    pub light_intensity: f32,
    pub edge_intensity: f32,
    pub lens_intensity: f32,
    pub reflection_intensity: f32,
    pub _padding: f32,
}

impl Default for OrbUniforms {
    fn default() -> Self {
        Self::new(&EffectParameters::default(), 0.0, [0.0, 0.0, 1.0, 1.0])
    }
}

impl OrbUniforms {
    pub fn new(params: &EffectParameters, time: f32, crop: [f32; 4]) -> Self {
        let params = params.clamped();
        Self {
            crop,
            size: 1.0,
            time,
            motion_speed: params.motion_speed,
            motion_strength: params.effective_motion_strength(),
            motion_frequency: params.motion_frequency,
            motion_noise: params.motion_noise,
            glow_intensity: params.glow_intensity,
            light_intensity: params.light_intensity,
            edge_intensity: params.edge_intensity,
            lens_intensity: params.lens_intensity,
            reflection_intensity: params.reflection_intensity,
            _padding: 0.0,
        }
    }
}

/// Centered square crop of a `width` x `height` texture (fill-aspect)
pub fn square_crop(width: u32, height: u32) -> [f32; 4] {
    if width == 0 || height == 0 {
        return [0.0, 0.0, 1.0, 1.0];
    }
    let side = width.min(height) as f32;
    let sx = side / width as f32;
    let sy = side / height as f32;
    [(1.0 - sx) * 0.5, (1.0 - sy) * 0.5, sx, sy]
}

/// WGSL shader source for the orb
const ORB_SHADER: &str = r#"
struct Uniforms {
    crop: vec4f,
    size: f32,
    time: f32,
    motion_speed: f32,
    motion_strength: f32,
    motion_frequency: f32,
    motion_noise: f32,
    glow: f32,
    light: f32,
    edge: f32,
    lens: f32,
    reflection: f32,
    _padding: f32,
}

@group(0) @binding(0) var<uniform> u: Uniforms;
@group(0) @binding(1) var t_source: texture_2d<f32>;
@group(0) @binding(2) var s_source: sampler;

struct VertexOut {
    @builtin(position) position: vec4f,
    @location(0) uv: vec2f,
}

// Fullscreen triangle over the widget viewport
@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOut {
    let uv = vec2f(
        f32((vertex_index << 1) & 2),
        f32(vertex_index & 2)
    );
    let position = vec4f(uv * 2.0 - 1.0, 0.0, 1.0);
    return VertexOut(position, uv);
}

const PI: f32 = 3.14159265;
const TAU: f32 = 6.28318531;
const INTENSITY_EPSILON: f32 = 0.01;

// ============ Waveform ============

fn lobe_blend(n: f32, theta: f32, phase: f32, offset: f32, noise: f32) -> f32 {
    let primary = sin(n * theta + phase + offset);
    let secondary = sin((n + 1.0) * theta + phase * 1.3 + 2.1 + offset);
    return (1.0 - noise) * primary + noise * secondary;
}

fn angular(theta: f32, offset: f32) -> f32 {
    let k = 2.0 + 10.0 * clamp(u.motion_frequency, 0.0, 1.0);
    let n = floor(k);
    let fade = k - n;
    let phase = u.time * u.motion_speed * TAU;
    let noise = clamp(u.motion_noise, 0.0, 1.0);
    let low = lobe_blend(n, theta, phase, offset, noise);
    let high = lobe_blend(n + 1.0, theta, phase, offset, noise);
    return low + (high - low) * fade;
}

// ============ Wavy border ============

fn wavy_displace(c: vec2f) -> vec2f {
    if (u.motion_strength <= 0.0001) {
        return c;
    }
    let r = length(c);
    let magnitude = u.motion_strength * smoothstep(0.35, 1.0, r);
    if (magnitude <= 0.0) {
        return c;
    }
    let theta = atan2(c.y, c.x);
    let direction = theta + PI * angular(theta, 0.0);
    return c + magnitude * vec2f(cos(direction), sin(direction));
}

// ============ Lens / lighting ============

// Returns (uv.x, uv.y, warped radius)
fn lens_sample(c: vec2f) -> vec3f {
    let r = length(c);
    if (r < 0.000001) {
        return vec3f(0.5, 0.5, 0.0);
    }
    var warped = max(r * (1.0 - u.lens * 0.35 * r * r), 0.0);
    if (u.motion_strength > 0.0) {
        let theta = atan2(c.y, c.x);
        warped += u.motion_strength * r * angular(theta, 3.0 * r);
    }
    warped = clamp(warped, 0.0, 1.5);
    let uv = clamp((c * (warped / r) + vec2f(1.0)) * 0.5, vec2f(0.0), vec2f(1.0));
    return vec3f(uv, warped);
}

fn shade(color: vec4f, radius: f32) -> vec4f {
    if (u.light <= 0.0 && u.edge <= 0.0) {
        return color;
    }
    let r = clamp(radius, 0.0, 1.5);
    let contrast = 1.0 + u.light * 0.35;
    let vignette = 1.0 - u.light * 0.45 * r * r;
    let rim = 1.0 - u.edge * 0.55 * smoothstep(0.6, 1.0, r);
    let factor = max(vignette * rim, 0.0);
    let rgb = clamp(((color.rgb - vec3f(0.5)) * contrast + vec3f(0.5)) * factor, vec3f(0.0), vec3f(1.0));
    return vec4f(rgb, color.a);
}

// ============ Overlays ============

fn stops3(x: f32, p: vec3f, a: vec3f) -> f32 {
    if (x <= p.x) {
        return a.x;
    }
    if (x <= p.y) {
        return mix(a.x, a.y, (x - p.x) / (p.y - p.x));
    }
    if (x <= p.z) {
        return mix(a.y, a.z, (x - p.y) / (p.z - p.y));
    }
    return a.z;
}

fn soft_band(r: f32, inner: f32, outer: f32, soft_in: f32) -> f32 {
    let soft = max(soft_in, 0.0001);
    return smoothstep(inner - soft, inner + soft, r) * (1.0 - smoothstep(outer - soft, outer + soft, r));
}

fn soft_disc(r: f32, radius: f32, soft_in: f32) -> f32 {
    let soft = max(soft_in, 0.0001);
    return 1.0 - smoothstep(radius - soft, radius + soft, r);
}

fn px(v: f32) -> f32 {
    return v / max(u.size * 0.5, 1.0);
}

fn angle_delta(a: f32, b: f32) -> f32 {
    let d = a - b + PI;
    return d - TAU * floor(d / TAU) - PI;
}

fn arc_alpha(r: f32, theta: f32, angle_deg: f32, span: f32, radius: f32, width: f32, opacity: f32, blur_px: f32) -> f32 {
    let half_span = span * PI;
    let delta = abs(angle_delta(theta, radians(angle_deg)));
    let angular_mask = 1.0 - smoothstep(half_span * 0.6, half_span, delta);
    if (angular_mask <= 0.0) {
        return 0.0;
    }
    let half_width = width * 0.5;
    let radial = 1.0 - smoothstep(half_width, half_width + px(blur_px), abs(r - radius));
    return opacity * angular_mask * radial;
}

fn reflection_alpha(r: f32, theta: f32) -> f32 {
    let k = u.reflection;
    let border_radial = 1.0 - smoothstep(0.0075, 0.0075 + px(1.0), abs(r - 0.99));
    let facing = 0.5 + 0.5 * cos(theta - radians(225.0));
    var clear = 1.0 - border_radial * (0.08 + 0.32 * facing) * k;
    clear *= 1.0 - arc_alpha(r, theta, 225.0, 0.15, 0.86, 0.06, 0.55, 6.0) * k;
    clear *= 1.0 - arc_alpha(r, theta, 220.0, 0.08, 0.80, 0.02, 0.8, 1.5) * k;
    clear *= 1.0 - arc_alpha(r, theta, 45.0, 0.10, 0.88, 0.04, 0.25, 5.0) * k;
    return clamp(1.0 - clear, 0.0, 1.0);
}

fn over(dst: vec4f, rgb: vec3f, alpha: f32) -> vec4f {
    let sa = clamp(alpha, 0.0, 1.0);
    if (sa <= 0.0) {
        return dst;
    }
    let da = clamp(dst.a, 0.0, 1.0);
    let out_a = sa + da * (1.0 - sa);
    if (out_a <= 0.0) {
        return vec4f(0.0);
    }
    return vec4f((rgb * sa + dst.rgb * da * (1.0 - sa)) / out_a, out_a);
}

fn composite(base: vec4f, c: vec2f) -> vec4f {
    let r = length(c);
    var result = base;

    if (u.glow > INTENSITY_EPSILON) {
        let g = u.glow;
        let ring = g * stops3(r, vec3f(0.96, 1.0, 1.04), vec3f(0.4, 0.2, 0.0))
            * soft_band(r, 0.92, 1.08, px(8.0 + g * 4.0));
        result = over(result, vec3f(1.0), ring);
        let d = length(c - vec2f(-0.4, -0.4));
        let highlight = g * stops3(d, vec3f(0.0, 0.4, 0.8), vec3f(0.3, 0.1, 0.0))
            * soft_disc(r, 1.0, px(10.0));
        result = over(result, vec3f(1.0), highlight);
    }

    if (u.edge > INTENSITY_EPSILON) {
        let e = u.edge;
        let rim = e * stops3(r, vec3f(0.92, 0.96, 1.0), vec3f(0.3, 0.15, 0.0))
            * soft_band(r, 0.92, 1.0, px(4.0));
        result = over(result, vec3f(0.0), rim);
        if (r <= 1.0) {
            let vignette = e * stops3(r, vec3f(0.85, 0.925, 1.0), vec3f(0.0, 0.1, 0.25));
            result = over(result, vec3f(0.0), vignette);
        }
    }

    if (u.reflection > INTENSITY_EPSILON) {
        let theta = atan2(c.y, c.x);
        result = over(result, vec3f(1.0), reflection_alpha(r, theta));
    }

    return result;
}

// ============ Fragment Shader ============

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4f {
    // Centered coordinate, y down
    let c = vec2f(in.uv.x * 2.0 - 1.0, 1.0 - in.uv.y * 2.0);
    let q = wavy_displace(c);
    let r = length(q);

    let aa = 2.0 / max(u.size, 1.0);
    let coverage = 1.0 - smoothstep(1.0 - aa * 0.5, 1.0 + aa * 0.5, r);
    var color = vec4f(0.0);
    if (coverage > 0.0) {
        let s = lens_sample(q);
        let src_uv = u.crop.xy + s.xy * u.crop.zw;
        color = shade(textureSampleLevel(t_source, s_source, src_uv, 0.0), s.z);
        color.a *= coverage;
    }
    return composite(color, q);
}
"#;

/// GPU resources tied to one uploaded source image
struct CachedSource {
    texture_id: u64,
    #[allow(dead_code)]
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// WGPU pipeline for the orb shader
pub struct OrbPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    cached: Option<CachedSource>,
}

impl OrbPipeline {
    /// Upload `source` unless it is already the cached texture
    fn ensure_source(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, source: &SourceImage) {
        if self
            .cached
            .as_ref()
            .is_some_and(|c| c.texture_id == source.id())
        {
            return;
        }

        tracing::debug!(
            "Uploading orb texture {} ({}x{})",
            source.id(),
            source.width(),
            source.height()
        );

        let extent = wgpu::Extent3d {
            width: source.width(),
            height: source.height(),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Orb Source Texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            source.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * source.width()),
                rows_per_image: Some(source.height()),
            },
            extent,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Orb Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.cached = Some(CachedSource {
            texture_id: source.id(),
            texture,
            bind_group,
        });
    }
}

impl shader::Pipeline for OrbPipeline {
    fn new(device: &wgpu::Device, _queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Orb Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(ORB_SHADER)),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Orb Uniform Buffer"),
            size: std::mem::size_of::<OrbUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Orb Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Out-of-range lookups repeat the border texel
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Orb Texture Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Orb Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Orb Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            cached: None,
        }
    }
}

/// Orb side in physical pixels for widget `bounds`
///
/// iced sets the render pass viewport to the same bounds before `draw`, so
/// the fullscreen triangle covers exactly this square.
fn physical_side(bounds: &Rectangle, scale: f32) -> f32 {
    (bounds.width.min(bounds.height) * scale).max(1.0)
}

/// Orb primitive (one frame's worth of state)
#[derive(Debug, Clone)]
pub struct OrbPrimitive {
    source: SourceImage,
    uniforms: OrbUniforms,
}

impl shader::Primitive for OrbPrimitive {
    type Pipeline = OrbPipeline;

    fn prepare(
        &self,
        pipeline: &mut Self::Pipeline,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bounds: &Rectangle,
        viewport: &Viewport,
    ) {
        pipeline.ensure_source(device, queue, &self.source);

        let mut uniforms = self.uniforms;
        uniforms.size = physical_side(bounds, viewport.scale_factor() as f32);
        queue.write_buffer(&pipeline.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    fn draw(&self, pipeline: &Self::Pipeline, render_pass: &mut wgpu::RenderPass<'_>) -> bool {
        let Some(cached) = &pipeline.cached else {
            return false;
        };
        render_pass.set_pipeline(&pipeline.pipeline);
        render_pass.set_bind_group(0, &cached.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
        true
    }
}

/// Shader program drawing the orb for one source image
#[derive(Debug, Clone)]
pub struct OrbProgram {
    source: SourceImage,
    params: EffectParameters,
    time: f32,
}

impl OrbProgram {
    pub fn new(source: SourceImage, params: EffectParameters, time: f32) -> Self {
        Self {
            source,
            params,
            time,
        }
    }

    pub fn uniforms(&self) -> OrbUniforms {
        let crop = square_crop(self.source.width(), self.source.height());
        OrbUniforms::new(&self.params, self.time, crop)
    }
}

impl<Message> shader::Program<Message> for OrbProgram {
    type State = ();
    type Primitive = OrbPrimitive;

    fn draw(
        &self,
        _state: &Self::State,
        _cursor: mouse::Cursor,
        _bounds: Rectangle,
    ) -> Self::Primitive {
        OrbPrimitive {
            source: self.source.clone(),
            uniforms: self.uniforms(),
        }
    }
}
