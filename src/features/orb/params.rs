//! Effect parameters
//!
//! One live `EffectParameters` value is owned by the host, mutated by the
//! controls and read by the kernels every frame. All float fields have a
//! descriptor with a bounded range; writes through [`EffectParameters::set`]
//! clamp to it.

/// Descriptor for a floating-point parameter with bounded range
#[derive(Clone, Debug)]
pub struct FloatParamDescriptor {
    pub name: &'static str,
    /// Short label shown next to the slider
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl FloatParamDescriptor {
    /// Clamp a value into range. Non-finite input falls back to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }
}

// ==================== MOTION ====================

pub const MOTION_SPEED: FloatParamDescriptor = FloatParamDescriptor {
    name: "motion_speed",
    label: "Speed",
    min: 0.0,
    max: 1.0,
    default: 0.26,
};

pub const MOTION_STRENGTH: FloatParamDescriptor = FloatParamDescriptor {
    name: "motion_strength",
    label: "Strength",
    min: 0.0,
    max: 0.2,
    default: 0.05,
};

pub const MOTION_FREQUENCY: FloatParamDescriptor = FloatParamDescriptor {
    name: "motion_frequency",
    label: "Frequency",
    min: 0.0,
    max: 1.0,
    default: 0.24,
};

pub const MOTION_NOISE: FloatParamDescriptor = FloatParamDescriptor {
    name: "motion_noise",
    label: "Noise",
    min: 0.0,
    max: 1.0,
    default: 0.5,
};

// ==================== VISUAL ====================

pub const GLOW_INTENSITY: FloatParamDescriptor = FloatParamDescriptor {
    name: "glow_intensity",
    label: "Glow",
    min: 0.0,
    max: 1.0,
    default: 0.5,
};

pub const LIGHT_INTENSITY: FloatParamDescriptor = FloatParamDescriptor {
    name: "light_intensity",
    label: "Light",
    min: 0.0,
    max: 1.0,
    default: 0.3,
};

pub const EDGE_INTENSITY: FloatParamDescriptor = FloatParamDescriptor {
    name: "edge_intensity",
    label: "Edge",
    min: 0.0,
    max: 1.0,
    default: 0.5,
};

pub const LENS_INTENSITY: FloatParamDescriptor = FloatParamDescriptor {
    name: "lens_intensity",
    label: "Lens",
    min: 0.0,
    max: 1.0,
    default: 0.7,
};

pub const REFLECTION_INTENSITY: FloatParamDescriptor = FloatParamDescriptor {
    name: "reflection_intensity",
    label: "Reflection",
    min: 0.0,
    max: 1.0,
    default: 0.7,
};

/// Default for the motion toggle
pub const MOTION_ENABLED_DEFAULT: bool = true;

/// Control tab that owns a group of parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Motion,
    Visual,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Motion, Tab::Visual];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Motion => "MOTION",
            Tab::Visual => "VISUAL",
        }
    }

    /// Label of the boolean toggle shown above the sliders, if the tab has one
    pub fn toggle_label(&self) -> Option<&'static str> {
        match self {
            Tab::Motion => Some("Animate"),
            Tab::Visual => None,
        }
    }

    /// Float parameters shown on this tab, in display order
    pub fn params(&self) -> &'static [FloatParam] {
        match self {
            Tab::Motion => &[
                FloatParam::MotionSpeed,
                FloatParam::MotionStrength,
                FloatParam::MotionFrequency,
                FloatParam::MotionNoise,
            ],
            Tab::Visual => &[
                FloatParam::GlowIntensity,
                FloatParam::LightIntensity,
                FloatParam::EdgeIntensity,
                FloatParam::LensIntensity,
                FloatParam::ReflectionIntensity,
            ],
        }
    }
}

/// Identifier for each float parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatParam {
    MotionSpeed,
    MotionStrength,
    MotionFrequency,
    MotionNoise,
    GlowIntensity,
    LightIntensity,
    EdgeIntensity,
    LensIntensity,
    ReflectionIntensity,
}

impl FloatParam {
    pub fn descriptor(&self) -> &'static FloatParamDescriptor {
        match self {
            FloatParam::MotionSpeed => &MOTION_SPEED,
            FloatParam::MotionStrength => &MOTION_STRENGTH,
            FloatParam::MotionFrequency => &MOTION_FREQUENCY,
            FloatParam::MotionNoise => &MOTION_NOISE,
            FloatParam::GlowIntensity => &GLOW_INTENSITY,
            FloatParam::LightIntensity => &LIGHT_INTENSITY,
            FloatParam::EdgeIntensity => &EDGE_INTENSITY,
            FloatParam::LensIntensity => &LENS_INTENSITY,
            FloatParam::ReflectionIntensity => &REFLECTION_INTENSITY,
        }
    }
}

/// Live effect parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParameters {
    pub motion_enabled: bool,
    pub motion_speed: f32,
    pub motion_strength: f32,
    pub motion_frequency: f32,
    pub motion_noise: f32,
    pub glow_intensity: f32,
    pub light_intensity: f32,
    pub edge_intensity: f32,
    pub lens_intensity: f32,
    pub reflection_intensity: f32,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            motion_enabled: MOTION_ENABLED_DEFAULT,
            motion_speed: MOTION_SPEED.default,
            motion_strength: MOTION_STRENGTH.default,
            motion_frequency: MOTION_FREQUENCY.default,
            motion_noise: MOTION_NOISE.default,
            glow_intensity: GLOW_INTENSITY.default,
            light_intensity: LIGHT_INTENSITY.default,
            edge_intensity: EDGE_INTENSITY.default,
            lens_intensity: LENS_INTENSITY.default,
            reflection_intensity: REFLECTION_INTENSITY.default,
        }
    }
}

impl EffectParameters {
    /// Read a float parameter
    pub fn get(&self, param: FloatParam) -> f32 {
        match param {
            FloatParam::MotionSpeed => self.motion_speed,
            FloatParam::MotionStrength => self.motion_strength,
            FloatParam::MotionFrequency => self.motion_frequency,
            FloatParam::MotionNoise => self.motion_noise,
            FloatParam::GlowIntensity => self.glow_intensity,
            FloatParam::LightIntensity => self.light_intensity,
            FloatParam::EdgeIntensity => self.edge_intensity,
            FloatParam::LensIntensity => self.lens_intensity,
            FloatParam::ReflectionIntensity => self.reflection_intensity,
        }
    }

    /// Write a float parameter, clamped to its declared range
    pub fn set(&mut self, param: FloatParam, value: f32) {
        let value = param.descriptor().clamp(value);
        match param {
            FloatParam::MotionSpeed => self.motion_speed = value,
            FloatParam::MotionStrength => self.motion_strength = value,
            FloatParam::MotionFrequency => self.motion_frequency = value,
            FloatParam::MotionNoise => self.motion_noise = value,
            FloatParam::GlowIntensity => self.glow_intensity = value,
            FloatParam::LightIntensity => self.light_intensity = value,
            FloatParam::EdgeIntensity => self.edge_intensity = value,
            FloatParam::LensIntensity => self.lens_intensity = value,
            FloatParam::ReflectionIntensity => self.reflection_intensity = value,
        }
    }

    /// Restore the defaults of one tab, leaving the other tab untouched
    pub fn reset(&mut self, tab: Tab) {
        let defaults = Self::default();
        match tab {
            Tab::Motion => self.motion_enabled = defaults.motion_enabled,
            Tab::Visual => {}
        }
        for &param in tab.params() {
            self.set(param, defaults.get(param));
        }
    }

    /// Copy with every float field clamped into range
    ///
    /// Kernels call this on entry so out-of-range or NaN input can never
    /// produce undefined sampling coordinates.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for tab in Tab::ALL {
            for &param in tab.params() {
                out.set(param, self.get(param));
            }
        }
        out
    }

    /// Displacement amplitude seen by the kernels (zero while motion is off)
    #[inline]
    pub fn effective_motion_strength(&self) -> f32 {
        if self.motion_enabled {
            MOTION_STRENGTH.clamp(self.motion_strength)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_motion_restores_documented_defaults() {
        let mut params = EffectParameters {
            motion_enabled: false,
            motion_speed: 0.9,
            motion_strength: 0.2,
            motion_frequency: 1.0,
            motion_noise: 0.0,
            glow_intensity: 0.1,
            ..Default::default()
        };
        params.reset(Tab::Motion);

        assert!(params.motion_enabled);
        assert_eq!(params.motion_speed, 0.26);
        assert_eq!(params.motion_strength, 0.05);
        assert_eq!(params.motion_frequency, 0.24);
        assert_eq!(params.motion_noise, 0.5);
        // Other tab untouched
        assert_eq!(params.glow_intensity, 0.1);
    }

    #[test]
    fn test_reset_visual_restores_documented_defaults() {
        let mut params = EffectParameters {
            motion_speed: 0.9,
            glow_intensity: 0.0,
            light_intensity: 1.0,
            edge_intensity: 0.0,
            lens_intensity: 0.0,
            reflection_intensity: 0.0,
            ..Default::default()
        };
        params.reset(Tab::Visual);

        assert_eq!(params.glow_intensity, 0.5);
        assert_eq!(params.light_intensity, 0.3);
        assert_eq!(params.edge_intensity, 0.5);
        assert_eq!(params.lens_intensity, 0.7);
        assert_eq!(params.reflection_intensity, 0.7);
        assert_eq!(params.motion_speed, 0.9);
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut params = EffectParameters::default();
        params.set(FloatParam::MotionStrength, 0.5);
        assert_eq!(params.motion_strength, 0.2);
        params.set(FloatParam::LensIntensity, -3.0);
        assert_eq!(params.lens_intensity, 0.0);
        params.set(FloatParam::GlowIntensity, f32::NAN);
        assert_eq!(params.glow_intensity, GLOW_INTENSITY.default);
    }

    #[test]
    fn test_clamped_sanitizes_raw_fields() {
        let raw = EffectParameters {
            motion_speed: f32::INFINITY,
            edge_intensity: 7.0,
            motion_noise: -1.0,
            ..Default::default()
        };
        let clamped = raw.clamped();
        assert_eq!(clamped.motion_speed, MOTION_SPEED.default);
        assert_eq!(clamped.edge_intensity, 1.0);
        assert_eq!(clamped.motion_noise, 0.0);
    }

    #[test]
    fn test_effective_strength_zero_when_disabled() {
        let params = EffectParameters {
            motion_enabled: false,
            ..Default::default()
        };
        assert_eq!(params.effective_motion_strength(), 0.0);
        assert_eq!(EffectParameters::default().effective_motion_strength(), 0.05);
    }

    #[test]
    fn test_only_motion_tab_has_toggle() {
        assert_eq!(Tab::Motion.toggle_label(), Some("Animate"));
        assert_eq!(Tab::Visual.toggle_label(), None);
    }

    #[test]
    fn test_every_param_is_on_exactly_one_tab() {
        let all: Vec<FloatParam> = Tab::ALL.iter().flat_map(|t| t.params()).copied().collect();
        assert_eq!(all.len(), 9);
        for param in &all {
            assert_eq!(all.iter().filter(|p| *p == param).count(), 1);
        }
        for tab in Tab::ALL {
            for param in tab.params() {
                let d = param.descriptor();
                assert!(d.min < d.max);
                assert!(d.default >= d.min && d.default <= d.max);
            }
        }
    }
}
