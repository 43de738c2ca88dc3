//! Landing page settings
//!
//! Embedded in the page as JSON (`<script id="landing-settings">`) so the
//! marketing side can tweak the background without a rebuild.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::*;
use crate::error::LandingError;

/// Particle background tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles (constant for a mount)
    pub particle_count: usize,
    /// Max speed per axis, units per frame
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub palette: Vec<Rgb>,

    // === Trail ===
    /// Color of the translucent overlay laid down each frame
    pub background: Rgb,
    /// Overlay alpha; lower means longer trails
    pub trail_alpha: f32,
    /// Shadow blur around each particle
    pub glow_blur: f32,

    // === Links ===
    /// Particles closer than this are connected
    pub link_distance: f32,
    /// Link alpha at zero distance
    pub link_opacity: f32,
    pub link_width: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            max_speed: PARTICLE_MAX_SPEED,
            min_radius: 1.0,
            max_radius: 4.0,
            min_opacity: 0.1,
            max_opacity: 0.6,
            palette: DEFAULT_PALETTE.to_vec(),

            background: Rgb::BLACK,
            trail_alpha: 0.05,
            glow_blur: 10.0,

            link_distance: LINK_DISTANCE,
            link_opacity: 0.1,
            link_width: 1.0,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), LandingError> {
        if self.palette.is_empty() {
            return Err(LandingError::InvalidPalette("palette has no colors".into()));
        }
        if self.particle_count > MAX_PARTICLES {
            return Err(LandingError::InvalidConfig(format!(
                "particle_count {} exceeds {MAX_PARTICLES}",
                self.particle_count
            )));
        }
        let non_negative = [
            ("max_speed", self.max_speed),
            ("trail_alpha", self.trail_alpha),
            ("glow_blur", self.glow_blur),
            ("link_opacity", self.link_opacity),
            ("link_width", self.link_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LandingError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.min_radius.is_finite()
            || !self.max_radius.is_finite()
            || self.min_radius <= 0.0
            || self.min_radius > self.max_radius
        {
            return Err(LandingError::InvalidConfig(
                "radius range must be positive with min <= max".into(),
            ));
        }
        if !self.min_opacity.is_finite()
            || !self.max_opacity.is_finite()
            || self.min_opacity <= 0.0
            || self.min_opacity > self.max_opacity
            || self.max_opacity > 1.0
        {
            return Err(LandingError::InvalidConfig(
                "opacity range must lie in (0, 1] with min <= max".into(),
            ));
        }
        if !self.link_distance.is_finite() || self.link_distance <= 0.0 {
            return Err(LandingError::InvalidConfig(
                "link_distance must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Verification puzzle tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Failed submissions allowed before lockout
    pub max_attempts: u32,
    /// Artificial delay before an answer is checked
    pub verify_delay_ms: u32,
    /// Destination when the page has no `redirect` parameter
    pub default_redirect: String,
    pub operand_min: u32,
    pub operand_max: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            verify_delay_ms: VERIFY_DELAY_MS,
            default_redirect: DEFAULT_REDIRECT.to_string(),
            operand_min: 1,
            operand_max: 10,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), LandingError> {
        if self.max_attempts == 0 {
            return Err(LandingError::InvalidConfig("max_attempts must be >= 1".into()));
        }
        if self.operand_min == 0 || self.operand_min > self.operand_max {
            return Err(LandingError::InvalidConfig(
                "operands must be positive with min <= max".into(),
            ));
        }
        Ok(())
    }
}

/// All landing page settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; random per page load when absent
    pub seed: Option<u64>,
    pub field: FieldConfig,
    pub gate: GateConfig,
}

impl Settings {
    /// Parse and validate settings JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, LandingError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), LandingError> {
        self.field.validate()?;
        self.gate.validate()
    }

    /// Element holding the embedded settings JSON
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "landing-settings";

    /// Load settings embedded in the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded landing settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring landing settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, LandingError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.field.particle_count, 50);
        assert_eq!(settings.field.palette.len(), 4);
        assert_eq!(settings.gate.max_attempts, 3);
        assert_eq!(settings.gate.default_redirect, "/dashboard");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r##"{"seed": 7, "field": {"particle_count": 12, "palette": ["#fff"]}}"##)
                .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.field.particle_count, 12);
        assert_eq!(settings.field.palette, vec![Rgb::new(255, 255, 255)]);
        assert_eq!(settings.field.link_distance, LINK_DISTANCE);
        assert_eq!(settings.gate, GateConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = Settings::from_json(r#"{"field": {"palette": []}}"#).unwrap_err();
        assert!(matches!(err, LandingError::InvalidPalette(_)));
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = Settings::from_json(r#"{"field": {"palette": ["teal"]}}"#).unwrap_err();
        assert!(matches!(err, LandingError::Settings(_)));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let mut field = FieldConfig::default();
        field.min_radius = 5.0;
        assert!(field.validate().is_err());

        let mut field = FieldConfig::default();
        field.max_opacity = 1.5;
        assert!(field.validate().is_err());

        let mut field = FieldConfig::default();
        field.link_distance = 0.0;
        assert!(field.validate().is_err());

        let mut field = FieldConfig::default();
        field.particle_count = MAX_PARTICLES + 1;
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        // 1e39 overflows f32 and parses as infinity
        for json in [
            r#"{"field": {"max_speed": 1e39}}"#,
            r#"{"field": {"max_radius": 1e39}}"#,
            r#"{"field": {"min_radius": 1e39, "max_radius": 1e39}}"#,
            r#"{"field": {"link_distance": 1e39}}"#,
            r#"{"field": {"glow_blur": 1e39}}"#,
            r#"{"field": {"link_width": 1e39}}"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, LandingError::InvalidConfig(_)), "{json}: {err}");
        }
    }

    #[test]
    fn test_rejects_nan_and_negative_styles() {
        let mut field = FieldConfig::default();
        field.max_speed = f32::NAN;
        assert!(field.validate().is_err());

        let mut field = FieldConfig::default();
        field.trail_alpha = -0.1;
        assert!(field.validate().is_err());

        let mut field = FieldConfig::default();
        field.link_opacity = f32::INFINITY;
        assert!(field.validate().is_err());

        let mut field = FieldConfig::default();
        field.min_opacity = f32::NAN;
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_gate_config() {
        let mut gate = GateConfig::default();
        gate.max_attempts = 0;
        assert!(gate.validate().is_err());

        let mut gate = GateConfig::default();
        gate.operand_min = 0;
        assert!(gate.validate().is_err());

        let mut gate = GateConfig::default();
        gate.operand_min = 11;
        assert!(gate.validate().is_err());
    }
}
