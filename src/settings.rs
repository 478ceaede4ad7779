//! Game settings and tuning
//!
//! Loaded once at startup from optional JSON. Missing fields use the defaults
//! from `consts`; nothing is written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics tuning values (pixels, pixels/frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub bounce: f32,
    pub air_resistance: f32,
    /// Drag displacement to launch velocity
    pub launch_scale: f32,
    /// Minimum |vx| + |vy| for a throw
    pub launch_threshold: f32,
    /// Spin per unit of horizontal launch velocity
    pub spin_factor: f32,
    /// Outward push after a rim hit
    pub rim_kick: f32,
    /// Frames simulated by the prediction guide
    pub prediction_steps: usize,
}

/// Upper bound on the guide horizon; each step is one pushed point per frame
pub const MAX_PREDICTION_STEPS: usize = 500;

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce: BOUNCE,
            air_resistance: AIR_RESISTANCE,
            launch_scale: LAUNCH_SCALE,
            launch_threshold: LAUNCH_THRESHOLD,
            spin_factor: SPIN_FACTOR,
            rim_kick: RIM_KICK,
            prediction_steps: PREDICTION_STEPS,
        }
    }
}

impl PhysicsTuning {
    /// Replace unusable values with defaults: non-finite floats fall back to
    /// the default for that field and the guide horizon is clamped to
    /// `1..=MAX_PREDICTION_STEPS`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite = |name: &str, value: f32, default: f32| {
            if value.is_finite() {
                value
            } else {
                log::warn!("physics.{name} = {value} is not finite, using {default}");
                default
            }
        };

        let prediction_steps = self.prediction_steps.clamp(1, MAX_PREDICTION_STEPS);
        if prediction_steps != self.prediction_steps {
            log::warn!(
                "physics.prediction_steps = {} out of range, clamped to {prediction_steps}",
                self.prediction_steps
            );
        }

        Self {
            gravity: finite("gravity", self.gravity, defaults.gravity),
            bounce: finite("bounce", self.bounce, defaults.bounce),
            air_resistance: finite(
                "air_resistance",
                self.air_resistance,
                defaults.air_resistance,
            ),
            launch_scale: finite("launch_scale", self.launch_scale, defaults.launch_scale),
            launch_threshold: finite(
                "launch_threshold",
                self.launch_threshold,
                defaults.launch_threshold,
            ),
            spin_factor: finite("spin_factor", self.spin_factor, defaults.spin_factor),
            rim_kick: finite("rim_kick", self.rim_kick, defaults.rim_kick),
            prediction_steps,
        }
    }
}

/// Remote coach tip endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachSettings {
    /// Base URL of the generateContent API
    pub endpoint: String,
    pub model: String,
    /// Empty key disables the request; the fallback tip is shown instead
    pub api_key: String,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.5-flash-preview-09-2025".to_string(),
            api_key: String::new(),
        }
    }
}

impl CoachSettings {
    /// Whether a remote request should be attempted at all
    pub fn enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Full request URL for the configured model
    pub fn url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    /// Index into `BALL_THEMES` selected at startup
    pub skin: usize,
    pub coach: CoachSettings,
}

impl Settings {
    /// Parse settings from JSON; physics values are sanitized after parsing
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.physics = settings.physics.sanitized();
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.physics.gravity, 0.35);
        assert_eq!(s.physics.bounce, 0.75);
        assert_eq!(s.physics.air_resistance, 0.995);
        assert_eq!(s.physics.prediction_steps, 25);
        assert_eq!(s.skin, 0);
        assert!(!s.coach.enabled());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "physics": { "gravity": 0.5 }, "skin": 3 }"#).unwrap();
        assert_eq!(s.physics.gravity, 0.5);
        assert_eq!(s.physics.bounce, BOUNCE);
        assert_eq!(s.skin, 3);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let s = Settings::from_json_or_default("{ not json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_oversized_prediction_steps_are_clamped() {
        let s = Settings::from_json_or_default(
            r#"{ "physics": { "prediction_steps": 18446744073709551615 } }"#,
        );
        assert_eq!(s.physics.prediction_steps, MAX_PREDICTION_STEPS);
        assert_eq!(s.physics.gravity, GRAVITY);

        let s = Settings::from_json(r#"{ "physics": { "prediction_steps": 0 } }"#).unwrap();
        assert_eq!(s.physics.prediction_steps, 1);
    }

    #[test]
    fn test_non_finite_tuning_falls_back() {
        let tuning = PhysicsTuning {
            gravity: f32::NAN,
            bounce: f32::INFINITY,
            rim_kick: 3.0,
            ..PhysicsTuning::default()
        }
        .sanitized();
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.bounce, BOUNCE);
        assert_eq!(tuning.rim_kick, 3.0);
    }

    #[test]
    fn test_coach_url() {
        let coach = CoachSettings {
            endpoint: "https://example.test/models/".to_string(),
            model: "m1".to_string(),
            api_key: "k".to_string(),
        };
        assert!(coach.enabled());
        assert_eq!(coach.url(), "https://example.test/models/m1:generateContent?key=k");
    }
}
