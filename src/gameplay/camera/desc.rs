use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("{name} must be greater than 0, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("fov bounds must satisfy 0 < min <= max < 180, got [{min}, {max}]")]
    InvalidFovBounds { min: f32, max: f32 },
    #[error("pitch limit must be in the range (0, 90), got {0}")]
    InvalidPitchLimit(f32),
    #[error("clip planes must satisfy 0 < near < far, got near {near} far {far}")]
    InvalidClipPlanes { near: f32, far: f32 },
    #[error("look direction must not be zero")]
    ZeroLookDirection,
    #[error("world up must not be zero")]
    ZeroWorldUp,
    #[error("world up must point along +y, got {0}")]
    UnsupportedWorldUp(glam::Vec3),
    #[error("look direction must not be parallel to world up")]
    LookDirectionParallelToUp,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read camera config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse camera config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid camera config: {0}")]
    Invalid(#[from] CameraError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraMovementDesc {
    /// Units per second.
    pub normal_speed: f32,
    pub boosted_speed_mul: f32,
    /// Degrees per cursor unit.
    pub mouse_sensitivity: f32,
}

impl Default for CameraMovementDesc {
    fn default() -> Self {
        Self {
            normal_speed: 2.5,
            boosted_speed_mul: 4.0,
            mouse_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraProjectionDesc {
    /// Initial vertical fov in degrees.
    pub v_fov: f32,
    pub min_v_fov: f32,
    pub max_v_fov: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraProjectionDesc {
    fn default() -> Self {
        Self {
            v_fov: 45.0,
            min_v_fov: 1.0,
            max_v_fov: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub movement: CameraMovementDesc,
    pub projection: CameraProjectionDesc,
    /// Pitch is kept within [-pitch_limit, pitch_limit] degrees.
    pub pitch_limit: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            movement: Default::default(),
            projection: Default::default(),
            pitch_limit: 89.0,
        }
    }
}

fn ensure_positive(name: &'static str, value: f32) -> Result<(), CameraError> {
    // written so that NaN is rejected too
    if !(value > 0.0) {
        return Err(CameraError::NonPositive { name, value });
    }
    Ok(())
}

impl CameraDesc {
    pub fn validate(&self) -> Result<(), CameraError> {
        ensure_positive("normal_speed", self.movement.normal_speed)?;
        ensure_positive("boosted_speed_mul", self.movement.boosted_speed_mul)?;
        ensure_positive("mouse_sensitivity", self.movement.mouse_sensitivity)?;

        let proj = &self.projection;
        if !(proj.min_v_fov > 0.0 && proj.min_v_fov <= proj.max_v_fov && proj.max_v_fov < 180.0) {
            return Err(CameraError::InvalidFovBounds {
                min: proj.min_v_fov,
                max: proj.max_v_fov,
            });
        }
        if !(proj.z_near > 0.0 && proj.z_near < proj.z_far) {
            return Err(CameraError::InvalidClipPlanes {
                near: proj.z_near,
                far: proj.z_far,
            });
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < 90.0) {
            return Err(CameraError::InvalidPitchLimit(self.pitch_limit));
        }
        Ok(())
    }

    /// Parses a TOML document, fields that are left out keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let desc: CameraDesc = toml::from_str(source)?;
        desc.validate()?;
        Ok(desc)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let desc = Self::from_toml_str(&source)?;
        log::info!("Loaded camera config from {}", path.display());
        Ok(desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_desc_is_valid() {
        let desc = CameraDesc::default();
        assert!(desc.validate().is_ok());
        assert_eq!(desc.projection.min_v_fov, 1.0);
        assert_eq!(desc.projection.max_v_fov, 45.0);
        assert_eq!(desc.pitch_limit, 89.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let desc = CameraDesc::from_toml_str(
            r#"
            pitch_limit = 80.0

            [movement]
            normal_speed = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(desc.pitch_limit, 80.0);
        assert_eq!(desc.movement.normal_speed, 5.0);
        assert_eq!(
            desc.movement.mouse_sensitivity,
            CameraMovementDesc::default().mouse_sensitivity
        );
        assert_eq!(desc.projection, CameraProjectionDesc::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let desc = CameraDesc::from_toml_str("").unwrap();
        assert_eq!(desc, CameraDesc::default());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let res = CameraDesc::from_toml_str("pitch_limit = \"steep\"");
        assert!(matches!(res, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_pitch_limit_at_ninety() {
        let res = CameraDesc::from_toml_str("pitch_limit = 90.0");
        assert!(matches!(
            res,
            Err(ConfigError::Invalid(CameraError::InvalidPitchLimit(_)))
        ));
    }

    #[test]
    fn test_rejects_inverted_fov_bounds() {
        let mut desc = CameraDesc::default();
        desc.projection.min_v_fov = 50.0;
        desc.projection.max_v_fov = 10.0;
        assert!(matches!(
            desc.validate(),
            Err(CameraError::InvalidFovBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let mut desc = CameraDesc::default();
        desc.movement.normal_speed = 0.0;
        assert!(matches!(
            desc.validate(),
            Err(CameraError::NonPositive {
                name: "normal_speed",
                ..
            })
        ));

        desc.movement.normal_speed = f32::NAN;
        assert!(desc.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_clip_planes() {
        let mut desc = CameraDesc::default();
        desc.projection.z_near = 10.0;
        desc.projection.z_far = 1.0;
        assert!(matches!(
            desc.validate(),
            Err(CameraError::InvalidClipPlanes { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let res = CameraDesc::load("/definitely/not/here/camera.toml");
        assert!(matches!(res, Err(ConfigError::Io(_))));
    }
}
