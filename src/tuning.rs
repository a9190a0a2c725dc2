//! Game balance parameters
//!
//! Defaults reproduce the classic cabinet feel; a JSON document can override
//! any subset of fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value for `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Data-driven balance for one game instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player horizontal speed (pixels per tick)
    pub player_speed: f32,
    /// Player bullet speed (pixels per tick); invader bullets move at half this
    pub bullet_speed: f32,
    /// Invader horizontal step (pixels per movement tick)
    pub invader_speed_x: f32,
    /// Invader drop when the block reverses (pixels)
    pub invader_drop: f32,
    /// Invaders move once every this many ticks
    pub invader_step_interval: u32,
    /// Chance (0-1) that no invader fires on a given tick
    pub invader_non_fire_rate: f64,
    /// Maximum live player bullets
    pub max_player_bullets: usize,
    /// Score awarded per invader destroyed
    pub points_per_invader: u32,
    /// Lives at the start of a game
    pub starting_lives: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            bullet_speed: 7.0,
            invader_speed_x: 1.0,
            invader_drop: 15.0,
            invader_step_interval: 25,
            invader_non_fire_rate: 0.99,
            max_player_bullets: 2,
            points_per_invader: 10,
            starting_lives: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Tuning with invader fire switched off
    pub fn without_invader_fire() -> Self {
        Self {
            invader_non_fire_rate: 1.0,
            ..Self::default()
        }
    }

    /// Chance that an invader fires on a given tick
    pub fn invader_fire_chance(&self) -> f64 {
        1.0 - self.invader_non_fire_rate
    }

    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("player_speed", self.player_speed)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("invader_speed_x", self.invader_speed_x)?;
        positive("invader_drop", self.invader_drop)?;

        if self.invader_step_interval == 0 {
            return Err(TuningError::Invalid {
                field: "invader_step_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.invader_non_fire_rate) {
            return Err(TuningError::Invalid {
                field: "invader_non_fire_rate",
                reason: format!("{} is outside [0, 1]", self.invader_non_fire_rate),
            });
        }
        if self.max_player_bullets == 0 {
            return Err(TuningError::Invalid {
                field: "max_player_bullets",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("{} must be a positive number", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.invader_step_interval, 25);
        assert!((tuning.invader_fire_chance() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 8.0, "starting_lives": 5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.player_speed, 8.0);
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.bullet_speed, Tuning::default().bullet_speed);
    }

    #[test]
    fn test_rejects_out_of_range_fire_rate() {
        let err = Tuning::from_json(r#"{ "invader_non_fire_rate": 1.5 }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "invader_non_fire_rate"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_zero_interval() {
        let tuning = Tuning {
            invader_step_interval: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }

    #[test]
    fn test_without_invader_fire() {
        let tuning = Tuning::without_invader_fire();
        assert_eq!(tuning.invader_fire_chance(), 0.0);
        assert!(tuning.validate().is_ok());
    }
}
