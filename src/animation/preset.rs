//! Named-preset-or-number parameters and the speed resolver shared by text reveals.

use crate::foundation::core::Millis;

/// A parameter given either as a named preset or a raw number.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PresetOr<P> {
    Preset(P),
    Value(f64),
}

impl<P: Copy> PresetOr<P> {
    /// Resolve through `table` for presets; raw values pass through unchanged.
    pub fn resolve_with(self, table: impl FnOnce(P) -> f64) -> f64 {
        match self {
            Self::Preset(p) => table(p),
            Self::Value(v) => v,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Medium,
    Fast,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityPreset {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    Small,
    #[default]
    Medium,
    Large,
}

/// `speed` option: preset or numeric multiplier (`2.0` = twice as fast).
pub type SpeedSpec = PresetOr<SpeedPreset>;

impl Default for SpeedSpec {
    fn default() -> Self {
        Self::Preset(SpeedPreset::Medium)
    }
}

/// Timing of a staggered reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerTiming {
    /// Motion time of one unit.
    pub duration_ms: Millis,
    /// Delay between consecutive order indices.
    pub stagger_ms: Millis,
    /// Extra delay per word for word-grouped variants.
    pub word_delay_ms: Millis,
}

impl StaggerTiming {
    pub const fn new(duration_ms: Millis, stagger_ms: Millis, word_delay_ms: Millis) -> Self {
        Self {
            duration_ms,
            stagger_ms,
            word_delay_ms,
        }
    }
}

/// Preset lookup table plus the numeric-override baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedTable {
    pub slow: StaggerTiming,
    pub medium: StaggerTiming,
    pub fast: StaggerTiming,
    /// Timing at multiplier `1.0`.
    pub baseline: StaggerTiming,
    /// Lower bounds applied after dividing by a multiplier.
    pub floor: StaggerTiming,
}

/// Multipliers at or below zero (or non-finite) are treated as this.
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;

impl SpeedTable {
    pub fn preset(&self, preset: SpeedPreset) -> StaggerTiming {
        match preset {
            SpeedPreset::Slow => self.slow,
            SpeedPreset::Medium => self.medium,
            SpeedPreset::Fast => self.fast,
        }
    }

    /// Scale the baseline inversely by `multiplier`, never below the floor.
    pub fn scaled(&self, multiplier: f64) -> StaggerTiming {
        let m = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier.max(MIN_SPEED_MULTIPLIER)
        } else {
            MIN_SPEED_MULTIPLIER
        };
        StaggerTiming {
            duration_ms: (self.baseline.duration_ms / m).max(self.floor.duration_ms),
            stagger_ms: (self.baseline.stagger_ms / m).max(self.floor.stagger_ms),
            word_delay_ms: (self.baseline.word_delay_ms / m).max(self.floor.word_delay_ms),
        }
    }
}

pub fn resolve_speed(spec: SpeedSpec, table: &SpeedTable) -> StaggerTiming {
    match spec {
        PresetOr::Preset(p) => table.preset(p),
        PresetOr::Value(m) => table.scaled(m),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/preset.rs"]
mod tests;
