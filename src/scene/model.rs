use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    animation::{order::RevealOrder, preset::PresetOr},
    canvas::{particles::ParticleConfig, squares::SquaresConfig},
    foundation::{
        core::Rect,
        error::{MotionError, MotionResult},
    },
    runtime::visibility::{Viewport, VisibilityOptions},
    text::{scramble::ScrambleConfig, stagger::StaggerConfig, variant::Distance},
};

/// A page of mounted animation components, loaded from JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    /// Global determinism seed.
    #[serde(default)]
    pub seed: u64,
    pub components: Vec<ComponentDef>,
}

/// Page-space placement of a component's container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundsDef {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundsDef {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentDef {
    Scramble {
        bounds: BoundsDef,
        #[serde(flatten)]
        config: ScrambleConfig,
    },
    Stagger {
        bounds: BoundsDef,
        #[serde(flatten)]
        config: StaggerConfig,
    },
    Particles {
        bounds: BoundsDef,
        #[serde(flatten)]
        config: ParticleConfig,
    },
    Squares {
        bounds: BoundsDef,
        #[serde(flatten)]
        config: SquaresConfig,
    },
}

impl ComponentDef {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scramble { .. } => "scramble",
            Self::Stagger { .. } => "stagger",
            Self::Particles { .. } => "particles",
            Self::Squares { .. } => "squares",
        }
    }

    pub fn bounds(&self) -> BoundsDef {
        match self {
            Self::Scramble { bounds, .. }
            | Self::Stagger { bounds, .. }
            | Self::Particles { bounds, .. }
            | Self::Squares { bounds, .. } => *bounds,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let b = self.bounds();
        for (name, v) in [("x", b.x), ("y", b.y), ("width", b.width), ("height", b.height)] {
            finite(name, v)?;
        }
        if b.width <= 0.0 || b.height <= 0.0 {
            return Err(MotionError::validation("bounds width/height must be > 0"));
        }

        match self {
            Self::Scramble { config, .. } => {
                non_negative("duration_ms", config.duration_ms)?;
                positive("interval_ms", config.interval_ms)?;
                non_negative("delay_ms", config.delay_ms)?;
                unit_range("flicker_chance", config.flicker_chance)?;
                validate_visibility(&config.visibility)?;
            }
            Self::Stagger { config, .. } => {
                if config.order == RevealOrder::Random && !config.profile().allows_random {
                    return Err(MotionError::validation(format!(
                        "order 'random' is only supported by word-reveal, not {}",
                        config.variant.name()
                    )));
                }
                if let PresetOr::Value(m) = config.speed {
                    positive("speed", m)?;
                }
                non_negative("delay_ms", config.delay_ms)?;
                positive("font_size_px", config.font_size_px)?;
                positive("line_height", config.line_height)?;
                finite("letter_spacing_em", config.letter_spacing_em)?;
                if let Some(s) = config.word_letter_spacing_em {
                    finite("word_letter_spacing_em", s)?;
                }
                match config.distance {
                    Some(Distance::Px(v)) => finite("distance.px", v)?,
                    Some(Distance::Percent(v)) => finite("distance.percent", v)?,
                    None => {}
                }
                validate_visibility(&config.visibility)?;
            }
            Self::Particles { config, .. } => {
                if let PresetOr::Value(v) = config.density {
                    non_negative("density", v)?;
                }
                if let PresetOr::Value(v) = config.speed {
                    non_negative("speed", v)?;
                }
                if let PresetOr::Value(v) = config.size {
                    positive("size", v)?;
                }
                non_negative("fade_in_ms", config.fade_in_ms)?;
                non_negative("min_lifetime_ms", config.min_lifetime_ms)?;
                non_negative("max_lifetime_ms", config.max_lifetime_ms)?;
                if config.min_lifetime_ms > config.max_lifetime_ms {
                    return Err(MotionError::validation(
                        "min_lifetime_ms must not exceed max_lifetime_ms",
                    ));
                }
            }
            Self::Squares { config, .. } => {
                finite("speed", config.speed)?;
                finite("cell_size", config.cell_size)?;
                if config.cell_size < 1.0 {
                    return Err(MotionError::validation("cell_size must be >= 1"));
                }
            }
        }
        Ok(())
    }
}

fn finite(name: &str, v: f64) -> MotionResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(MotionError::validation(format!("{name} must be finite")))
    }
}

fn non_negative(name: &str, v: f64) -> MotionResult<()> {
    finite(name, v)?;
    if v < 0.0 {
        return Err(MotionError::validation(format!("{name} must be >= 0")));
    }
    Ok(())
}

fn positive(name: &str, v: f64) -> MotionResult<()> {
    finite(name, v)?;
    if v <= 0.0 {
        return Err(MotionError::validation(format!("{name} must be > 0")));
    }
    Ok(())
}

fn unit_range(name: &str, v: f64) -> MotionResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(MotionError::validation(format!("{name} must be in [0, 1]")));
    }
    Ok(())
}

fn validate_visibility(v: &VisibilityOptions) -> MotionResult<()> {
    unit_range("visibility.threshold", v.threshold)?;
    finite("visibility.bottom_inset_px", v.bottom_inset_px)
}

impl Scene {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    pub fn validate(&self) -> MotionResult<()> {
        let vp = &self.viewport;
        for (name, v) in [
            ("viewport.width", vp.width),
            ("viewport.height", vp.height),
            ("viewport.scroll_y", vp.scroll_y),
        ] {
            finite(name, v)?;
        }
        if vp.width <= 0.0 || vp.height <= 0.0 {
            return Err(MotionError::validation("viewport width/height must be > 0"));
        }
        for (i, c) in self.components.iter().enumerate() {
            c.validate().map_err(|e| match e {
                MotionError::Validation(msg) => {
                    MotionError::validation(format!("component {i} ({}): {msg}", c.kind()))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
