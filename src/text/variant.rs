//! Parameter profiles of the staggered reveal variants.

use crate::{
    animation::{
        order::CenterBias,
        preset::{SpeedTable, StaggerTiming},
    },
    text::split::Granularity,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealVariant {
    /// Letters slide up from below a clipping mask.
    #[default]
    CleanSlide,
    /// Letters lift a short fixed distance while fading in.
    LiftUp,
    /// Letters slide up word by word.
    WordReveal,
    /// The whole block slides up at once.
    TextReveal,
}

/// Offset a hidden unit starts from, below its resting position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Px(f64),
    /// Percentage of the line box (`font_size * line_height`).
    Percent(f64),
}

impl Distance {
    pub fn to_px(self, font_size_px: f64, line_height: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => font_size_px * line_height * p / 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantProfile {
    pub granularity: Granularity,
    pub speeds: SpeedTable,
    pub distance: Distance,
    /// Opacity follows the motion instead of staying at 1.
    pub fade: bool,
    pub center_bias: CenterBias,
    pub allows_random: bool,
    /// Words reset letter-spacing independently of the parent.
    pub word_spacing_reset: bool,
}

const fn timing(duration_ms: f64, stagger_ms: f64) -> StaggerTiming {
    StaggerTiming::new(duration_ms, stagger_ms, 0.0)
}

static CLEAN_SLIDE: VariantProfile = VariantProfile {
    granularity: Granularity::Letter,
    speeds: SpeedTable {
        slow: timing(900.0, 60.0),
        medium: timing(650.0, 40.0),
        fast: timing(450.0, 25.0),
        baseline: timing(650.0, 40.0),
        floor: timing(100.0, 5.0),
    },
    distance: Distance::Percent(100.0),
    fade: false,
    center_bias: CenterBias::RightFirst,
    allows_random: false,
    word_spacing_reset: false,
};

static LIFT_UP: VariantProfile = VariantProfile {
    granularity: Granularity::Letter,
    speeds: SpeedTable {
        slow: timing(1000.0, 80.0),
        medium: timing(700.0, 50.0),
        fast: timing(500.0, 30.0),
        baseline: timing(700.0, 50.0),
        floor: timing(100.0, 5.0),
    },
    distance: Distance::Px(20.0),
    fade: true,
    center_bias: CenterBias::RightFirst,
    allows_random: false,
    word_spacing_reset: false,
};

static WORD_REVEAL: VariantProfile = VariantProfile {
    granularity: Granularity::LetterInWord,
    speeds: SpeedTable {
        slow: StaggerTiming::new(800.0, 50.0, 150.0),
        medium: StaggerTiming::new(600.0, 35.0, 100.0),
        fast: StaggerTiming::new(400.0, 20.0, 60.0),
        baseline: StaggerTiming::new(600.0, 35.0, 100.0),
        floor: StaggerTiming::new(100.0, 5.0, 10.0),
    },
    distance: Distance::Percent(110.0),
    fade: false,
    center_bias: CenterBias::LeftFirst,
    allows_random: true,
    word_spacing_reset: true,
};

static TEXT_REVEAL: VariantProfile = VariantProfile {
    granularity: Granularity::Block,
    speeds: SpeedTable {
        slow: timing(1200.0, 0.0),
        medium: timing(900.0, 0.0),
        fast: timing(600.0, 0.0),
        baseline: timing(900.0, 0.0),
        floor: timing(150.0, 0.0),
    },
    distance: Distance::Percent(100.0),
    fade: true,
    center_bias: CenterBias::RightFirst,
    allows_random: false,
    word_spacing_reset: false,
};

impl RevealVariant {
    pub fn profile(self) -> &'static VariantProfile {
        match self {
            Self::CleanSlide => &CLEAN_SLIDE,
            Self::LiftUp => &LIFT_UP,
            Self::WordReveal => &WORD_REVEAL,
            Self::TextReveal => &TEXT_REVEAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CleanSlide => "clean-slide",
            Self::LiftUp => "lift-up",
            Self::WordReveal => "word-reveal",
            Self::TextReveal => "text-reveal",
        }
    }
}
