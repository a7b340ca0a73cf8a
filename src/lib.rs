//! Deterministic text and canvas animation engine for marketing pages.
//!
//! A [`Stage`] stands in for the host page: it owns a virtual clock, a scrollable [`Viewport`]
//! and the mounted components. Nothing moves until the host calls [`Stage::advance_to`], so every
//! run is reproducible from its inputs and seed.
//!
//! Components:
//! - [`ScrambleEngine`]: hover/click/visibility-driven scramble reveal with green placeholders.
//! - [`StaggerReveal`]: per-letter or per-word masked reveal in four variants.
//! - [`ParticleField`]: drifting, aging particles filling a canvas.
//! - [`SquaresField`]: scrolling grid with hover patterns and a radial vignette.
//!
//! Pages are usually described as JSON and loaded through [`Scene`].
#![forbid(unsafe_code)]

mod animation;
mod canvas;
mod foundation;
mod render;
mod runtime;
mod scene;
mod text;

pub use animation::{
    ease::Ease,
    order::{CenterBias, RevealOrder, order_indices, reveal_sequence},
    preset::{
        DensityPreset, MIN_SPEED_MULTIPLIER, PresetOr, SizePreset, SpeedPreset, SpeedSpec,
        SpeedTable, StaggerTiming, resolve_speed,
    },
};
pub use canvas::{
    particles::{
        DensitySpec, DriftSpec, Particle, ParticleConfig, ParticleField, ParticleSim,
        ParticleSnapshot, SizeSpec, resolve_density, resolve_drift, resolve_size, target_count,
    },
    pattern::{Cell, HoverPattern},
    squares::{
        GridDirection, GridOffset, GridSim, MIN_GRID_SPEED, SquaresConfig, SquaresField,
        SquaresSnapshot, effective_speed,
    },
};
pub use foundation::{
    color::ColorDef,
    core::{CanvasSize, FRAME_INTERVAL_MS, Millis, Point, Rect, Vec2},
    error::{MotionError, MotionResult},
    rng::Rng64,
};
pub use render::{
    backend::FrameRGBA,
    cpu::{CanvasPainter, CpuCanvas, DrawContext, apply_radial_vignette},
};
pub use runtime::{
    component::{Component, Cx, HostEvent, Snapshot},
    scheduler::{
        ComponentId, Due, EventKind, ListenerHandle, ObserverHandle, Scheduler, SchedulerStats,
        TaskHandle, TaskId, TaskKind,
    },
    stage::Stage,
    trigger::{AnimationTrigger, RunPhase, TriggerDetector, TriggerSignal},
    visibility::{
        Viewport, VisibilityOptions, intersection_ratio, is_visible, observation_root,
    },
};
pub use scene::model::{BoundsDef, ComponentDef, Scene};
pub use text::{
    scramble::{
        SCRAMBLE_GLYPHS, ScrambleConfig, ScrambleDirection, ScrambleEngine, ScrambleRun,
        ScrambleSnapshot, ScrambledGlyph, total_frames,
    },
    split::{Granularity, TextUnit, group_sizes, split_units},
    stagger::{
        BLEED_EM, MaskInsets, RevealState, StaggerConfig, StaggerReveal, StaggerSnapshot,
        UnitSnapshot, UnitStyle, unit_style,
    },
    variant::{Distance, RevealVariant, VariantProfile},
};
