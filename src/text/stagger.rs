//! Letter/word stagger reveal shared by the clean-slide, lift-up, word-reveal and text-reveal
//! variants.

use crate::{
    animation::{
        ease::Ease,
        order::{RevealOrder, order_indices},
        preset::{SpeedSpec, StaggerTiming, resolve_speed},
    },
    foundation::core::Millis,
    foundation::error::MotionResult,
    foundation::rng::Rng64,
    runtime::component::{Component, Cx, HostEvent, Snapshot},
    runtime::scheduler::TaskHandle,
    runtime::trigger::{AnimationTrigger, RunPhase, TriggerDetector, TriggerSignal},
    runtime::visibility::VisibilityOptions,
    text::split::{Granularity, TextUnit, group_sizes, split_units},
    text::variant::{Distance, RevealVariant, VariantProfile},
};

/// Vertical room reserved around each unit's clipping mask, in em.
pub const BLEED_EM: f64 = 0.25;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub text: String,
    pub variant: RevealVariant,
    pub trigger: AnimationTrigger,
    pub once: bool,
    pub speed: SpeedSpec,
    pub order: RevealOrder,
    /// Fixed delay before the first unit starts.
    pub delay_ms: Millis,
    /// Overrides the variant's unit size.
    pub granularity: Option<Granularity>,
    /// Overrides the variant's travel distance.
    pub distance: Option<Distance>,
    pub font_size_px: f64,
    pub line_height: f64,
    pub letter_spacing_em: f64,
    /// Letter-spacing applied inside each word by variants that reset it.
    pub word_letter_spacing_em: Option<f64>,
    pub visibility: VisibilityOptions,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            variant: RevealVariant::default(),
            trigger: AnimationTrigger::Visible,
            once: true,
            speed: SpeedSpec::default(),
            order: RevealOrder::default(),
            delay_ms: 0.0,
            granularity: None,
            distance: None,
            font_size_px: 16.0,
            line_height: 1.2,
            letter_spacing_em: 0.0,
            word_letter_spacing_em: None,
            visibility: VisibilityOptions::default(),
        }
    }
}

impl StaggerConfig {
    pub fn profile(&self) -> &'static VariantProfile {
        self.variant.profile()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity.unwrap_or(self.profile().granularity)
    }

    pub fn timing(&self) -> StaggerTiming {
        resolve_speed(self.speed, &self.profile().speeds)
    }

    pub fn distance_px(&self) -> f64 {
        self.distance
            .unwrap_or(self.profile().distance)
            .to_px(self.font_size_px, self.line_height)
    }
}

/// Transform and opacity of one unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct UnitStyle {
    /// Downward offset from the resting position.
    pub translate_y_px: f64,
    pub opacity: f64,
    pub letter_spacing_em: f64,
}

/// Map a unit's arm time to its style at `now`.
pub fn unit_style(
    armed_at: Option<Millis>,
    now: Millis,
    duration_ms: Millis,
    distance_px: f64,
    fade: bool,
) -> UnitStyle {
    let progress = match armed_at {
        None => 0.0,
        Some(_) if duration_ms <= 0.0 => 1.0,
        Some(at) => ((now - at) / duration_ms).clamp(0.0, 1.0),
    };
    let eased = Ease::REVEAL.apply(progress);
    UnitStyle {
        translate_y_px: distance_px * (1.0 - eased),
        opacity: if fade { eased } else { 1.0 },
        letter_spacing_em: 0.0,
    }
}

/// Overflow-clip padding and compensating negative margin around each unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MaskInsets {
    pub padding_px: f64,
    pub margin_px: f64,
}

impl MaskInsets {
    pub fn for_font(font_size_px: f64) -> Self {
        let bleed = (font_size_px * BLEED_EM).max(0.0);
        Self {
            padding_px: bleed,
            margin_px: -bleed,
        }
    }
}

/// Per-run state: the start guard, completion and every unit's arm time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealState {
    pub has_started: bool,
    pub has_completed_once: bool,
    pub armed_at: Vec<Option<Millis>>,
}

impl RevealState {
    fn hidden(units: usize) -> Self {
        Self {
            has_started: false,
            has_completed_once: false,
            armed_at: vec![None; units],
        }
    }

    pub fn per_unit_armed(&self) -> Vec<bool> {
        self.armed_at.iter().map(Option::is_some).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PlannedUnit {
    unit: TextUnit,
    order_index: Option<usize>,
    offset_ms: Millis,
}

/// Compute each unit's order index and start offset.
fn plan(config: &StaggerConfig, rng: &mut Rng64) -> Vec<PlannedUnit> {
    let granularity = config.granularity();
    let units = split_units(&config.text, granularity);
    let timing = config.timing();
    let profile = config.profile();
    let order = if config.order == RevealOrder::Random && !profile.allows_random {
        tracing::warn!(variant = config.variant.name(), "random order unsupported, using ltr");
        RevealOrder::Ltr
    } else {
        config.order
    };

    let per_group: Vec<Vec<usize>> = group_sizes(&units)
        .into_iter()
        .map(|n| order_indices(n, order, profile.center_bias, rng))
        .collect();
    let word_delay = if granularity == Granularity::LetterInWord {
        timing.word_delay_ms
    } else {
        0.0
    };

    units
        .into_iter()
        .map(|unit| {
            if !unit.animated {
                return PlannedUnit {
                    unit,
                    order_index: None,
                    offset_ms: 0.0,
                };
            }
            let o = per_group[unit.group][unit.slot];
            let w = if word_delay > 0.0 { unit.word.unwrap_or(0) } else { 0 };
            PlannedUnit {
                offset_ms: o as f64 * timing.stagger_ms + w as f64 * word_delay,
                order_index: Some(o),
                unit,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct UnitSnapshot {
    pub text: String,
    pub animated: bool,
    pub word: Option<usize>,
    pub order_index: Option<usize>,
    /// Start offset from the arm time, including the configured delay.
    pub delay_ms: Millis,
    pub armed: bool,
    pub at_rest: bool,
    pub style: UnitStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StaggerSnapshot {
    pub variant: RevealVariant,
    pub phase: RunPhase,
    pub timing: StaggerTiming,
    pub mask: MaskInsets,
    pub units: Vec<UnitSnapshot>,
}

impl StaggerSnapshot {
    pub fn all_at_rest(&self) -> bool {
        self.units.iter().all(|u| u.at_rest)
    }
}

/// Staggered vertical reveal of letters, words or a whole block.
#[derive(Debug)]
pub struct StaggerReveal {
    config: StaggerConfig,
    timing: StaggerTiming,
    rng: Rng64,
    trigger: TriggerDetector,
    units: Vec<PlannedUnit>,
    state: RevealState,
    phase: RunPhase,
    unit_timers: Vec<(TaskHandle, usize)>,
    done_timer: Option<TaskHandle>,
}

impl StaggerReveal {
    pub fn new(config: StaggerConfig, mut rng: Rng64) -> Self {
        let units = plan(&config, &mut rng);
        let trigger = TriggerDetector::new(config.trigger, config.once)
            .with_visibility(config.visibility);
        Self {
            timing: config.timing(),
            state: RevealState::hidden(units.len()),
            units,
            rng,
            trigger,
            phase: RunPhase::Idle,
            unit_timers: Vec::new(),
            done_timer: None,
            config,
        }
    }

    pub fn config(&self) -> &StaggerConfig {
        &self.config
    }

    pub fn timing(&self) -> StaggerTiming {
        self.timing
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    fn arm(&mut self, cx: &mut Cx<'_>) {
        if self.state.has_started {
            // Repeatable runs replay once the previous one has finished.
            if self.phase != RunPhase::Completed || self.trigger.once() {
                return;
            }
            self.disarm(cx);
        }
        self.state.has_started = true;
        self.phase = RunPhase::Armed;

        let delay = self.config.delay_ms.max(0.0);
        let mut starts: Vec<(Millis, usize)> = self
            .units
            .iter()
            .enumerate()
            .filter(|(_, p)| p.unit.animated)
            .map(|(i, p)| (delay + p.offset_ms, i))
            .collect();
        // Equal delays keep registration order, so sort by (delay, order index).
        starts.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then(self.units[a.1].order_index.cmp(&self.units[b.1].order_index))
        });
        let last = starts.last().map_or(delay, |s| s.0);
        for (at, i) in starts {
            let handle = cx.set_timeout(at);
            self.unit_timers.push((handle, i));
        }
        self.done_timer = Some(cx.set_timeout(last + self.timing.duration_ms.max(0.0)));
        tracing::debug!(
            id = cx.id().0,
            variant = self.config.variant.name(),
            units = self.unit_timers.len(),
            "reveal armed"
        );
    }

    /// Back to the hidden pre-animation state.
    fn disarm(&mut self, cx: &mut Cx<'_>) {
        for (h, _) in self.unit_timers.drain(..) {
            cx.cancel_task(h);
        }
        cx.cancel(&mut self.done_timer);
        self.state = RevealState::hidden(self.units.len());
        self.phase = RunPhase::Idle;
    }

    fn apply(&mut self, signal: TriggerSignal, cx: &mut Cx<'_>) {
        match signal {
            TriggerSignal::None => {}
            TriggerSignal::Arm => self.arm(cx),
            TriggerSignal::Disarm => self.disarm(cx),
        }
    }

    fn unit_snapshot(&self, i: usize, now: Millis) -> UnitSnapshot {
        let p = &self.units[i];
        let profile = self.config.profile();
        let duration = self.timing.duration_ms;
        // Whitespace never moves and always reports its resting style.
        let (armed_at, at_rest) = if p.unit.animated {
            let at = self.state.armed_at[i];
            (at, at.is_some_and(|at| now - at >= duration))
        } else {
            (Some(now), true)
        };
        let mut style = unit_style(
            armed_at,
            now,
            if p.unit.animated { duration } else { 0.0 },
            self.config.distance_px(),
            profile.fade,
        );
        style.letter_spacing_em = match (profile.word_spacing_reset, p.unit.animated) {
            (true, true) => self.config.word_letter_spacing_em.unwrap_or(0.0),
            _ => self.config.letter_spacing_em,
        };
        UnitSnapshot {
            text: p.unit.text.clone(),
            animated: p.unit.animated,
            word: p.unit.word,
            order_index: p.order_index,
            delay_ms: self.config.delay_ms.max(0.0) + p.offset_ms,
            armed: armed_at.is_some(),
            at_rest,
            style,
        }
    }
}

impl Component for StaggerReveal {
    fn name(&self) -> &'static str {
        "stagger"
    }

    fn mount(&mut self, cx: &mut Cx<'_>) {
        self.trigger.mount(cx);
    }

    fn unmount(&mut self, cx: &mut Cx<'_>) {
        self.disarm(cx);
        self.trigger.unmount(cx);
    }

    fn on_task(&mut self, task: TaskHandle, cx: &mut Cx<'_>) {
        if self.trigger.owns(task) {
            let signal = self.trigger.on_task(task);
            self.apply(signal, cx);
            return;
        }
        if let Some(pos) = self.unit_timers.iter().position(|(h, _)| *h == task) {
            let (_, i) = self.unit_timers.remove(pos);
            self.state.armed_at[i] = Some(cx.now());
            self.phase = RunPhase::Running;
            return;
        }
        if self.done_timer == Some(task) {
            self.done_timer = None;
            self.phase = RunPhase::Completed;
            self.state.has_completed_once = true;
            self.trigger.mark_completed();
            tracing::debug!(id = cx.id().0, "reveal completed");
        }
    }

    fn on_event(&mut self, event: &HostEvent, cx: &mut Cx<'_>) {
        let signal = self.trigger.on_event(event);
        self.apply(signal, cx);
    }

    fn on_visibility(&mut self, visible: bool, cx: &mut Cx<'_>) {
        let signal = self.trigger.on_visibility(visible);
        self.apply(signal, cx);
    }

    fn trigger(&mut self, cx: &mut Cx<'_>) {
        let signal = self.trigger.external();
        self.apply(signal, cx);
    }

    fn set_text(&mut self, text: &str, cx: &mut Cx<'_>) -> MotionResult<()> {
        self.disarm(cx);
        self.config.text = text.to_owned();
        self.units = plan(&self.config, &mut self.rng);
        self.state = RevealState::hidden(self.units.len());
        self.trigger.reset(cx);
        Ok(())
    }

    fn snapshot(&self, now: Millis) -> Snapshot {
        Snapshot::Stagger(StaggerSnapshot {
            variant: self.config.variant,
            phase: self.phase,
            timing: self.timing,
            mask: MaskInsets::for_font(self.config.font_size_px),
            units: (0..self.units.len())
                .map(|i| self.unit_snapshot(i, now))
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/stagger.rs"]
mod tests;
