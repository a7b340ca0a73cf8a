//! Scramble-reveal: random glyphs that progressively lock into the source text.

use crate::{
    foundation::core::Millis,
    foundation::error::MotionResult,
    foundation::rng::Rng64,
    runtime::component::{Component, Cx, HostEvent, Snapshot},
    runtime::scheduler::TaskHandle,
    runtime::trigger::{AnimationTrigger, RunPhase, TriggerDetector, TriggerSignal},
    runtime::visibility::VisibilityOptions,
};

/// Placeholder glyphs drawn while a character is still unlocked.
pub const SCRAMBLE_GLYPHS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%&*?<>/";

/// `Forward` scrambles plain text to green; `Reverse` scrambles green back to plain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrambleDirection {
    Forward,
    Reverse,
}

impl ScrambleDirection {
    fn ends_green(self) -> bool {
        self == Self::Forward
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    pub text: String,
    pub duration_ms: Millis,
    /// Fixed timer step between frames.
    pub interval_ms: Millis,
    pub trigger: AnimationTrigger,
    pub once: bool,
    pub delay_ms: Millis,
    pub visibility: VisibilityOptions,
    /// Probability that an unlocked placeholder flickers green.
    pub flicker_chance: f64,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            duration_ms: 800.0,
            interval_ms: 30.0,
            trigger: AnimationTrigger::Hover,
            once: false,
            delay_ms: 0.0,
            visibility: VisibilityOptions::default(),
            flicker_chance: 0.5,
        }
    }
}

/// `round(duration / interval)`, or zero when the run should complete on its first tick.
pub fn total_frames(duration_ms: Millis, interval_ms: Millis) -> u32 {
    if !(duration_ms.is_finite() && interval_ms.is_finite())
        || duration_ms <= 0.0
        || interval_ms <= 0.0
        || interval_ms >= duration_ms
    {
        return 0;
    }
    (duration_ms / interval_ms).round().min(f64::from(u32::MAX)) as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ScrambledGlyph {
    pub ch: char,
    pub green: bool,
    /// Showing its real character for the rest of the run.
    pub locked: bool,
}

/// Frame counter and lock state of one in-flight run.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleRun {
    pub direction: ScrambleDirection,
    pub frame: u32,
    pub total_frames: u32,
    pub locked: Vec<bool>,
}

impl ScrambleRun {
    pub fn new(direction: ScrambleDirection, total_frames: u32, len: usize) -> Self {
        Self {
            direction,
            frame: 0,
            total_frames,
            locked: vec![false; len],
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.total_frames
    }

    /// Render the current frame and advance the counter.
    ///
    /// Character `i` locks once `i < progress * len`; locks never release within a run.
    pub fn step(&mut self, chars: &[char], flicker: f64, rng: &mut Rng64) -> Vec<ScrambledGlyph> {
        let progress = if self.total_frames == 0 {
            1.0
        } else {
            f64::from(self.frame) / f64::from(self.total_frames)
        };
        let revealed = progress * chars.len() as f64;
        let target_green = self.direction.ends_green();

        let glyphs = chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                if (i as f64) < revealed {
                    self.locked[i] = true;
                }
                if self.locked[i] {
                    ScrambledGlyph {
                        ch,
                        green: target_green,
                        locked: true,
                    }
                } else if ch.is_whitespace() {
                    ScrambledGlyph {
                        ch,
                        green: false,
                        locked: false,
                    }
                } else {
                    let pick = SCRAMBLE_GLYPHS[rng.below(SCRAMBLE_GLYPHS.len())];
                    ScrambledGlyph {
                        ch: char::from(pick),
                        green: rng.chance(flicker),
                        locked: false,
                    }
                }
            })
            .collect();
        self.frame = self.frame.saturating_add(1);
        glyphs
    }
}

fn settled(chars: &[char], green: bool) -> Vec<ScrambledGlyph> {
    chars
        .iter()
        .map(|&ch| ScrambledGlyph {
            ch,
            green,
            locked: true,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrambleSnapshot {
    pub phase: RunPhase,
    pub direction: Option<ScrambleDirection>,
    pub frame: u32,
    pub total_frames: u32,
    /// Terminal color of the last completed run.
    pub green: bool,
    pub animating: bool,
    pub text: String,
    pub glyphs: Vec<ScrambledGlyph>,
}

/// Text that scrambles to green on hover (or another trigger) and back on leave.
#[derive(Debug)]
pub struct ScrambleEngine {
    config: ScrambleConfig,
    chars: Vec<char>,
    rng: Rng64,
    trigger: TriggerDetector,
    phase: RunPhase,
    green: bool,
    glyphs: Vec<ScrambledGlyph>,
    run: Option<ScrambleRun>,
    queued: Option<ScrambleDirection>,
    start_timer: Option<TaskHandle>,
    ticker: Option<TaskHandle>,
    runs_completed: u32,
}

impl ScrambleEngine {
    pub fn new(config: ScrambleConfig, rng: Rng64) -> Self {
        let chars: Vec<char> = config.text.chars().collect();
        let trigger = TriggerDetector::new(config.trigger, config.once)
            .with_visibility(config.visibility);
        Self {
            glyphs: settled(&chars, false),
            chars,
            rng,
            trigger,
            phase: RunPhase::Idle,
            green: false,
            run: None,
            queued: None,
            start_timer: None,
            ticker: None,
            runs_completed: 0,
            config,
        }
    }

    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }

    /// In-flight guard: a start delay or the frame timer is pending.
    pub fn is_animating(&self) -> bool {
        self.start_timer.is_some() || self.ticker.is_some()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_green(&self) -> bool {
        self.green
    }

    pub fn glyphs(&self) -> &[ScrambledGlyph] {
        &self.glyphs
    }

    pub fn run(&self) -> Option<&ScrambleRun> {
        self.run.as_ref()
    }

    pub fn runs_completed(&self) -> u32 {
        self.runs_completed
    }

    /// Start a run unless one is already in flight.
    pub fn scramble(&mut self, direction: ScrambleDirection, cx: &mut Cx<'_>) -> bool {
        if self.is_animating() {
            tracing::trace!(?direction, "scramble ignored: run in flight");
            return false;
        }
        if self.config.delay_ms > 0.0 {
            self.queued = Some(direction);
            self.start_timer = Some(cx.set_timeout(self.config.delay_ms));
            self.phase = RunPhase::Armed;
        } else {
            self.start_run(direction, cx);
        }
        true
    }

    fn start_run(&mut self, direction: ScrambleDirection, cx: &mut Cx<'_>) {
        let total = total_frames(self.config.duration_ms, self.config.interval_ms);
        self.run = Some(ScrambleRun::new(direction, total, self.chars.len()));
        self.ticker = Some(cx.set_interval(self.config.interval_ms));
        self.phase = RunPhase::Running;
        tracing::debug!(id = cx.id().0, ?direction, total, "scramble started");
    }

    fn tick(&mut self, cx: &mut Cx<'_>) {
        let Some(run) = self.run.as_mut() else {
            cx.cancel(&mut self.ticker);
            return;
        };
        if run.is_finished() {
            let direction = run.direction;
            cx.cancel(&mut self.ticker);
            self.green = direction.ends_green();
            self.glyphs = settled(&self.chars, self.green);
            self.phase = RunPhase::Completed;
            self.runs_completed += 1;
            if direction == ScrambleDirection::Forward {
                self.trigger.mark_completed();
            }
            tracing::debug!(id = cx.id().0, ?direction, "scramble completed");
            return;
        }
        self.glyphs = run.step(&self.chars, self.config.flicker_chance, &mut self.rng);
    }

    fn apply(&mut self, signal: TriggerSignal, cx: &mut Cx<'_>) {
        // Visibility changes supersede an in-flight run; pointer and click inputs do not.
        let visible_trigger = self.trigger.trigger() == AnimationTrigger::Visible;
        match signal {
            TriggerSignal::None => {}
            TriggerSignal::Arm => {
                if visible_trigger && self.is_animating() {
                    self.cancel_run(cx);
                    self.scramble(ScrambleDirection::Forward, cx);
                    return;
                }
                let toggle = self.trigger.trigger() == AnimationTrigger::Click;
                if !self.green {
                    self.scramble(ScrambleDirection::Forward, cx);
                } else if toggle {
                    self.scramble(ScrambleDirection::Reverse, cx);
                }
            }
            TriggerSignal::Disarm => {
                if visible_trigger && self.is_animating() {
                    self.reset_plain(cx);
                    tracing::debug!(id = cx.id().0, "scramble reset: left view mid-run");
                } else if self.green {
                    self.scramble(ScrambleDirection::Reverse, cx);
                }
            }
        }
    }

    /// Drop any run and show the source text uncolored.
    fn reset_plain(&mut self, cx: &mut Cx<'_>) {
        self.cancel_run(cx);
        self.green = false;
        self.glyphs = settled(&self.chars, false);
        self.phase = RunPhase::Idle;
    }

    fn cancel_run(&mut self, cx: &mut Cx<'_>) {
        cx.cancel(&mut self.start_timer);
        cx.cancel(&mut self.ticker);
        self.run = None;
        self.queued = None;
    }
}

impl Component for ScrambleEngine {
    fn name(&self) -> &'static str {
        "scramble"
    }

    fn mount(&mut self, cx: &mut Cx<'_>) {
        self.trigger.mount(cx);
    }

    fn unmount(&mut self, cx: &mut Cx<'_>) {
        self.cancel_run(cx);
        self.trigger.unmount(cx);
    }

    fn on_task(&mut self, task: TaskHandle, cx: &mut Cx<'_>) {
        if self.trigger.owns(task) {
            let signal = self.trigger.on_task(task);
            self.apply(signal, cx);
        } else if self.start_timer == Some(task) {
            self.start_timer = None;
            if let Some(direction) = self.queued.take() {
                self.start_run(direction, cx);
            }
        } else if self.ticker == Some(task) {
            self.tick(cx);
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
        self.config.text = text.to_owned();
        self.chars = text.chars().collect();
        self.reset_plain(cx);
        self.trigger.reset(cx);
        Ok(())
    }

    fn snapshot(&self, _now: Millis) -> Snapshot {
        let run = self.run.as_ref();
        Snapshot::Scramble(ScrambleSnapshot {
            phase: self.phase,
            direction: run.map(|r| r.direction),
            frame: run.map_or(0, |r| r.frame),
            total_frames: run.map_or(0, |r| r.total_frames),
            green: self.green,
            animating: self.is_animating(),
            text: self.glyphs.iter().map(|g| g.ch).collect(),
            glyphs: self.glyphs.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/scramble.rs"]
mod tests;
