//! Canvas particle field: aging, wrapping points with a field-wide entrance fade.

use crate::{
    animation::preset::{DensityPreset, PresetOr, SizePreset, SpeedPreset},
    foundation::{
        color::ColorDef,
        core::{CanvasSize, Millis, Point},
        rng::Rng64,
    },
    render::cpu::{CanvasPainter, DrawContext},
    runtime::{
        component::{Component, Cx, HostEvent, Snapshot},
        scheduler::{EventKind, ListenerHandle, TaskHandle},
    },
};

pub type DensitySpec = PresetOr<DensityPreset>;
pub type SizeSpec = PresetOr<SizePreset>;
pub type DriftSpec = PresetOr<SpeedPreset>;

/// Particles per square pixel.
pub fn resolve_density(spec: DensitySpec) -> f64 {
    spec.resolve_with(|p| match p {
        DensityPreset::Low => 0.000_05,
        DensityPreset::Medium => 0.000_1,
        DensityPreset::High => 0.000_2,
    })
}

/// Maximum drift per frame, in pixels.
pub fn resolve_drift(spec: DriftSpec) -> f64 {
    spec.resolve_with(|p| match p {
        SpeedPreset::Slow => 0.1,
        SpeedPreset::Medium => 0.3,
        SpeedPreset::Fast => 0.6,
    })
}

/// Base particle radius, in pixels.
pub fn resolve_size(spec: SizeSpec) -> f64 {
    spec.resolve_with(|p| match p {
        SizePreset::Small => 1.0,
        SizePreset::Medium => 1.5,
        SizePreset::Large => 2.5,
    })
}

/// `floor(area * density)`; zero for degenerate canvases or densities.
pub fn target_count(size: CanvasSize, density: f64) -> usize {
    let n = size.area() * density;
    if n.is_finite() && n > 0.0 {
        n.floor() as usize
    } else {
        0
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub density: DensitySpec,
    pub speed: DriftSpec,
    pub size: SizeSpec,
    pub color: ColorDef,
    pub glow: bool,
    pub fade_in_ms: Millis,
    pub min_lifetime_ms: Millis,
    pub max_lifetime_ms: Millis,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            density: PresetOr::Preset(DensityPreset::Medium),
            speed: PresetOr::Preset(SpeedPreset::Medium),
            size: PresetOr::Preset(SizePreset::Medium),
            color: ColorDef::WHITE,
            glow: false,
            fade_in_ms: 1000.0,
            min_lifetime_ms: 3000.0,
            max_lifetime_ms: 8000.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub base_size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub opacity: f64,
    pub lifetime_ms: Millis,
    pub birth_ms: Millis,
}

impl Particle {
    pub fn age(&self, now: Millis) -> Millis {
        now - self.birth_ms
    }
}

/// Simulation state of a particle field, independent of scheduling and drawing.
#[derive(Clone, Debug)]
pub struct ParticleSim {
    size: CanvasSize,
    density: f64,
    drift: f64,
    radius: f64,
    fade_in_ms: Millis,
    lifetime_ms: (Millis, Millis),
    started_at: Millis,
    particles: Vec<Particle>,
    rng: Rng64,
    steps: u64,
}

impl ParticleSim {
    pub fn new(config: &ParticleConfig, size: CanvasSize, started_at: Millis, rng: Rng64) -> Self {
        let lo = config.min_lifetime_ms.max(0.0);
        Self {
            size,
            density: resolve_density(config.density),
            drift: resolve_drift(config.speed),
            radius: resolve_size(config.size),
            fade_in_ms: config.fade_in_ms,
            lifetime_ms: (lo, config.max_lifetime_ms.max(lo)),
            started_at,
            particles: Vec::new(),
            rng,
            steps: 0,
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn resize(&mut self, size: CanvasSize) {
        self.size = size;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn target(&self) -> usize {
        target_count(self.size, self.density)
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn spawn(&mut self, now: Millis) -> Particle {
        let (w, h) = (f64::from(self.size.width), f64::from(self.size.height));
        Particle {
            x: self.rng.range(0.0, w),
            y: self.rng.range(0.0, h),
            base_size: self.radius * self.rng.range(0.5, 1.5),
            speed_x: self.rng.range(-1.0, 1.0) * self.drift,
            speed_y: self.rng.range(-1.0, 1.0) * self.drift,
            opacity: 0.0,
            lifetime_ms: self.rng.range(self.lifetime_ms.0, self.lifetime_ms.1),
            birth_ms: now,
        }
    }

    /// Field-wide fade until `fade_in_ms` has elapsed, then per-particle aging.
    pub fn opacity_at(&self, p: &Particle, now: Millis) -> f64 {
        let elapsed = now - self.started_at;
        if self.fade_in_ms > 0.0 && elapsed < self.fade_in_ms {
            return (elapsed / self.fade_in_ms).clamp(0.0, 1.0);
        }
        if p.lifetime_ms <= 0.0 {
            return 0.0;
        }
        (1.0 - p.age(now) / p.lifetime_ms).clamp(0.0, 1.0)
    }

    /// Advance one frame: expire, correct the population, move, fade and wrap.
    pub fn step(&mut self, now: Millis) {
        self.particles.retain(|p| p.age(now) <= p.lifetime_ms);

        let target = self.target();
        while self.particles.len() < target {
            let p = self.spawn(now);
            self.particles.push(p);
        }
        self.particles.truncate(target);

        let (w, h) = (f64::from(self.size.width), f64::from(self.size.height));
        for i in 0..self.particles.len() {
            let mut p = self.particles[i];
            p.x += p.speed_x;
            p.y += p.speed_y;
            p.opacity = self.opacity_at(&p, now);
            if p.x < 0.0 || p.x > w || p.y < 0.0 || p.y > h {
                p.x = self.rng.range(0.0, w);
                p.y = self.rng.range(0.0, h);
            }
            self.particles[i] = p;
        }
        self.steps += 1;
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParticleSnapshot {
    pub width: u32,
    pub height: u32,
    pub target: usize,
    pub live: usize,
    pub frames: u64,
    pub particles: Vec<Particle>,
}

/// Continuously redrawn particle background filling its container.
#[derive(Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    seed: Rng64,
    sim: Option<ParticleSim>,
    frame: Option<TaskHandle>,
    listeners: Vec<ListenerHandle>,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, rng: Rng64) -> Self {
        Self {
            config,
            seed: rng,
            sim: None,
            frame: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn sim(&self) -> Option<&ParticleSim> {
        self.sim.as_ref()
    }
}

impl Component for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn mount(&mut self, cx: &mut Cx<'_>) {
        self.sim = Some(ParticleSim::new(
            &self.config,
            cx.container_size(),
            cx.now(),
            self.seed,
        ));
        self.listeners.push(cx.listen(EventKind::Resize));
        self.frame = Some(cx.request_frame());
    }

    fn unmount(&mut self, cx: &mut Cx<'_>) {
        cx.cancel(&mut self.frame);
        cx.unlisten_all(&mut self.listeners);
        tracing::debug!(id = cx.id().0, "particle field torn down");
    }

    fn on_task(&mut self, task: TaskHandle, cx: &mut Cx<'_>) {
        if self.frame != Some(task) {
            return;
        }
        if let Some(sim) = self.sim.as_mut() {
            sim.step(cx.now());
            tracing::trace!(live = sim.particles().len(), "particle frame");
        }
        self.frame = Some(cx.request_frame());
    }

    fn on_event(&mut self, event: &HostEvent, cx: &mut Cx<'_>) {
        if let HostEvent::Resize { .. } = event
            && let Some(sim) = self.sim.as_mut()
        {
            sim.resize(cx.container_size());
            tracing::debug!(size = ?sim.size(), "particle canvas resized");
        }
    }

    fn snapshot(&self, _now: Millis) -> Snapshot {
        let (size, target, frames, particles) = match &self.sim {
            Some(sim) => (sim.size(), sim.target(), sim.steps(), sim.particles().to_vec()),
            None => (CanvasSize::default(), 0, 0, Vec::new()),
        };
        Snapshot::Particles(ParticleSnapshot {
            width: size.width,
            height: size.height,
            target,
            live: particles.len(),
            frames,
            particles,
        })
    }

    fn painter(&self) -> Option<&dyn CanvasPainter> {
        Some(self)
    }
}

impl CanvasPainter for ParticleField {
    fn canvas_size(&self) -> CanvasSize {
        self.sim.as_ref().map_or_else(CanvasSize::default, ParticleSim::size)
    }

    fn paint(&self, dc: &mut DrawContext<'_>) {
        let Some(sim) = &self.sim else {
            return;
        };
        let base = self.config.color;
        for p in sim.particles() {
            let alpha = base.a * p.opacity;
            if alpha <= 0.0 {
                continue;
            }
            let center = Point::new(p.x, p.y);
            if self.config.glow {
                dc.fill_circle(center, p.base_size * 3.0, base.with_alpha(alpha * 0.12));
                dc.fill_circle(center, p.base_size * 2.0, base.with_alpha(alpha * 0.25));
            }
            dc.fill_circle(center, p.base_size, base.with_alpha(alpha));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/particles.rs"]
mod tests;
