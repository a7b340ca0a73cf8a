use crate::{
    canvas::{particles::ParticleField, squares::SquaresField},
    foundation::{error::MotionResult, rng::Rng64},
    runtime::{component::Component, scheduler::ComponentId, stage::Stage},
    scene::model::{ComponentDef, Scene},
    text::{scramble::ScrambleEngine, stagger::StaggerReveal},
};

impl ComponentDef {
    /// Instantiate the component with its own random stream.
    pub fn instantiate(&self, rng: Rng64) -> Box<dyn Component> {
        match self {
            Self::Scramble { config, .. } => Box::new(ScrambleEngine::new(config.clone(), rng)),
            Self::Stagger { config, .. } => Box::new(StaggerReveal::new(config.clone(), rng)),
            Self::Particles { config, .. } => Box::new(ParticleField::new(config.clone(), rng)),
            Self::Squares { config, .. } => Box::new(SquaresField::new(config.clone())),
        }
    }
}

impl Scene {
    /// Validate, then mount every component in declaration order.
    ///
    /// Component `i` gets id `i` and the random stream `Rng64::derive(seed, i)`, so two builds
    /// of the same scene behave identically.
    #[tracing::instrument(skip(self), fields(components = self.components.len(), seed = self.seed))]
    pub fn build(&self) -> MotionResult<Stage> {
        self.validate()?;
        let mut stage = Stage::new(self.viewport);
        for (i, def) in self.components.iter().enumerate() {
            let rng = Rng64::derive(self.seed, i as u64);
            let id = stage.mount_boxed(def.bounds().to_rect(), def.instantiate(rng));
            debug_assert_eq!(id, ComponentId(i as u32));
        }
        tracing::info!(mounted = self.components.len(), "scene built");
        Ok(stage)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
