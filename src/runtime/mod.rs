pub(crate) mod component;
pub(crate) mod scheduler;
pub(crate) mod stage;
pub(crate) mod trigger;
pub(crate) mod visibility;
