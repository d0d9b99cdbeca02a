//! Document-deletion trigger: event dispatch and the deletion propagator.

mod dispatcher;
mod propagator;

pub use dispatcher::{EventDispatcher, ProfileDeletedHandler, SpawningDispatcher};
pub use propagator::DeletionPropagator;
