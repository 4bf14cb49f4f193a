//! Encoder input classification
//!
//! One physical encoder feeds two consumers: the menu layer and the
//! running experiment. Which one sees an event depends on whether an
//! experiment currently owns the input.

mod events;
mod router;

pub use events::{ExperimentCommand, InputEvent, NavigationCommand};
pub use router::{route, Routed};
