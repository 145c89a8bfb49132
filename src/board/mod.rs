//! Brainstorming board core
//!
//! - `idea`: the idea record, its storage id, and the line splitter
//! - `gateway`: the model call wrapper that never fails outward
//! - `session`: the topic-entry / board state machine

pub mod gateway;
pub mod idea;
pub mod session;

pub use gateway::{Gateway, GenerationOutcome};
pub use idea::{partition, split_ideas, Idea, IdeaId};
pub use session::{
    GenerationNotice, Rejected, SessionError, SessionState, Topic, Transition, TransitionResult,
};
