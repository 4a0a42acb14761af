//! Core of the guidance engine
//!
//! This module contains:
//! - The task, step and action model
//! - The task library and request matching
//! - Step navigation
//! - The session tying library, planner and agent together

mod library;
mod matcher;
mod sequencer;
mod session;
mod task;

pub use library::*;
pub use sequencer::*;
pub use session::*;
pub use task::*;
