mod action_agent;

pub use action_agent::*;
