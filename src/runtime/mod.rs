//! # Runtime Module
//!
//! Process setup and the resolve/fetch pipeline driven by the CLI.

pub mod initialization;
pub mod pipeline;

pub use initialization::*;
pub use pipeline::*;
