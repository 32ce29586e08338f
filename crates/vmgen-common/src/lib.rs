#![doc = "Shared types for the VM generation counter probe suite."]

pub mod counter;
pub mod error;

pub use counter::*;
pub use error::*;
