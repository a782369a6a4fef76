//! Individual record generators.
//!
//! Each generator is a function of the shared RNG, the corpus pools, the
//! long-tail sampler and a fixed "now" anchor. [`crate::DataGenerator`] owns
//! that state and drives these functions.

pub mod catalog;
pub mod links;
pub mod timestamp;
pub mod ulid;
pub mod user;
