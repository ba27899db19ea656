//! ld-core: Shared types for the lucky draw engine
//!
//! This crate provides the data model every other crate builds on:
//! the participant roster, the ordered prize category catalog with its
//! eligibility rules, and the immutable winner record.

mod category;
mod error;
mod roster;
mod winner;

pub use category::*;
pub use error::*;
pub use roster::*;
pub use winner::*;
