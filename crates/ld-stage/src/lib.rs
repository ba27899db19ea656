//! # ld-stage — Draw lifecycle signals
//!
//! Every transition of the draw engine is described as a [`DrawStage`].
//! Presentation layers never inspect engine internals; they follow the
//! stage stream (or poll snapshots) and pace themselves with a
//! [`PresentationTiming`] profile.
//!
//! ```text
//! SessionStart → RosterLoaded → CategoryStart
//!     → (DrawStart → WinnerDrawn)* → CategoryComplete | CategoryAbandoned
//!     → CategoryStart … → EventComplete
//! ```

pub mod event;
pub mod stage;
pub mod timing;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use timing::*;
pub use trace::*;
