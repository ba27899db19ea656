//! # ld-engine — Sequential prize draw orchestration
//!
//! Runs a prize-draw event: an ordered list of prize categories, each
//! needing N winners drawn without replacement from a participant roster.
//!
//! ## Guarantees
//!
//! - No coupon is ever drawn twice anywhere in the event
//! - No participant wins the same category twice
//! - Categories are resolved strictly in catalog order
//! - At most one draw is in flight at a time
//!
//! ## Architecture
//!
//! ```text
//! DrawEngine
//!     │
//!     ├── Roster            (validated participant coupons)
//!     ├── CategoryCatalog   (ordered prize tiers + eligibility rules)
//!     ├── DrawState         (cursor, winners, exclusion sets, in-flight draw)
//!     └── RandomSource      (uniform pick, injectable)
//!           │
//!           v
//!     WinnerRecord + DrawTrace (DrawStage events) → DrawSnapshot / DrawReport
//! ```

pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod presets;
pub mod report;
pub mod selector;
pub mod shared;
pub mod snapshot;
pub mod state;

pub use config::*;
pub use eligibility::*;
pub use engine::*;
pub use error::*;
pub use presets::*;
pub use report::*;
pub use selector::*;
pub use shared::*;
pub use snapshot::*;
pub use state::*;
