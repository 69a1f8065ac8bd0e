//! Table transformation building blocks.
//!
//! - **keys**: surrogate key derivation (MD5 hex)
//! - **labels**: title-casing, truncation and fixed label tables
//! - **steps**: the reusable normalization steps and the [`Step`] enum
//! - **plan**: ordered execution of steps ([`TransformPlan`])
//! - **join**: inner and left joins against a lookup frame
//! - **frame**: small DataFrame access helpers

pub mod error;
pub mod frame;
pub mod join;
pub mod keys;
pub mod labels;
pub mod plan;
pub mod steps;

pub use error::{Result, TransformError};
pub use join::{JoinIndex, JoinKind, JoinSpec, join_frames};
pub use keys::{derive_composite_id, derive_id, hash_hex};
pub use labels::{LabelRule, TITLE_TYPE_LABELS};
pub use plan::TransformPlan;
pub use steps::{CastKind, ListFormat, Step};
