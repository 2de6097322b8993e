//! Deterministic modifiable-value engine for game quantities.
//!
//! `stat-core` represents a numeric game quantity (health, move speed, a
//! damage multiplier) whose effective value is derived from a stable base
//! plus a dynamically changing set of modifiers: flat additions first, then
//! percentage multipliers, then final additions, clamped to optional bounds.
//! All state mutation flows through [`value::ModifiableValue`], and the
//! supporting layers (number wrappers, the `f64` conversion pathway, the
//! priority-ordered container) are re-exported here.
//!
//! The engine is single-threaded and synchronous: no locking, no background
//! tasks. Expired modifiers are pruned lazily on the next read.
pub mod error;
pub mod modifier;
pub mod num;
pub mod order;
pub mod value;

pub use error::StatError;
pub use modifier::{
    ADD_PRIORITY, Add, FLAT_ADD_PRIORITY, FlatAdd, MULTIPLY_PRIORITY, Modifier, ModifierHandle,
    Multiply, TickClock, TimedModifier,
};
pub use num::blocks::{Block128, Block256, Block512, Lane};
pub use num::wrappers::{F32, F64, I8, I16, I32, I64, U8, U16, U32, U64};
pub use num::{Numeric, NumericExt, Signedness, approx_eq, try_from_f64};
pub use order::{Prioritized, Priority, PriorityList, sort_by_priority};
pub use value::{DefaultValue, MaxLimit, MinLimit, ModifiableValue, ModifiableValueBuilder};
