//! Modifier tiering.
//!
//! Three built-in modifier kinds cover the standard stat pipeline:
//! flat additions before percentages, then percentage multipliers, then
//! final additions. Their priority constants leave wide gaps so custom
//! modifiers can slot between tiers without renumbering anything.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::StatError;
use crate::num::{Numeric, NumericExt};
use crate::order::{Prioritized, Priority};

/// Tier of flat additions applied before any percentage scaling.
pub const FLAT_ADD_PRIORITY: Priority = 0;

/// Tier of percentage multipliers.
pub const MULTIPLY_PRIORITY: Priority = 1 << 30;

/// Tier of additions applied after all multipliers.
pub const ADD_PRIORITY: Priority = 1 << 31;

/// An attachable unit of change with a fixed evaluation-order priority.
///
/// `apply` and `unapply` are inverses: unapplying the amount a modifier
/// previously applied must restore the prior value up to floating-point
/// rounding. Modifiers that cannot honor an operation for their payload
/// report [`StatError::UnsupportedOperation`].
///
/// `is_removal_due` is the conditional-removal hook. The owning value polls
/// it before reads and detaches the modifier once it reports `true`; nothing
/// is pushed from the modifier side.
pub trait Modifier<T: Numeric>: Prioritized {
    fn apply(&self, value: T) -> Result<T, StatError>;

    fn unapply(&self, value: T) -> Result<T, StatError>;

    fn is_removal_due(&self) -> bool {
        false
    }
}

/// Shared handle to an attached modifier.
///
/// Removal identity is the allocation, not the payload: two `FlatAdd(5)`
/// handles are distinct modifiers, while cloning a handle and attaching it
/// twice counts as the same modifier attached twice.
pub type ModifierHandle<T> = Rc<dyn Modifier<T>>;

/// Flat addition evaluated before any multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatAdd<T: Numeric> {
    amount: T,
}

impl<T: Numeric> FlatAdd<T> {
    pub fn new(amount: T) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> T {
        self.amount
    }

    /// Convenience constructor returning an attachable handle.
    pub fn handle(amount: T) -> ModifierHandle<T> {
        Rc::new(Self::new(amount))
    }
}

impl<T: Numeric> Prioritized for FlatAdd<T> {
    fn priority(&self) -> Priority {
        FLAT_ADD_PRIORITY
    }
}

impl<T: Numeric> Modifier<T> for FlatAdd<T> {
    fn apply(&self, value: T) -> Result<T, StatError> {
        Ok(value.add(self.amount))
    }

    fn unapply(&self, value: T) -> Result<T, StatError> {
        Ok(value.sub(self.amount))
    }
}

/// Percentage multiplier evaluated after flat additions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Multiply<T: Numeric> {
    amount: T,
}

impl<T: Numeric> Multiply<T> {
    pub fn new(amount: T) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> T {
        self.amount
    }

    /// Convenience constructor returning an attachable handle.
    pub fn handle(amount: T) -> ModifierHandle<T> {
        Rc::new(Self::new(amount))
    }
}

impl<T: Numeric> Prioritized for Multiply<T> {
    fn priority(&self) -> Priority {
        MULTIPLY_PRIORITY
    }
}

impl<T: Numeric> Modifier<T> for Multiply<T> {
    fn apply(&self, value: T) -> Result<T, StatError> {
        Ok(value.mul(self.amount))
    }

    fn unapply(&self, value: T) -> Result<T, StatError> {
        Ok(value.div(self.amount))
    }
}

/// Final addition evaluated after all multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Add<T: Numeric> {
    amount: T,
}

impl<T: Numeric> Add<T> {
    pub fn new(amount: T) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> T {
        self.amount
    }

    /// Convenience constructor returning an attachable handle.
    pub fn handle(amount: T) -> ModifierHandle<T> {
        Rc::new(Self::new(amount))
    }
}

impl<T: Numeric> Prioritized for Add<T> {
    fn priority(&self) -> Priority {
        ADD_PRIORITY
    }
}

impl<T: Numeric> Modifier<T> for Add<T> {
    fn apply(&self, value: T) -> Result<T, StatError> {
        Ok(value.add(self.amount))
    }

    fn unapply(&self, value: T) -> Result<T, StatError> {
        Ok(value.sub(self.amount))
    }
}

/// Shared tick counter driving [`TimedModifier`] expiry.
///
/// Cloning shares the counter; the host simulation advances it once per
/// step and every timed modifier reading the same clock expires against it.
#[derive(Clone, Debug, Default)]
pub struct TickClock(Rc<Cell<u64>>);

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ticks: u64) {
        self.0.set(self.0.get() + ticks);
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }
}

/// Wraps any modifier with a tick-based removal condition.
///
/// Keeps the inner modifier's priority and arithmetic; only adds the
/// conditional-removal capability the engine polls on reads.
pub struct TimedModifier<T: Numeric> {
    inner: ModifierHandle<T>,
    clock: TickClock,
    expires_at: u64,
}

impl<T: Numeric> TimedModifier<T> {
    pub fn new(inner: ModifierHandle<T>, clock: TickClock, duration: u64) -> Self {
        let expires_at = clock.now() + duration;
        Self {
            inner,
            clock,
            expires_at,
        }
    }

    /// Convenience constructor returning an attachable handle.
    pub fn handle(inner: ModifierHandle<T>, clock: TickClock, duration: u64) -> ModifierHandle<T> {
        Rc::new(Self::new(inner, clock, duration))
    }

    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }
}

impl<T: Numeric> Prioritized for TimedModifier<T> {
    fn priority(&self) -> Priority {
        self.inner.priority()
    }
}

impl<T: Numeric> Modifier<T> for TimedModifier<T> {
    fn apply(&self, value: T) -> Result<T, StatError> {
        self.inner.apply(value)
    }

    fn unapply(&self, value: T) -> Result<T, StatError> {
        self.inner.unapply(value)
    }

    fn is_removal_due(&self) -> bool {
        self.clock.now() >= self.expires_at
    }
}
