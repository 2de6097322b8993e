//! Modifiable value engine.
//!
//! A [`ModifiableValue`] owns a base value, a cached current value, and a
//! priority-ordered set of attached modifiers. The cached value is rebuilt
//! from `base` plus the modifier set on every mutation and pruned lazily on
//! reads; between those points it may be overridden directly, but any
//! override is discarded by the next recalculation.
//!
//! Capabilities the source system probed for dynamically (default value,
//! min/max limits) are supplied explicitly at construction instead, as
//! optional trait objects on the builder.

use std::rc::Rc;

use crate::error::StatError;
use crate::modifier::ModifierHandle;
use crate::num::Numeric;
use crate::order::PriorityList;

/// Supplies the base value on first use.
pub trait DefaultValue<T: Numeric> {
    fn default_value(&self) -> T;
}

/// Lower clamp bound for the computed current value.
pub trait MinLimit<T: Numeric> {
    fn min_limit(&self) -> T;
}

/// Upper clamp bound for the computed current value.
pub trait MaxLimit<T: Numeric> {
    fn max_limit(&self) -> T;
}

impl<T: Numeric, F: Fn() -> T> DefaultValue<T> for F {
    fn default_value(&self) -> T {
        self()
    }
}

impl<T: Numeric, F: Fn() -> T> MinLimit<T> for F {
    fn min_limit(&self) -> T {
        self()
    }
}

impl<T: Numeric, F: Fn() -> T> MaxLimit<T> for F {
    fn max_limit(&self) -> T {
        self()
    }
}

/// A numeric quantity whose effective value is derived from a base value
/// plus an ordered set of modifiers, clamped to optional bounds.
///
/// Single-threaded by design: modifier handles are `Rc` and the engine is
/// meant to live on the host simulation's one logical thread. A modifier
/// handle should be attached to only one value at a time, since removal
/// works by reference identity.
pub struct ModifiableValue<T: Numeric> {
    base: T,
    current: T,
    modifiers: PriorityList<ModifierHandle<T>>,
    default_value: Option<Box<dyn DefaultValue<T>>>,
    min_limit: Option<Box<dyn MinLimit<T>>>,
    max_limit: Option<Box<dyn MaxLimit<T>>>,
    initialized: bool,
}

impl<T: Numeric> Default for ModifiableValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> ModifiableValue<T> {
    /// Creates an uninitialized value with a zero base and no capabilities.
    pub fn new() -> Self {
        Self {
            base: T::from_f64(0.0),
            current: T::from_f64(0.0),
            modifiers: PriorityList::new(),
            default_value: None,
            min_limit: None,
            max_limit: None,
            initialized: false,
        }
    }

    /// Creates an uninitialized value with an explicit starting base.
    pub fn with_base(base: T) -> Self {
        let mut value = Self::new();
        value.base = base;
        value
    }

    pub fn builder() -> ModifiableValueBuilder<T> {
        ModifiableValueBuilder::new()
    }

    /// First-use initialization. If a default-value capability was supplied
    /// it overrides whatever base was set before the first operation.
    fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        if let Some(default) = &self.default_value {
            self.base = default.default_value();
        }
        self.current = self.base;
    }

    /// Sets the base value and rebuilds the current value from it.
    pub fn set_base_value(&mut self, value: T) -> Result<(), StatError> {
        self.ensure_initialized();
        self.base = value;
        self.recalculate()
    }

    /// Overrides the cached current value directly, then clamps.
    ///
    /// The override is transient: the next recalculation (modifier add or
    /// remove, base change, automatic pruning) discards it and rebuilds from
    /// base plus modifiers. Direct sets and modifiers do not compose.
    pub fn set_current_value(&mut self, value: T) {
        self.ensure_initialized();
        self.current = value;
        self.clamp();
    }

    /// Attaches a modifier and rebuilds the current value.
    pub fn apply_modifier(&mut self, modifier: ModifierHandle<T>) -> Result<(), StatError> {
        self.ensure_initialized();
        self.modifiers.insert(modifier);
        self.recalculate()
    }

    /// Detaches every attached entry that is the same handle, then rebuilds.
    ///
    /// Identity is `Rc::ptr_eq`: if the same handle was attached twice, both
    /// entries go together. A payload-equal but separately allocated
    /// modifier is untouched.
    pub fn remove_modifier(&mut self, modifier: &ModifierHandle<T>) -> Result<(), StatError> {
        self.ensure_initialized();
        self.modifiers.remove_where(|entry| Rc::ptr_eq(entry, modifier));
        self.recalculate()
    }

    /// Returns the effective value, pruning expired modifiers first.
    pub fn current_value(&mut self) -> Result<T, StatError> {
        self.ensure_initialized();
        if self.prune_due() {
            self.recalculate()?;
        }
        Ok(self.current)
    }

    /// Returns the base value, initializing on first use.
    pub fn base_value(&mut self) -> T {
        self.ensure_initialized();
        self.base
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// Adds to the cached current value directly, then clamps.
    ///
    /// Like [`set_current_value`](Self::set_current_value), this bypasses
    /// the modifier set and is overwritten by the next recalculation.
    pub fn add<V: Numeric>(&mut self, amount: V) {
        self.shortcut(|current, rhs| current + rhs, amount);
    }

    /// Subtracts from the cached current value directly, then clamps.
    pub fn subtract<V: Numeric>(&mut self, amount: V) {
        self.shortcut(|current, rhs| current - rhs, amount);
    }

    /// Multiplies the cached current value directly, then clamps.
    pub fn multiply<V: Numeric>(&mut self, amount: V) {
        self.shortcut(|current, rhs| current * rhs, amount);
    }

    /// Divides the cached current value directly, then clamps.
    pub fn divide<V: Numeric>(&mut self, amount: V) {
        self.shortcut(|current, rhs| current / rhs, amount);
    }

    fn shortcut<V: Numeric>(&mut self, op: impl Fn(f64, f64) -> f64, amount: V) {
        self.ensure_initialized();
        self.current = T::from_f64(op(self.current.to_f64(), amount.to_f64()));
        self.clamp();
    }

    /// Detaches every modifier whose removal condition is met.
    ///
    /// Scans in reverse so index-based removal never skips an element.
    fn prune_due(&mut self) -> bool {
        let mut pruned = false;
        for index in (0..self.modifiers.len()).rev() {
            let due = self
                .modifiers
                .get(index)
                .is_some_and(|modifier| modifier.is_removal_due());
            if due {
                self.modifiers.remove(index);
                pruned = true;
            }
        }
        pruned
    }

    /// Full rebuild: prune, reset current to base, fold modifiers in
    /// ascending priority order, clamp.
    fn recalculate(&mut self) -> Result<(), StatError> {
        self.prune_due();
        let mut value = self.base;
        for modifier in self.modifiers.iter() {
            value = modifier.apply(value)?;
        }
        self.current = value;
        self.clamp();
        Ok(())
    }

    /// Clamps the cached current value to the optional limits.
    ///
    /// Both bounds are checked against the pre-clamp value, not against each
    /// other's result. A configuration where min exceeds max is logged, not
    /// repaired.
    fn clamp(&mut self) {
        let value = self.current.to_f64();

        if let (Some(min), Some(max)) = (&self.min_limit, &self.max_limit) {
            let min = min.min_limit().to_f64();
            let max = max.max_limit().to_f64();
            if min > max {
                tracing::warn!(min, max, "min limit exceeds max limit");
            }
        }

        if let Some(limit) = &self.min_limit {
            let min = limit.min_limit();
            if value < min.to_f64() {
                self.current = min;
            }
        }
        if let Some(limit) = &self.max_limit {
            let max = limit.max_limit();
            if value > max.to_f64() {
                self.current = max;
            }
        }
    }
}

/// Builder supplying the optional capabilities at construction time.
pub struct ModifiableValueBuilder<T: Numeric> {
    base: Option<T>,
    default_value: Option<Box<dyn DefaultValue<T>>>,
    min_limit: Option<Box<dyn MinLimit<T>>>,
    max_limit: Option<Box<dyn MaxLimit<T>>>,
}

impl<T: Numeric> Default for ModifiableValueBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> ModifiableValueBuilder<T> {
    pub fn new() -> Self {
        Self {
            base: None,
            default_value: None,
            min_limit: None,
            max_limit: None,
        }
    }

    /// Starting base value. Ignored if a default-value capability is also
    /// supplied, since initialization polls that first.
    pub fn base(mut self, base: T) -> Self {
        self.base = Some(base);
        self
    }

    pub fn default_value(mut self, default: impl DefaultValue<T> + 'static) -> Self {
        self.default_value = Some(Box::new(default));
        self
    }

    pub fn min_limit(mut self, limit: impl MinLimit<T> + 'static) -> Self {
        self.min_limit = Some(Box::new(limit));
        self
    }

    pub fn max_limit(mut self, limit: impl MaxLimit<T> + 'static) -> Self {
        self.max_limit = Some(Box::new(limit));
        self
    }

    pub fn build(self) -> ModifiableValue<T> {
        let mut value = match self.base {
            Some(base) => ModifiableValue::with_base(base),
            None => ModifiableValue::new(),
        };
        value.default_value = self.default_value;
        value.min_limit = self.min_limit;
        value.max_limit = self.max_limit;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Add, FlatAdd, Multiply, TickClock, TimedModifier};

    #[test]
    fn reads_are_idempotent_without_modifiers() {
        let mut value = ModifiableValue::with_base(10i32);
        for _ in 0..5 {
            assert_eq!(value.current_value().unwrap(), 10);
        }
    }

    #[test]
    fn default_value_capability_primes_the_base() {
        let mut value = ModifiableValue::<i32>::builder()
            .default_value(|| 42)
            .build();
        assert_eq!(value.current_value().unwrap(), 42);
        assert_eq!(value.base_value(), 42);
    }

    #[test]
    fn application_order_is_priority_driven() {
        let mut value = ModifiableValue::with_base(10i32);
        value.apply_modifier(Add::handle(5)).unwrap();
        value.apply_modifier(Multiply::handle(5)).unwrap();
        value.apply_modifier(FlatAdd::handle(5)).unwrap();

        // ((10 + 5) * 5) + 5, regardless of insertion order.
        assert_eq!(value.current_value().unwrap(), 80);
    }

    #[test]
    fn flat_add_combines_with_multiply() {
        let mut value = ModifiableValue::with_base(10i32);
        value.apply_modifier(Multiply::handle(5)).unwrap();
        value.apply_modifier(FlatAdd::handle(5)).unwrap();

        // (10 + 5) * 5
        assert_eq!(value.current_value().unwrap(), 75);
    }

    #[test]
    fn removing_a_modifier_restores_the_base() {
        let mut value = ModifiableValue::with_base(10i32);
        let buff = FlatAdd::handle(5);
        value.apply_modifier(Rc::clone(&buff)).unwrap();
        assert_eq!(value.current_value().unwrap(), 15);

        value.remove_modifier(&buff).unwrap();
        assert_eq!(value.current_value().unwrap(), 10);
    }

    #[test]
    fn removal_detaches_every_occurrence_of_the_handle() {
        let mut value = ModifiableValue::with_base(10i32);
        let buff = FlatAdd::handle(5);
        value.apply_modifier(Rc::clone(&buff)).unwrap();
        value.apply_modifier(Rc::clone(&buff)).unwrap();
        assert_eq!(value.current_value().unwrap(), 20);

        value.remove_modifier(&buff).unwrap();
        assert_eq!(value.modifier_count(), 0);
        assert_eq!(value.current_value().unwrap(), 10);
    }

    #[test]
    fn removal_is_by_identity_not_payload() {
        let mut value = ModifiableValue::with_base(10i32);
        let first = FlatAdd::handle(5);
        let lookalike = FlatAdd::handle(5);
        value.apply_modifier(Rc::clone(&first)).unwrap();

        value.remove_modifier(&lookalike).unwrap();
        assert_eq!(value.modifier_count(), 1);
        assert_eq!(value.current_value().unwrap(), 15);
    }

    #[test]
    fn direct_override_is_transient() {
        let mut value = ModifiableValue::<i32>::new();
        value.set_current_value(10);
        assert_eq!(value.current_value().unwrap(), 10);

        // Attaching a modifier recalculates from base (0) + 5.
        value.apply_modifier(Add::handle(5)).unwrap();
        assert_eq!(value.current_value().unwrap(), 5);
    }

    #[test]
    fn arithmetic_shortcuts_bypass_the_modifier_set() {
        let mut value = ModifiableValue::with_base(10.0f64);
        value.add(5.0);
        assert_eq!(value.current_value().unwrap(), 15.0);
        value.multiply(2.0);
        assert_eq!(value.current_value().unwrap(), 30.0);
        value.subtract(10);
        assert_eq!(value.current_value().unwrap(), 20.0);
        value.divide(4.0f32);
        assert_eq!(value.current_value().unwrap(), 5.0);

        // Shortcuts never touched the base.
        assert_eq!(value.base_value(), 10.0);

        // The next recalculation discards their effect.
        value.apply_modifier(FlatAdd::handle(1.0)).unwrap();
        assert_eq!(value.current_value().unwrap(), 11.0);
    }

    #[test]
    fn expired_modifiers_are_pruned_on_read() {
        let clock = TickClock::new();
        let mut value = ModifiableValue::with_base(10i32);
        value
            .apply_modifier(TimedModifier::handle(FlatAdd::handle(5), clock.clone(), 3))
            .unwrap();
        value.apply_modifier(FlatAdd::handle(5)).unwrap();

        assert_eq!(value.current_value().unwrap(), 20);

        clock.advance(3);
        // No explicit removal call: the read itself detaches the timed buff.
        assert_eq!(value.current_value().unwrap(), 15);
        assert_eq!(value.modifier_count(), 1);
    }

    #[test]
    fn computed_values_clamp_to_limits() {
        let mut value = ModifiableValue::<i32>::builder()
            .base(50)
            .min_limit(|| 0)
            .max_limit(|| 100)
            .build();

        value.add(10_000);
        assert_eq!(value.current_value().unwrap(), 100);

        value.set_current_value(50);
        value.subtract(10_000);
        assert_eq!(value.current_value().unwrap(), 0);

        value.apply_modifier(FlatAdd::handle(500)).unwrap();
        assert_eq!(value.current_value().unwrap(), 100);
    }

    #[test]
    fn failing_modifier_propagates_its_error() {
        use crate::order::{Prioritized, Priority};

        struct Broken;

        impl Prioritized for Broken {
            fn priority(&self) -> Priority {
                0
            }
        }

        impl crate::modifier::Modifier<i32> for Broken {
            fn apply(&self, _value: i32) -> Result<i32, StatError> {
                Err(StatError::UnsupportedOperation {
                    operation: "apply",
                    type_name: "Broken",
                })
            }

            fn unapply(&self, _value: i32) -> Result<i32, StatError> {
                Err(StatError::UnsupportedOperation {
                    operation: "unapply",
                    type_name: "Broken",
                })
            }
        }

        let mut value = ModifiableValue::with_base(10i32);
        let err = value.apply_modifier(Rc::new(Broken)).unwrap_err();
        assert!(matches!(err, StatError::UnsupportedOperation { .. }));
    }
}
