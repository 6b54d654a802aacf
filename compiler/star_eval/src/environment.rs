//! Name → value namespace shared by globals and map values.
//!
//! A name containing `.` addresses nested environments: `set("player.name", ..)`
//! stores `name` inside the map bound to `player`, creating that map when the
//! slot is empty or holds something that is not a map (the old value is
//! replaced).
//!
//! An [`Environment`] is a cheap-clone handle; clones share the same table.
//! The table sits behind a `parking_lot::RwLock` so one environment can back
//! many VMs on many threads. Lazy suppliers run after the lock is released,
//! so a supplier may read the environment it lives in.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Function, RuntimeError, Value, Vm};

/// Supplier for a lazily computed value.
pub type LazyFn = dyn Fn() -> Value + Send + Sync;

/// A stored entry: a fixed value or a supplier evaluated on every read.
#[derive(Clone)]
pub enum Slot {
    Value(Value),
    Lazy(Arc<LazyFn>),
}

impl Slot {
    /// Current value of the slot.
    #[inline]
    pub fn get(&self) -> Value {
        match self {
            Slot::Value(value) => value.clone(),
            Slot::Lazy(supplier) => supplier(),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(value) => write!(f, "{value:?}"),
            Slot::Lazy(_) => f.write_str("<lazy>"),
        }
    }
}

/// Shared, thread-safe variable table.
#[derive(Clone, Default)]
pub struct Environment(Arc<RwLock<FxHashMap<String, Slot>>>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` (dot notation allowed) to a fixed value.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> &Self {
        self.set_slot(name, Slot::Value(value.into()));
        self
    }

    /// Bind `name` to a supplier evaluated on every read.
    pub fn set_lazy(&self, name: &str, supplier: impl Fn() -> Value + Send + Sync + 'static) -> &Self {
        self.set_slot(name, Slot::Lazy(Arc::new(supplier)));
        self
    }

    /// Bind `name` to a host function.
    pub fn set_function(
        &self,
        name: &str,
        function: impl Fn(&mut Vm, u8) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    ) -> &Self {
        self.set_slot(name, Slot::Value(Value::Function(Function::new(function))));
        self
    }

    /// Bind `name` to a nested environment.
    pub fn set_map(&self, name: &str, map: Environment) -> &Self {
        self.set_slot(name, Slot::Value(Value::Map(map)));
        self
    }

    /// Store a slot, following dot notation.
    pub fn set_slot(&self, name: &str, slot: Slot) {
        match name.split_once('.') {
            Some((head, rest)) => self.child_map(head).set_slot(rest, slot),
            None => {
                self.0.write().insert(name.to_owned(), slot);
            }
        }
    }

    /// The map bound to `name`, replacing any non-map value with a new one.
    ///
    /// The check and the insert happen under one write guard, so concurrent
    /// `set("a.x")` and `set("a.y")` land in the same map. A lazy slot is
    /// evaluated with the lock released.
    fn child_map(&self, name: &str) -> Environment {
        let supplier = {
            let mut table = self.0.write();
            let lazy = match table.get(name) {
                Some(Slot::Lazy(supplier)) => Some(Arc::clone(supplier)),
                _ => None,
            };
            let Some(supplier) = lazy else {
                return map_entry(&mut table, name);
            };
            supplier
        };
        if let Value::Map(map) = supplier() {
            return map;
        }
        map_entry(&mut self.0.write(), name)
    }

    /// Look up `name`, following dot notation. `None` when any step is
    /// missing or an intermediate value is not a map.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name.split_once('.') {
            Some((head, rest)) => match self.get_raw(head)? {
                Value::Map(map) => map.get(rest),
                _ => None,
            },
            None => self.get_raw(name),
        }
    }

    /// Look up `name` in this table only; dots are part of the key.
    pub fn get_raw(&self, name: &str) -> Option<Value> {
        let slot = self.0.read().get(name).cloned();
        slot.map(|slot| slot.get())
    }

    /// Remove `name`, following dot notation.
    ///
    /// For `a.b` where `a` exists but is not a map, `a` itself is removed.
    pub fn remove(&self, name: &str) -> Option<Slot> {
        match name.split_once('.') {
            Some((head, rest)) => match self.get_raw(head)? {
                Value::Map(map) => map.remove(rest),
                _ => self.remove_raw(head),
            },
            None => self.remove_raw(name),
        }
    }

    pub fn remove_raw(&self, name: &str) -> Option<Slot> {
        self.0.write().remove(name)
    }

    /// All names in this table, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.read().contains_key(name)
    }

    pub fn clear(&self) {
        self.0.write().clear();
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Whether both handles share one table.
    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

/// The map stored at `name`, or a fresh one inserted in its place.
fn map_entry(table: &mut FxHashMap<String, Slot>, name: &str) -> Environment {
    if let Some(Slot::Value(Value::Map(map))) = table.get(name) {
        return map.clone();
    }
    let map = Environment::new();
    table.insert(name.to_owned(), Slot::Value(Value::Map(map.clone())));
    map
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.keys();
        keys.sort_unstable();
        f.debug_struct("Environment").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests;
