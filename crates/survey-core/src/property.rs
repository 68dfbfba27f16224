//! Reactive per-instance property storage.
//!
//! A [`PropertyBag`] maps typed keys to values and runs change callbacks when a
//! write actually changes a value. Every element in the model keeps its reactive
//! state here; values are only handed out by shared reference, so the sole way
//! to change one is through [`PropertyBag::set`] or, for sequence values,
//! [`PropertyBag::modify_sequence`].
//!
//! Callbacks run synchronously inside the write and receive the bag mutably,
//! which lets them update derived properties. Writes are equality-gated, which
//! is also what stops a callback that writes back into the bag from recursing
//! forever: it must converge on a stable value.
//!
//! # Example
//!
//! ```
//! use survey_core::property::PropertyBag;
//!
//! let mut bag: PropertyBag<&'static str, i64> = PropertyBag::new();
//! bag.declare("count", 0);
//! bag.declare("double", 0);
//! bag.register_on_change("count", |bag, _change| {
//!     let count = *bag.get(&"count").unwrap_or(&0);
//!     bag.set("double", count * 2);
//! });
//!
//! bag.set("count", 21);
//! assert_eq!(bag.get(&"double"), Some(&42));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{trace, warn};

/// Handle returned by [`PropertyBag::register_on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// How a property changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The whole value was replaced through `set`.
    Assigned,
    /// A sequence value was mutated in place through `modify_sequence`.
    SequenceModified,
}

/// Notification payload passed to change callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange<K, V> {
    pub key: K,
    /// Previous stored value; `None` if the property had never been written.
    pub old_value: Option<V>,
    pub kind: ChangeKind,
}

/// Change callback. Receives the bag (already holding the new value) and the change.
pub type ChangeCallback<K, V> =
    Arc<dyn Fn(&mut PropertyBag<K, V>, &PropertyChange<K, V>) + Send + Sync>;

/// Keyed reactive storage owned by a single instance.
pub struct PropertyBag<K, V> {
    values: HashMap<K, V>,
    defaults: HashMap<K, V>,
    callbacks: HashMap<K, Vec<(CallbackId, ChangeCallback<K, V>)>>,
    sequences: HashSet<K>,
    next_callback_id: u64,
}

impl<K, V> Default for PropertyBag<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for PropertyBag<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBag")
            .field("values", &self.values)
            .field("defaults", &self.defaults)
            .field("sequences", &self.sequences)
            .field(
                "callbacks",
                &self
                    .callbacks
                    .iter()
                    .map(|(k, list)| (k, list.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<K, V> PropertyBag<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            defaults: HashMap::new(),
            callbacks: HashMap::new(),
            sequences: HashSet::new(),
            next_callback_id: 1,
        }
    }

    /// Declare a property and the value reads return while it is unset.
    pub fn declare(&mut self, key: K, default: V) {
        self.defaults.insert(key, default);
    }

    pub fn is_declared(&self, key: &K) -> bool {
        self.defaults.contains_key(key)
    }

    /// Stored value, else the declared default.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key).or_else(|| self.defaults.get(key))
    }

    /// Stored value, else the declared default, else `default`.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Whether a value has been written (defaults do not count).
    pub fn is_set(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Store `value` under `key`.
    ///
    /// Returns `true` and fires the key's callbacks in registration order if the
    /// value differs from what [`get`](Self::get) reads; equal writes, including
    /// writing the declared default over an unset key, are no-ops.
    pub fn set(&mut self, key: K, value: V) -> bool {
        let old_value = self.get(&key).cloned();
        if old_value.as_ref() == Some(&value) {
            return false;
        }
        self.values.insert(key.clone(), value);
        self.notify(PropertyChange {
            key,
            old_value,
            kind: ChangeKind::Assigned,
        });
        true
    }

    /// Register a change callback for `key`. Several callbacks per key are
    /// allowed; all of them fire.
    pub fn register_on_change<F>(&mut self, key: K, callback: F) -> CallbackId
    where
        F: Fn(&mut PropertyBag<K, V>, &PropertyChange<K, V>) + Send + Sync + 'static,
    {
        let id = CallbackId(self.next_callback_id);
        self.next_callback_id += 1;
        let callback: ChangeCallback<K, V> = Arc::new(callback);
        self.callbacks.entry(key).or_default().push((id, callback));
        id
    }

    /// Remove a previously registered callback. Returns `false` if unknown.
    pub fn unregister(&mut self, id: CallbackId) -> bool {
        for list in self.callbacks.values_mut() {
            if let Some(pos) = list.iter().position(|(cb_id, _)| *cb_id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn callback_count(&self, key: &K) -> usize {
        self.callbacks.get(key).map(Vec::len).unwrap_or(0)
    }

    /// Install `empty` as the value of `key` and mark it as an observable
    /// sequence. Does nothing if the sequence already exists.
    ///
    /// Returns `true` if the sequence was created by this call.
    pub fn create_sequence(&mut self, key: K, empty: V) -> bool {
        if self.sequences.contains(&key) {
            return false;
        }
        self.values.insert(key.clone(), empty);
        self.sequences.insert(key);
        true
    }

    pub fn is_sequence(&self, key: &K) -> bool {
        self.sequences.contains(key)
    }

    /// Mutate a sequence value in place and notify subscribers if it changed.
    ///
    /// Returns `false` without running `mutate` if `key` is not an observable
    /// sequence created with [`create_sequence`](Self::create_sequence).
    pub fn modify_sequence<F>(&mut self, key: K, mutate: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        if !self.sequences.contains(&key) {
            warn!("modify_sequence called on a property that is not a sequence");
            return false;
        }
        let Some(current) = self.values.get_mut(&key) else {
            return false;
        };
        let old_value = current.clone();
        mutate(current);
        if *current == old_value {
            return false;
        }
        self.notify(PropertyChange {
            key,
            old_value: Some(old_value),
            kind: ChangeKind::SequenceModified,
        });
        true
    }

    /// Keys with a stored value.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.values.keys()
    }

    fn notify(&mut self, change: PropertyChange<K, V>) {
        // Snapshot so callbacks may register/unregister or write reentrantly.
        let callbacks: Vec<ChangeCallback<K, V>> = match self.callbacks.get(&change.key) {
            Some(list) if !list.is_empty() => list.iter().map(|(_, cb)| cb.clone()).collect(),
            _ => return,
        };
        trace!(callbacks = callbacks.len(), "firing property change callbacks");
        for callback in callbacks {
            callback(self, &change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    type Bag = PropertyBag<&'static str, i64>;

    #[test]
    fn test_get_returns_declared_default() {
        let mut bag = Bag::new();
        bag.declare("a", 5);

        assert_eq!(bag.get(&"a"), Some(&5));
        assert_eq!(bag.get(&"b"), None);
        assert_eq!(*bag.get_or(&"b", &9), 9);
        assert!(!bag.is_set(&"a"));
    }

    #[test]
    fn test_defaults_are_per_instance() {
        let mut first = Bag::new();
        let mut second = Bag::new();
        first.declare("a", 1);
        second.declare("a", 2);
        first.set("a", 10);

        assert_eq!(first.get(&"a"), Some(&10));
        assert_eq!(second.get(&"a"), Some(&2));
    }

    #[test]
    fn test_callbacks_fire_in_registration_order_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bag = Bag::new();
        for tag in ["first", "second", "third"] {
            let log = log.clone();
            bag.register_on_change("a", move |_, _| log.lock().push(tag));
        }

        assert!(bag.set("a", 1));
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_equal_value_fires_nothing() {
        let count = Arc::new(Mutex::new(0));
        let mut bag = Bag::new();
        let counter = count.clone();
        bag.register_on_change("a", move |_, _| *counter.lock() += 1);

        bag.set("a", 1);
        assert!(!bag.set("a", 1));
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_writing_declared_default_fires_nothing() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bag = Bag::new();
        bag.declare("a", 0);
        let sink = seen.clone();
        bag.register_on_change("a", move |_, change| sink.lock().push(change.old_value));

        assert!(!bag.set("a", 0));
        assert!(!bag.is_set(&"a"));
        assert!(bag.set("a", 3));
        assert_eq!(*seen.lock(), vec![Some(0)]);
    }

    #[test]
    fn test_change_carries_old_value() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bag = Bag::new();
        let sink = seen.clone();
        bag.register_on_change("a", move |bag, change| {
            sink.lock().push((change.old_value, *bag.get(&"a").unwrap_or(&0)));
        });

        bag.set("a", 1);
        bag.set("a", 2);
        assert_eq!(*seen.lock(), vec![(None, 1), (Some(1), 2)]);
    }

    #[test]
    fn test_reentrant_write_converges() {
        let mut bag = Bag::new();
        // Clamp writes above 10 back down; the second write is equal and stops.
        bag.register_on_change("a", |bag, _| {
            let value = *bag.get(&"a").unwrap_or(&0);
            if value > 10 {
                bag.set("a", 10);
            }
        });

        bag.set("a", 50);
        assert_eq!(bag.get(&"a"), Some(&10));
    }

    #[test]
    fn test_unregister() {
        let count = Arc::new(Mutex::new(0));
        let mut bag = Bag::new();
        let counter = count.clone();
        let id = bag.register_on_change("a", move |_, _| *counter.lock() += 1);

        assert!(bag.unregister(id));
        assert!(!bag.unregister(id));
        bag.set("a", 3);
        assert_eq!(*count.lock(), 0);
        assert_eq!(bag.callback_count(&"a"), 0);
    }

    #[test]
    fn test_sequence_modifications_notify() {
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let mut bag: PropertyBag<&'static str, Vec<i64>> = PropertyBag::new();
        assert!(bag.create_sequence("items", Vec::new()));
        assert!(!bag.create_sequence("items", vec![1]));
        let sink = kinds.clone();
        bag.register_on_change("items", move |_, change| sink.lock().push(change.kind));

        assert!(bag.modify_sequence("items", |v| v.push(1)));
        assert!(!bag.modify_sequence("items", |_| {}));
        assert!(bag.set("items", vec![]));

        assert_eq!(
            *kinds.lock(),
            vec![ChangeKind::SequenceModified, ChangeKind::Assigned]
        );
    }

    #[test]
    fn test_modify_requires_sequence() {
        let mut bag: PropertyBag<&'static str, Vec<i64>> = PropertyBag::new();
        bag.set("plain", vec![]);
        assert!(!bag.modify_sequence("plain", |v| v.push(1)));
        assert_eq!(bag.get(&"plain"), Some(&vec![]));
    }
}
