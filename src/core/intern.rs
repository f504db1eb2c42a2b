// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::math::constants::{Point2, Point3, Real, Vector2, Vector3};

/// Values that can be deduplicated by an `Interner`. The key compares exact
/// bit patterns, so `0.0` and `-0.0` are kept apart.
pub trait InternKey {
    type Key: Hash + Eq;

    fn intern_key(&self) -> Self::Key;
}

impl<T: Real> InternKey for Point2<T> {
    type Key = [u64; 2];

    fn intern_key(&self) -> Self::Key {
        [self.x.bit_pattern(), self.y.bit_pattern()]
    }
}

impl<T: Real> InternKey for Vector2<T> {
    type Key = [u64; 2];

    fn intern_key(&self) -> Self::Key {
        [self.x.bit_pattern(), self.y.bit_pattern()]
    }
}

impl<T: Real> InternKey for Point3<T> {
    type Key = [u64; 3];

    fn intern_key(&self) -> Self::Key {
        [self.x.bit_pattern(), self.y.bit_pattern(), self.z.bit_pattern()]
    }
}

impl<T: Real> InternKey for Vector3<T> {
    type Key = [u64; 3];

    fn intern_key(&self) -> Self::Key {
        [self.x.bit_pattern(), self.y.bit_pattern(), self.z.bit_pattern()]
    }
}

/// Hands out one shared instance per distinct value.
///
/// Purely a memory optimization: interned values compare exactly like the
/// values they were built from. Safe to share between threads.
pub struct Interner<V: InternKey> {
    cache: Mutex<HashMap<V::Key, Arc<V>>>,
}

impl<V: InternKey> Default for Interner<V> {
    fn default() -> Self {
        Self { cache: Mutex::new(HashMap::new()) }
    }
}

impl<V: InternKey> fmt::Debug for Interner<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("size", &self.size()).finish()
    }
}

impl<V: InternKey> Interner<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, value: V) -> Arc<V> {
        let mut cache = self.lock();
        let entry = cache.entry(value.intern_key()).or_insert_with(|| Arc::new(value));
        Arc::clone(entry)
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        let mut cache = self.lock();
        log::trace!("clearing {} interned values", cache.len());
        cache.clear();
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<V::Key, Arc<V>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
