use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use core_types::{ClassNameMap, ContentHash};

static GLOBAL: LazyLock<StyleRegistry> = LazyLock::new(StyleRegistry::new);

/// Content hashes already injected, with the class map each produced.
///
/// Grows for the life of the page/process; entries are only dropped by
/// [`StyleRegistry::clear`]. The check-and-insert in
/// [`StyleRegistry::get_or_try_insert_with`] runs under one lock, so
/// concurrent callers inject a given text at most once.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    injected: Mutex<HashMap<ContentHash, ClassNameMap>>,
    /// Thread currently running a producer under the `injected` lock.
    producer: Mutex<Option<ThreadId>>,
}

/// Result of [`StyleRegistry::get_or_try_insert_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Recorded by an earlier call.
    Cached(ClassNameMap),
    /// Produced by this call; `recorded` is false when the producer asked
    /// not to record it.
    Fresh { map: ClassNameMap, recorded: bool },
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static StyleRegistry {
        &GLOBAL
    }

    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.lock().contains_key(hash)
    }

    pub fn get(&self, hash: &ContentHash) -> Option<ClassNameMap> {
        self.lock().get(hash).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every entry. Styles already in a document stay there.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// True while this thread is inside a producer passed to
    /// [`StyleRegistry::get_or_try_insert_with`] on this registry.
    ///
    /// Calling back into the registry from there would deadlock; callers
    /// that can be reached from a producer check this first.
    pub fn is_producing_on_current_thread(&self) -> bool {
        let producer = self.producer.lock().unwrap_or_else(PoisonError::into_inner);
        *producer == Some(thread::current().id())
    }

    /// Return the map recorded for `hash`, or run `produce` and record its
    /// map when it returns `(map, true)`.
    ///
    /// The lock is held while `produce` runs, so `produce` must not use this
    /// registry again; see [`StyleRegistry::is_producing_on_current_thread`].
    pub fn get_or_try_insert_with<E>(
        &self,
        hash: &ContentHash,
        produce: impl FnOnce() -> Result<(ClassNameMap, bool), E>,
    ) -> Result<Lookup, E> {
        let mut injected = self.lock();
        if let Some(map) = injected.get(hash) {
            return Ok(Lookup::Cached(map.clone()));
        }
        let (map, record) = {
            let _producing = ProducerGuard::enter(&self.producer);
            produce()?
        };
        if record {
            injected.insert(hash.clone(), map.clone());
        }
        Ok(Lookup::Fresh {
            map,
            recorded: record,
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ContentHash, ClassNameMap>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.injected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks the current thread as the producer until dropped, unwinding included.
struct ProducerGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> ProducerGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread::current().id());
        Self { slot }
    }
}

impl Drop for ProducerGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
