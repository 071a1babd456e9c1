use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::models::room::RoomRecord;

pub const DEFAULT_MAX_ROOMS: usize = 3;

pub type CompareListener = Box<dyn Fn(&[RoomRecord]) + Send + Sync>;
pub type ScopedCompareListener = Arc<dyn Fn(&str, &[RoomRecord]) + Send + Sync>;

/// Rooms picked for side-by-side comparison, unique by id and bounded by
/// `max_rooms`. Mutation only goes through the methods below.
pub struct ComparisonSet {
    max_rooms: usize,
    items: Vec<RoomRecord>,
    ids: HashSet<String>,
    listeners: Vec<CompareListener>,
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROOMS)
    }
}

impl ComparisonSet {
    pub fn new(max_rooms: usize) -> Self {
        Self {
            max_rooms,
            items: Vec::new(),
            ids: HashSet::new(),
            listeners: Vec::new(),
        }
    }

    pub fn max_rooms(&self) -> usize {
        self.max_rooms
    }

    pub fn items(&self) -> &[RoomRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_rooms
    }

    pub fn on_compare_changed(&mut self, listener: CompareListener) {
        self.listeners.push(listener);
    }

    /// Returns `false` when the room is already present or the set is full.
    pub fn add_room(&mut self, room: RoomRecord) -> bool {
        if self.is_full() || self.ids.contains(&room.id) {
            return false;
        }
        self.ids.insert(room.id.clone());
        self.items.push(room);
        self.notify();
        true
    }

    pub fn remove_room(&mut self, room_id: &str) -> bool {
        if !self.ids.remove(room_id) {
            return false;
        }
        self.items.retain(|room| room.id != room_id);
        self.notify();
        true
    }

    pub fn is_comparing(&self, room_id: &str) -> bool {
        self.ids.contains(room_id)
    }

    pub fn clear_all(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.ids.clear();
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.items);
        }
    }
}

/// Owns one [`ComparisonSet`] per visitor scope. Registered once on the app
/// and handed to consumers through the comparison context.
///
/// A scope exists only while it holds rooms. Listeners run after the scope
/// lock is released, so they may call back into the provider.
pub struct ComparisonProvider {
    max_rooms: usize,
    scopes: Mutex<HashMap<String, ComparisonSet>>,
    listeners: Mutex<Vec<ScopedCompareListener>>,
}

impl ComparisonProvider {
    pub fn new(max_rooms: usize) -> Self {
        Self {
            max_rooms,
            scopes: Mutex::new(HashMap::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn max_rooms(&self) -> usize {
        self.max_rooms
    }

    pub fn subscribe(&self, listener: ScopedCompareListener) {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(listener);
    }

    /// Number of scopes currently holding at least one room.
    pub fn scope_count(&self) -> usize {
        self.lock_scopes().len()
    }

    /// Runs `f` against the scope's set, or returns `None` when the scope
    /// holds nothing. Never creates a scope.
    pub fn read_scope<R>(&self, scope: &str, f: impl FnOnce(&ComparisonSet) -> R) -> Option<R> {
        self.lock_scopes().get(scope).map(f)
    }

    pub fn items(&self, scope: &str) -> Vec<RoomRecord> {
        self.read_scope(scope, |set| set.items().to_vec())
            .unwrap_or_default()
    }

    pub fn is_comparing(&self, scope: &str, room_id: &str) -> bool {
        self.read_scope(scope, |set| set.is_comparing(room_id))
            .unwrap_or(false)
    }

    pub fn add_room(&self, scope: &str, room: RoomRecord) -> bool {
        let snapshot = {
            let mut scopes = self.lock_scopes();
            match scopes.get_mut(scope) {
                Some(set) => set.add_room(room).then(|| set.items().to_vec()),
                None => {
                    let mut set = ComparisonSet::new(self.max_rooms);
                    if set.add_room(room) {
                        let items = set.items().to_vec();
                        scopes.insert(scope.to_string(), set);
                        log::debug!("Comparison scope {} opened", scope);
                        Some(items)
                    } else {
                        None
                    }
                }
            }
        };
        self.notify_if_changed(scope, snapshot)
    }

    pub fn remove_room(&self, scope: &str, room_id: &str) -> bool {
        let snapshot = {
            let mut scopes = self.lock_scopes();
            let Some(set) = scopes.get_mut(scope) else {
                return false;
            };
            if !set.remove_room(room_id) {
                return false;
            }
            let items = set.items().to_vec();
            if items.is_empty() {
                scopes.remove(scope);
                log::debug!("Comparison scope {} closed", scope);
            }
            Some(items)
        };
        self.notify_if_changed(scope, snapshot)
    }

    pub fn clear_all(&self, scope: &str) -> bool {
        let removed = self.lock_scopes().remove(scope);
        let snapshot = removed.filter(|set| !set.is_empty()).map(|_| Vec::new());
        self.notify_if_changed(scope, snapshot)
    }

    fn lock_scopes(&self) -> MutexGuard<'_, HashMap<String, ComparisonSet>> {
        self.scopes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify_if_changed(&self, scope: &str, snapshot: Option<Vec<RoomRecord>>) -> bool {
        let Some(items) = snapshot else {
            return false;
        };
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for listener in listeners {
            listener(scope, &items);
        }
        true
    }
}

impl Default for ComparisonProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROOMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn room(id: &str) -> RoomRecord {
        RoomRecord {
            id: id.to_string(),
            name: format!("Room {}", id),
            price_per_night: 295.0,
            max_guests: 2,
            size_sqm: None,
            bed: None,
            amenities: Vec::new(),
        }
    }

    #[test]
    fn test_capacity_is_enforced_silently() {
        let mut set = ComparisonSet::new(3);
        assert!(set.add_room(room("a")));
        assert!(set.add_room(room("b")));
        assert!(set.add_room(room("c")));
        assert!(!set.add_room(room("d")));
        assert_eq!(set.len(), 3);
        assert!(!set.is_comparing("d"));

        assert!(set.remove_room("b"));
        assert!(set.add_room(room("d")));
        assert_eq!(set.len(), 3);
        let ids: Vec<_> = set.items().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_duplicates_and_missing_ids_are_ignored() {
        let mut set = ComparisonSet::default();
        assert!(set.add_room(room("a")));
        assert!(!set.add_room(room("a")));
        assert!(!set.remove_room("zzz"));
        assert_eq!(set.len(), 1);

        set.clear_all();
        assert!(set.is_empty());
        assert!(!set.is_comparing("a"));
    }

    #[test]
    fn test_listeners_fire_only_on_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut set = ComparisonSet::new(1);
        let counter = calls.clone();
        set.on_compare_changed(Box::new(move |_: &[RoomRecord]| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        set.add_room(room("a"));
        set.add_room(room("b"));
        set.remove_room("missing");
        set.clear_all();
        set.clear_all();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_provider_scopes_are_independent() {
        let provider = ComparisonProvider::new(2);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        provider.subscribe(Arc::new(move |scope: &str, items: &[RoomRecord]| {
            sink.lock().unwrap().push((scope.to_string(), items.len()));
        }));

        assert!(provider.add_room("alice", room("a")));
        assert!(provider.add_room("bob", room("b")));
        assert!(provider.add_room("alice", room("c")));
        assert!(!provider.add_room("alice", room("d")));

        assert_eq!(provider.items("alice").len(), 2);
        assert_eq!(provider.items("bob").len(), 1);
        assert!(!provider.is_comparing("bob", "a"));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("alice".to_string(), 1),
                ("bob".to_string(), 1),
                ("alice".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_reads_do_not_open_scopes() {
        let provider = ComparisonProvider::new(3);
        for visitor in 0..50 {
            let scope = format!("visitor-{}", visitor);
            assert!(provider.items(&scope).is_empty());
            assert!(!provider.is_comparing(&scope, "garden-room"));
            assert!(!provider.remove_room(&scope, "garden-room"));
            assert!(!provider.clear_all(&scope));
        }
        assert_eq!(provider.scope_count(), 0);
    }

    #[test]
    fn test_emptied_scopes_are_dropped() {
        let provider = ComparisonProvider::new(3);
        provider.add_room("alice", room("a"));
        provider.add_room("alice", room("b"));
        provider.add_room("bob", room("a"));
        assert_eq!(provider.scope_count(), 2);

        provider.remove_room("alice", "a");
        assert_eq!(provider.scope_count(), 2);
        provider.remove_room("alice", "b");
        assert_eq!(provider.scope_count(), 1);

        assert!(provider.clear_all("bob"));
        assert_eq!(provider.scope_count(), 0);
    }

    #[test]
    fn test_listener_can_read_back_into_provider() {
        let provider = Arc::new(ComparisonProvider::new(3));
        let observed = Arc::new(Mutex::new(Vec::new()));
        let weak = Arc::downgrade(&provider);
        let sink = observed.clone();
        provider.subscribe(Arc::new(move |scope: &str, _: &[RoomRecord]| {
            if let Some(provider) = weak.upgrade() {
                sink.lock().unwrap().push(provider.items(scope).len());
            }
        }));

        provider.add_room("alice", room("a"));
        provider.add_room("alice", room("b"));
        provider.remove_room("alice", "a");
        provider.clear_all("alice");
        assert_eq!(*observed.lock().unwrap(), vec![1, 2, 1, 0]);
    }
}
