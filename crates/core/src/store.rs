use std::cmp::Ordering;
use std::collections::BTreeMap;

use common::{error::Error, types::Route};

/// Totally ordered `f64` key; `+inf` sorts after every finite distance.
#[derive(Debug, Clone, Copy)]
pub struct DistanceKey(pub f64);

impl PartialEq for DistanceKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DistanceKey {}

impl PartialOrd for DistanceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DistanceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Candidate routes keyed by total distance, ascending.
///
/// At most one route is kept per distinct distance: inserting at an existing
/// distance replaces the earlier route, so two different routes of equal
/// length collapse into the most recent one.
#[derive(Debug, Default, Clone)]
pub struct RankedStore {
    entries: BTreeMap<DistanceKey, Route>,
}

impl RankedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `route` at `distance`, returning the route it displaced.
    pub fn insert(&mut self, distance: f64, route: Route) -> Option<Route> {
        self.entries.insert(DistanceKey(distance), route)
    }

    /// Entry with the smallest distance.
    ///
    /// # Errors
    /// Returns `Error::EmptyStore` if nothing has been inserted.
    pub fn minimum(&self) -> Result<(f64, &Route), Error> {
        self.entries
            .iter()
            .next()
            .map(|(key, route)| (key.0, route))
            .ok_or(Error::EmptyStore)
    }

    /// Entry reached by advancing `k` positions past the minimum.
    ///
    /// # Errors
    /// Returns `Error::InsufficientCandidates` if fewer than `k + 1` distinct
    /// distances are stored.
    pub fn nth_from_minimum(&self, k: usize) -> Result<(f64, &Route), Error> {
        self.entries
            .iter()
            .nth(k)
            .map(|(key, route)| (key.0, route))
            .ok_or(Error::InsufficientCandidates {
                requested: k + 1,
                available: self.entries.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending distance order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Route)> {
        self.entries.iter().map(|(key, route)| (key.0, route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::WeightedPath;

    fn route(distance: f64, vertices: &[usize]) -> Route {
        Route::Found(WeightedPath::new(distance, vertices.to_vec()))
    }

    #[test]
    fn minimum_on_empty_store_fails() {
        let store = RankedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.minimum(), Err(Error::EmptyStore));
    }

    #[test]
    fn same_distance_keeps_latest() {
        let mut store = RankedStore::new();
        assert!(store.insert(3.0, route(3.0, &[0, 1, 2])).is_none());

        let displaced = store.insert(3.0, route(3.0, &[0, 4, 2]));

        assert_eq!(displaced, Some(route(3.0, &[0, 1, 2])));
        assert_eq!(store.len(), 1);
        assert_eq!(store.minimum(), Ok((3.0, &route(3.0, &[0, 4, 2]))));
    }

    #[test]
    fn entries_are_ordered_by_distance() {
        let mut store = RankedStore::new();
        store.insert(5.0, route(5.0, &[0, 5]));
        store.insert(2.5, route(2.5, &[0, 2]));
        store.insert(4.0, route(4.0, &[0, 4]));

        let distances: Vec<f64> = store.iter().map(|(d, _)| d).collect();
        assert_eq!(distances, vec![2.5, 4.0, 5.0]);

        assert_eq!(store.minimum().unwrap().0, 2.5);
        assert_eq!(store.nth_from_minimum(0).unwrap().0, 2.5);
        assert_eq!(store.nth_from_minimum(2).unwrap().0, 5.0);
    }

    #[test]
    fn nth_from_minimum_past_end_fails() {
        let mut store = RankedStore::new();
        store.insert(1.0, route(1.0, &[0, 1]));
        store.insert(2.0, route(2.0, &[0, 2, 1]));

        assert_eq!(
            store.nth_from_minimum(2),
            Err(Error::InsufficientCandidates {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn unreachable_entries_sort_last() {
        let mut store = RankedStore::new();
        store.insert(f64::INFINITY, Route::Unreachable);
        store.insert(7.0, route(7.0, &[0, 3, 1]));

        assert_eq!(store.len(), 2);
        assert_eq!(store.minimum().unwrap().0, 7.0);
        assert_eq!(
            store.nth_from_minimum(1),
            Ok((f64::INFINITY, &Route::Unreachable))
        );
    }
}
