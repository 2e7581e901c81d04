//! Generic in-memory table
//!
//! Rows live in a sharded [`DashMap`]; ids come from an atomic counter and
//! start at 1. Closures passed to [`MemoryTable::update`] run while the
//! row's shard is locked, so they must not touch the same table.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use crate::services::ServiceResult;

#[derive(Debug)]
pub struct MemoryTable<T> {
    rows: DashMap<i64, T>,
    next_id: AtomicI64,
}

impl<T: Clone> MemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a row built from its freshly allocated id
    pub fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    /// All rows ordered by id
    pub fn values(&self) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = self
            .rows
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Rows matching `predicate`, ordered by id
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.values().into_iter().filter(|row| predicate(row)).collect()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.values().into_iter().find(|row| predicate(row))
    }

    /// Mutate one row in place; `Ok(None)` when the id is unknown
    pub fn update<R>(
        &self,
        id: i64,
        apply: impl FnOnce(&mut T) -> ServiceResult<R>,
    ) -> ServiceResult<Option<R>> {
        match self.rows.get_mut(&id) {
            Some(mut row) => apply(row.value_mut()).map(Some),
            None => Ok(None),
        }
    }

    /// Remove a row if `guard` allows it; `Ok(None)` when the id is unknown
    pub fn remove_if(
        &self,
        id: i64,
        guard: impl FnOnce(&T) -> ServiceResult<()>,
    ) -> ServiceResult<Option<T>> {
        match self.rows.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                guard(entry.get())?;
                Ok(Some(entry.remove()))
            }
            dashmap::mapref::entry::Entry::Vacant(_) => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Clone> Default for MemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
