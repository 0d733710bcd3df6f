//! Query cache shared by every view in one client process.
//!
//! One list per entity. Queries read through it; mutations drop the
//! affected entry so the next read goes back to the server. Nothing here
//! expires on a timer.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use bitebook_core::{contact::Contact, restaurant::Restaurant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
  Contacts,
  Restaurants,
}

#[derive(Debug, Clone)]
enum Entry {
  Contacts(Arc<Vec<Contact>>),
  Restaurants(Arc<Vec<Restaurant>>),
}

#[derive(Debug, Default)]
pub struct QueryCache {
  entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
  pub fn new() -> Self { Self::default() }

  fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
    // Entries are plain values; a panic mid-insert cannot leave one torn.
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn contacts(&self) -> Option<Arc<Vec<Contact>>> {
    match self.entries().get(&QueryKey::Contacts) {
      Some(Entry::Contacts(list)) => Some(Arc::clone(list)),
      _ => None,
    }
  }

  pub fn restaurants(&self) -> Option<Arc<Vec<Restaurant>>> {
    match self.entries().get(&QueryKey::Restaurants) {
      Some(Entry::Restaurants(list)) => Some(Arc::clone(list)),
      _ => None,
    }
  }

  pub fn put_contacts(&self, list: Vec<Contact>) -> Arc<Vec<Contact>> {
    let list = Arc::new(list);
    self
      .entries()
      .insert(QueryKey::Contacts, Entry::Contacts(Arc::clone(&list)));
    list
  }

  pub fn put_restaurants(&self, list: Vec<Restaurant>) -> Arc<Vec<Restaurant>> {
    let list = Arc::new(list);
    self
      .entries()
      .insert(QueryKey::Restaurants, Entry::Restaurants(Arc::clone(&list)));
    list
  }

  pub fn invalidate(&self, key: QueryKey) {
    if self.entries().remove(&key).is_some() {
      tracing::debug!(?key, "query invalidated");
    }
  }

  pub fn is_cached(&self, key: QueryKey) -> bool { self.entries().contains_key(&key) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_cache_misses() {
    let cache = QueryCache::new();
    assert!(cache.contacts().is_none());
    assert!(cache.restaurants().is_none());
    assert!(!cache.is_cached(QueryKey::Contacts));
  }

  #[test]
  fn invalidation_is_per_key() {
    let cache = QueryCache::new();
    cache.put_contacts(Vec::new());
    cache.put_restaurants(Vec::new());

    cache.invalidate(QueryKey::Contacts);
    assert!(!cache.is_cached(QueryKey::Contacts));
    assert!(cache.is_cached(QueryKey::Restaurants));
    assert!(cache.restaurants().is_some_and(|l| l.is_empty()));
  }

  #[test]
  fn invalidating_a_missing_key_is_a_no_op() {
    let cache = QueryCache::new();
    cache.invalidate(QueryKey::Restaurants);
    assert!(!cache.is_cached(QueryKey::Restaurants));
  }
}
