//! Integration tests for `SqliteStore` against an in-memory database.

use std::num::NonZeroUsize;

use bitebook_core::{
  Status,
  contact::NewContact,
  restaurant::{Coordinates, NewRestaurant, RestaurantPatch},
  store::{ContactRepository, RestaurantRepository},
};

use chrono::{DateTime, Utc};

use crate::SqliteStore;

const PAST: &str = "2020-01-01T00:00:00+00:00";

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn jane() -> NewContact {
  NewContact {
    first_name: "Jane".into(),
    last_name:  "Doe".into(),
    email:      "jane@x.com".into(),
    phone:      "0412345678".into(),
    notes:      None,
  }
}

fn chin_chin() -> NewRestaurant {
  NewRestaurant {
    name: "Chin Chin".into(),
    address: Some("125 Flinders Ln, Melbourne".into()),
    coordinates: Some(Coordinates { lng: 144.9706, lat: -37.8160 }),
    ..Default::default()
  }
}

/// Read a row's status directly, bypassing the ENABLED filter.
async fn raw_status(s: &SqliteStore, table: &'static str, id: i64) -> Option<String> {
  s.conn()
    .call(move |conn| {
      use rusqlite::OptionalExtension as _;
      Ok(
        conn
          .query_row(
            &format!("SELECT status FROM {table} WHERE id = ?1"),
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?,
      )
    })
    .await
    .unwrap()
}

/// Rewind a row's `updated_time` to [`PAST`] and return that instant.
async fn backdate(s: &SqliteStore, table: &'static str, id: i64) -> DateTime<Utc> {
  s.conn()
    .call(move |conn| {
      conn.execute(
        &format!("UPDATE {table} SET updated_time = ?1 WHERE id = ?2"),
        rusqlite::params![PAST, id],
      )?;
      Ok(())
    })
    .await
    .unwrap();
  DateTime::parse_from_rfc3339(PAST).unwrap().with_timezone(&Utc)
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_contact_assigns_id_and_defaults() {
  let s = store().await;

  let c = s.create_contact(jane()).await.unwrap();
  assert!(c.id > 0);
  assert_eq!(c.status, Status::Enabled);
  assert!(!c.verified);
  assert_eq!(c.created_time, c.updated_time);
  assert_eq!(c.first_name, "Jane");
  assert_eq!(c.notes, None);
}

#[tokio::test]
async fn contact_ids_increase() {
  let s = store().await;
  let a = s.create_contact(jane()).await.unwrap();
  let b = s.create_contact(jane()).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn list_contacts_empty() {
  let s = store().await;
  assert!(s.list_active_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn soft_deleted_contact_is_hidden_but_retained() {
  let s = store().await;
  let keep = s.create_contact(jane()).await.unwrap();
  let gone = s.create_contact(jane()).await.unwrap();
  let past = backdate(&s, "contacts", gone.id).await;

  let deleted = s.soft_delete_contact(gone.id).await.unwrap().unwrap();
  assert_eq!(deleted.status, Status::Deleted);
  assert_eq!(deleted.created_time, gone.created_time);
  assert!(deleted.updated_time > past);

  let listed = s.list_active_contacts().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, keep.id);

  assert_eq!(raw_status(&s, "contacts", gone.id).await.as_deref(), Some("DELETED"));
}

#[tokio::test]
async fn deleting_twice_reapplies_status() {
  let s = store().await;
  let c = s.create_contact(jane()).await.unwrap();
  s.soft_delete_contact(c.id).await.unwrap().unwrap();
  let again = s.soft_delete_contact(c.id).await.unwrap();
  assert_eq!(again.map(|c| c.status), Some(Status::Deleted));
}

#[tokio::test]
async fn disabled_contacts_are_not_listed() {
  let s = store().await;
  let c = s.create_contact(jane()).await.unwrap();
  let id = c.id;
  s.conn()
    .call(move |conn| {
      conn.execute(
        "UPDATE contacts SET status = 'DISABLED' WHERE id = ?1",
        rusqlite::params![id],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  assert!(s.list_active_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn verify_is_idempotent() {
  let s = store().await;
  let c = s.create_contact(jane()).await.unwrap();

  let past = backdate(&s, "contacts", c.id).await;
  let first = s.verify_contact(c.id).await.unwrap().unwrap();
  assert!(first.verified);
  assert!(first.updated_time > past);
  assert_eq!(first.created_time, c.created_time);

  let past = backdate(&s, "contacts", c.id).await;
  let second = s.verify_contact(c.id).await.unwrap().unwrap();
  assert!(second.verified);
  assert_eq!(second.status, Status::Enabled);
  assert!(second.updated_time > past);
}

#[tokio::test]
async fn missing_contact_id_returns_none_and_changes_nothing() {
  let s = store().await;
  let c = s.create_contact(jane()).await.unwrap();

  assert!(s.soft_delete_contact(c.id + 100).await.unwrap().is_none());
  assert!(s.verify_contact(c.id + 100).await.unwrap().is_none());

  let listed = s.list_active_contacts().await.unwrap();
  assert_eq!(listed, vec![c]);
}

// ─── Restaurants ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_restaurant_roundtrips_optional_fields() {
  let s = store().await;
  let r = s.create_restaurant(chin_chin()).await.unwrap();

  assert_eq!(r.status, Status::Enabled);
  assert_eq!(r.coordinates, Some(Coordinates { lng: 144.9706, lat: -37.8160 }));
  assert_eq!(r.rating, None);
  assert_eq!(r.review, None);

  let listed = s.list_active_restaurants().await.unwrap();
  assert_eq!(listed, vec![r]);
}

#[tokio::test]
async fn create_restaurant_with_review() {
  let s = store().await;
  let r = s
    .create_restaurant(NewRestaurant {
      rating: Some(5),
      review: Some("Best curry in town".into()),
      ..chin_chin()
    })
    .await
    .unwrap();
  assert_eq!(r.rating, Some(5));
  assert!(r.is_visited());
}

#[tokio::test]
async fn rating_and_review_updates() {
  let s = store().await;
  let r = s.create_restaurant(chin_chin()).await.unwrap();

  let past = backdate(&s, "restaurants", r.id).await;
  let rated = s.update_restaurant_rating(r.id, Some(4)).await.unwrap().unwrap();
  assert_eq!(rated.rating, Some(4));
  assert_eq!(rated.review, None);
  assert!(rated.updated_time > past);
  assert_eq!(rated.created_time, r.created_time);

  let past = backdate(&s, "restaurants", r.id).await;
  let reviewed = s
    .update_restaurant_review(r.id, Some("Loud but worth it".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(reviewed.rating, Some(4));
  assert_eq!(reviewed.review.as_deref(), Some("Loud but worth it"));
  assert!(reviewed.updated_time > past);

  let cleared = s.update_restaurant_review(r.id, None).await.unwrap().unwrap();
  assert_eq!(cleared.review, None);
  assert_eq!(cleared.created_time, r.created_time);
}

#[tokio::test]
async fn rating_outside_range_is_rejected_by_schema() {
  let s = store().await;
  let r = s.create_restaurant(chin_chin()).await.unwrap();
  assert!(s.update_restaurant_rating(r.id, Some(9)).await.is_err());
}

#[tokio::test]
async fn patch_touches_only_present_fields() {
  let s = store().await;
  let r = s.create_restaurant(chin_chin()).await.unwrap();
  let past = backdate(&s, "restaurants", r.id).await;

  let patched = s
    .update_restaurant(r.id, RestaurantPatch {
      name: Some("Chin Chin Melbourne".into()),
      address: Some(None),
      website: Some(Some("chinchin.melbourne".into())),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(patched.name, "Chin Chin Melbourne");
  assert_eq!(patched.address, None);
  assert_eq!(patched.website.as_deref(), Some("chinchin.melbourne"));
  assert_eq!(patched.coordinates, r.coordinates);
  assert_eq!(patched.phone, None);
  assert!(patched.updated_time > past);
  assert_eq!(patched.created_time, r.created_time);
}

#[tokio::test]
async fn empty_patch_only_refreshes_updated_time() {
  let s = store().await;
  let r = s.create_restaurant(chin_chin()).await.unwrap();
  let past = backdate(&s, "restaurants", r.id).await;

  let touched = s
    .update_restaurant(r.id, RestaurantPatch::default())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(touched.name, r.name);
  assert_eq!(touched.address, r.address);
  assert!(touched.updated_time > past);
  assert_eq!(touched.created_time, r.created_time);
}

#[tokio::test]
async fn missing_restaurant_id_returns_none() {
  let s = store().await;
  assert!(s.soft_delete_restaurant(5).await.unwrap().is_none());
  assert!(s.update_restaurant_rating(5, Some(4)).await.unwrap().is_none());
  assert!(s.update_restaurant_review(5, None).await.unwrap().is_none());
  assert!(
    s.update_restaurant(5, RestaurantPatch::default())
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn soft_deleted_restaurant_is_hidden() {
  let s = store().await;
  let r = s.create_restaurant(chin_chin()).await.unwrap();
  let past = backdate(&s, "restaurants", r.id).await;
  let deleted = s.soft_delete_restaurant(r.id).await.unwrap().unwrap();
  assert!(deleted.updated_time > past);
  assert_eq!(deleted.created_time, r.created_time);

  assert!(s.list_active_restaurants().await.unwrap().is_empty());
  assert_eq!(raw_status(&s, "restaurants", r.id).await.as_deref(), Some("DELETED"));
}

// ─── Pool ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn in_memory_store_uses_one_connection() {
  assert_eq!(store().await.pool_size(), 1);
}

#[tokio::test]
async fn file_store_connections_share_one_database() {
  let path = std::env::temp_dir().join(format!(
    "bitebook-pool-{}-{}.db",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));
  let size = NonZeroUsize::new(3).unwrap();
  let s = SqliteStore::open(&path, size).await.unwrap();
  assert_eq!(s.pool_size(), 3);

  // Writes rotate across connections; every read must see all of them.
  for _ in 0..3 {
    s.create_contact(jane()).await.unwrap();
  }
  for _ in 0..3 {
    assert_eq!(s.list_active_contacts().await.unwrap().len(), 3);
  }

  drop(s);
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
