use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use bitebook_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{ServerConfig, app, expand_tilde};

fn temp_config(contents: &str) -> PathBuf {
  let path = std::env::temp_dir().join(format!(
    "bitebook-server-{}-{:?}.toml",
    std::process::id(),
    std::thread::current().id(),
  ));
  std::fs::write(&path, contents).unwrap();
  path
}

#[test]
fn missing_config_file_uses_defaults() {
  let cfg = ServerConfig::load(&PathBuf::from("/nonexistent/bitebook.toml")).unwrap();
  assert_eq!(cfg.host, "0.0.0.0");
  assert_eq!(cfg.port, 3000);
  assert_eq!(cfg.store_path, PathBuf::from("bitebook.db"));
  assert_eq!(cfg.pool_size, NonZeroUsize::new(4).unwrap());
  assert_eq!(cfg.address(), "0.0.0.0:3000");
}

#[test]
fn config_file_overrides_defaults() {
  let path = temp_config("port = 8080\npool_size = 2\nstore_path = \"~/bitebook.db\"\n");
  let cfg = ServerConfig::load(&path).unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(cfg.host, "0.0.0.0");
  assert_eq!(cfg.port, 8080);
  assert_eq!(cfg.pool_size.get(), 2);
  assert_eq!(cfg.store_path, PathBuf::from("~/bitebook.db"));
}

#[test]
fn zero_pool_size_is_rejected() {
  let path = temp_config("pool_size = 0\n");
  let result = ServerConfig::load(&path);
  std::fs::remove_file(&path).ok();
  assert!(result.is_err());
}

#[test]
fn tilde_expands_to_home() {
  let Ok(home) = std::env::var("HOME") else { return };
  assert_eq!(
    expand_tilde(&PathBuf::from("~/data/bitebook.db")),
    PathBuf::from(home).join("data/bitebook.db"),
  );
  assert_eq!(
    expand_tilde(&PathBuf::from("/var/lib/bitebook.db")),
    PathBuf::from("/var/lib/bitebook.db"),
  );
}

#[tokio::test]
async fn app_answers_cross_origin_requests() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let req = Request::builder()
    .method("GET")
    .uri("/restaurants")
    .header(header::ORIGIN, "http://localhost:5173")
    .body(Body::empty())
    .unwrap();

  let resp = app(store).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn unknown_route_is_404() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let req = Request::builder().uri("/nope").body(Body::empty()).unwrap();
  let resp = app(store).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
