//! A fixed-size set of background SQLite connections.
//!
//! Each [`tokio_rusqlite::Connection`] owns one thread and runs its calls in
//! order. Statements are handed out round-robin; no statement ever needs a
//! particular connection because every repository operation is a single
//! statement.

use std::{
  num::NonZeroUsize,
  path::Path,
  sync::atomic::{AtomicUsize, Ordering},
  time::Duration,
};

use tokio_rusqlite::Connection;

use crate::{Result, schema::SCHEMA};

/// How long a connection waits on a lock held by a sibling connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Pool {
  conns: Vec<Connection>,
  next:  AtomicUsize,
}

impl Pool {
  /// Open `size` connections to the database file at `path`. The schema is
  /// applied on the first connection before the rest are opened.
  pub async fn open(path: &Path, size: NonZeroUsize) -> Result<Self> {
    let mut conns = Vec::with_capacity(size.get());
    for i in 0..size.get() {
      let conn = Connection::open(path).await?;
      configure(&conn, i == 0).await?;
      conns.push(conn);
    }
    tracing::debug!(path = %path.display(), size = conns.len(), "sqlite pool open");
    Ok(Self { conns, next: AtomicUsize::new(0) })
  }

  /// A single in-memory connection. Every in-memory connection is its own
  /// database, so this pool never holds more than one.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory().await?;
    configure(&conn, true).await?;
    Ok(Self { conns: vec![conn], next: AtomicUsize::new(0) })
  }

  pub fn size(&self) -> usize { self.conns.len() }

  /// The next connection in rotation.
  pub fn get(&self) -> &Connection {
    let i = self.next.fetch_add(1, Ordering::Relaxed) % self.conns.len();
    &self.conns[i]
  }
}

async fn configure(conn: &Connection, init_schema: bool) -> Result<()> {
  conn
    .call(move |conn| {
      conn.busy_timeout(BUSY_TIMEOUT)?;
      if init_schema {
        conn.execute_batch(SCHEMA)?;
      }
      Ok(())
    })
    .await?;
  Ok(())
}
