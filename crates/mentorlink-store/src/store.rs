//! Connection manager for the libSQL database.
//!
//! A [`Store`] is opened once at process start and shared by every request.
//! Each operation draws its own [`libsql::Connection`] from it, so requests
//! never contend on a shared connection handle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libsql::Builder;
use tracing::{debug, info};

use crate::error::{Result, RosterError};

/// How long a local connection waits on a locked database, in milliseconds.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// URL schemes that select a remote libSQL server.
const REMOTE_SCHEMES: [&str; 3] = ["libsql://", "https://", "http://"];

/// Where the database lives.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A database file on local disk.
    Local(PathBuf),
    /// A remote libSQL server.
    Remote {
        /// Server URL (e.g. `libsql://roster.example.io`).
        url: String,
        /// Auth token sent with every request.
        auth_token: String,
    },
}

impl StoreLocation {
    /// Derives a location from a connection string.
    ///
    /// `libsql://`, `https://` and `http://` URLs are remote; anything else
    /// is a local path, with an optional `file:` prefix stripped.
    #[must_use]
    pub fn from_url(url: &str, auth_token: Option<&str>) -> Self {
        if REMOTE_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            return Self::Remote {
                url: url.to_string(),
                auth_token: auth_token.unwrap_or_default().to_string(),
            };
        }
        let path = url.strip_prefix("file:").unwrap_or(url);
        Self::Local(PathBuf::from(path))
    }

    /// Returns `true` for a local database file.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

// The auth token never reaches logs.
impl fmt::Debug for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => f.debug_tuple("Local").field(path).finish(),
            Self::Remote { url, .. } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("auth_token", &"<redacted>")
                .finish(),
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote { url, .. } => write!(f, "{url}"),
        }
    }
}

/// Shared handle to the mentorlink database.
///
/// Cloning is cheap; all clones refer to the same underlying database.
#[derive(Clone)]
pub struct Store {
    db: Arc<libsql::Database>,
    location: StoreLocation,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Opens the database at `location` and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::StoreUnavailable` if the database cannot be
    /// opened, or `RosterError::Migration` if the schema cannot be applied.
    pub async fn open(location: StoreLocation) -> Result<Self> {
        let db = match &location {
            StoreLocation::Local(path) => Builder::new_local(path).build().await?,
            StoreLocation::Remote { url, auth_token } => {
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await?
            }
        };

        let store = Self {
            db: Arc::new(db),
            location,
        };

        let conn = store.connect().await?;
        if store.location.is_local() {
            pragma(&conn, "PRAGMA journal_mode = WAL").await?;
        }
        crate::migrations::run(&conn).await?;

        info!(location = %store.location, "Store opened");
        Ok(store)
    }

    /// Opens a local database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// See [`Store::open`].
    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(StoreLocation::Local(path.as_ref().to_path_buf())).await
    }

    /// Where this store is connected.
    #[must_use]
    pub const fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Opens a fresh connection with per-connection settings applied.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::StoreUnavailable` if the connection cannot be
    /// established.
    pub async fn connect(&self) -> Result<libsql::Connection> {
        let conn = self.db.connect()?;
        if self.location.is_local() {
            // Both settings are per-connection in SQLite.
            pragma(&conn, "PRAGMA foreign_keys = ON").await?;
            pragma(&conn, &format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}")).await?;
        }
        Ok(conn)
    }

    /// Round-trips a trivial query to confirm the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::StoreUnavailable` if the query fails.
    pub async fn ping(&self) -> Result<()> {
        let conn = self.connect().await?;
        let mut rows = conn.query("SELECT 1", ()).await?;
        rows.next()
            .await?
            .ok_or_else(|| RosterError::invalid_record("ping", "no row returned"))?;
        debug!("Store ping ok");
        Ok(())
    }

    /// Releases this handle.
    ///
    /// The database closes once the last clone is gone; callers invoke this
    /// after the server has drained so the teardown is visible in the logs.
    pub fn close(self) {
        let remaining = Arc::strong_count(&self.db) - 1;
        info!(location = %self.location, remaining, "Store closed");
    }
}

/// Runs a PRAGMA, draining whatever row it reports back.
async fn pragma(conn: &libsql::Connection, sql: &str) -> Result<()> {
    let mut rows = conn.query(sql, ()).await?;
    while rows.next().await?.is_some() {}
    Ok(())
}
