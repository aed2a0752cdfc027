//! Client-local storage
//!
//! `LocalStorage` keeps the submitted request and order history in a JSON
//! file under the user's data directory. `SessionStorage` holds the
//! authenticated flag for the lifetime of the process only.

use crate::state::{RequestKind, RequestRecord};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing local storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode local storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk layout, keyed the same way the browser store was
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLists {
    #[serde(default)]
    pub product_requests: Vec<RequestRecord>,
    #[serde(default)]
    pub product_orders: Vec<RequestRecord>,
}

/// Persistent request/order history
#[derive(Debug, Default)]
pub struct LocalStorage {
    /// `None` keeps everything in memory
    path: Option<PathBuf>,
    lists: StoredLists,
}

impl LocalStorage {
    /// Default storage file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "storefront", "storefront-tui")
            .map(|dirs| dirs.data_dir().join("storage.json"))
    }

    /// Storage that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the storage file, starting empty when it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let lists = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            StoredLists::default()
        };

        tracing::debug!(
            "Loaded {} requests and {} orders from {}",
            lists.product_requests.len(),
            lists.product_orders.len(),
            path.display()
        );

        Ok(Self {
            path: Some(path),
            lists,
        })
    }

    /// Open the storage file, moving an unreadable one aside.
    ///
    /// Returns the storage plus a message for the user when the history had
    /// to be discarded or cannot be used this run.
    pub fn open_or_recover(path: impl AsRef<Path>) -> (Self, Option<String>) {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(storage) => (storage, None),
            Err(StorageError::Parse { source, .. }) => {
                tracing::error!("Local history at {} is corrupt: {source}", path.display());
                let backup = corrupt_backup_path(path);
                let message = match fs::rename(path, &backup) {
                    Ok(()) => {
                        tracing::warn!("Moved corrupt history to {}", backup.display());
                        format!(
                            "Local history was unreadable and has been reset. The old file was kept at {}.",
                            backup.display()
                        )
                    }
                    Err(e) => {
                        tracing::error!("Failed to move {} aside: {e}", path.display());
                        "Local history was unreadable and has been reset.".to_string()
                    }
                };
                let storage = Self {
                    path: Some(path.to_path_buf()),
                    lists: StoredLists::default(),
                };
                (storage, Some(message))
            }
            Err(e) => {
                // Unreadable but maybe intact: keep this run in memory, leave the file alone
                tracing::error!("{e}");
                (
                    Self::in_memory(),
                    Some(format!("Local history is unavailable this session: {e}")),
                )
            }
        }
    }

    pub fn requests(&self) -> &[RequestRecord] {
        &self.lists.product_requests
    }

    pub fn orders(&self) -> &[RequestRecord] {
        &self.lists.product_orders
    }

    /// Append a record to the list matching its kind and persist
    pub fn append(&mut self, record: RequestRecord) -> Result<(), StorageError> {
        match record.kind {
            RequestKind::NewItemRequest => self.lists.product_requests.push(record),
            RequestKind::ProductOrder => self.lists.product_orders.push(record),
        }
        self.save()
    }

    /// Empty both lists and persist
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.lists = StoredLists::default();
        self.save()
    }

    fn save(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.lists)?;

        // Write beside the target, then rename over it
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })
    }
}

/// `storage.json` -> `storage.json.corrupt-<epoch ms>`
fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "storage.json".into());
    name.push(format!(".corrupt-{}", chrono::Utc::now().timestamp_millis()));
    path.with_file_name(name)
}

/// Per-process session flags
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    authenticated: bool,
}

impl SessionStorage {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn set_authenticated(&mut self, value: bool) {
        self.authenticated = value;
    }

    pub fn clear(&mut self) {
        self.authenticated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn record(kind: RequestKind, id: &str) -> RequestRecord {
        RequestRecord {
            kind,
            id: id.to_string(),
            product: "BPC-157".to_string(),
            customer_name: "Jane".to_string(),
            contact_info: "jane@x.com".to_string(),
            quantity: match kind {
                RequestKind::ProductOrder => Some("5".to_string()),
                RequestKind::NewItemRequest => None,
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_routes_by_kind() {
        let mut storage = LocalStorage::in_memory();
        storage
            .append(record(RequestKind::NewItemRequest, "REQ-1"))
            .unwrap();
        storage
            .append(record(RequestKind::ProductOrder, "ORD-2"))
            .unwrap();

        assert_eq!(storage.requests().len(), 1);
        assert_eq!(storage.orders().len(), 1);
        assert_eq!(storage.requests()[0].id, "REQ-1");
        assert_eq!(storage.orders()[0].id, "ORD-2");
    }

    #[test]
    fn test_lists_are_unbounded() {
        let mut storage = LocalStorage::in_memory();
        for i in 0..500 {
            storage
                .append(record(RequestKind::ProductOrder, &format!("ORD-{i}")))
                .unwrap();
        }
        assert_eq!(storage.orders().len(), 500);
    }

    #[test]
    fn test_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = LocalStorage::open(&path).unwrap();
        storage
            .append(record(RequestKind::ProductOrder, "ORD-7"))
            .unwrap();

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.orders().len(), 1);
        assert_eq!(reopened.orders()[0].id, "ORD-7");
        assert!(reopened.requests().is_empty());
    }

    #[test]
    fn test_file_uses_browser_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = LocalStorage::open(&path).unwrap();
        storage
            .append(record(RequestKind::NewItemRequest, "REQ-9"))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("productRequests").is_some());
        assert!(raw.get("productOrders").is_some());
    }

    #[test]
    fn test_clear_empties_both_lists_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = LocalStorage::open(&path).unwrap();
        storage
            .append(record(RequestKind::NewItemRequest, "REQ-1"))
            .unwrap();
        storage
            .append(record(RequestKind::ProductOrder, "ORD-1"))
            .unwrap();
        storage.clear().unwrap();

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.lists, StoredLists::default());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let err = LocalStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn test_corrupt_file_is_moved_aside_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"productOrders": ["#).unwrap();

        let (mut storage, warning) = LocalStorage::open_or_recover(&path);
        assert!(warning.unwrap().contains("reset"));
        assert!(storage.orders().is_empty());
        assert!(!path.exists());

        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("storage.json.corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        let kept = fs::read_to_string(dir.path().join(&backups[0])).unwrap();
        assert_eq!(kept, r#"{"productOrders": ["#);

        // The recovered storage writes a fresh file
        storage
            .append(record(RequestKind::ProductOrder, "ORD-3"))
            .unwrap();
        assert_eq!(LocalStorage::open(&path).unwrap().orders().len(), 1);
    }

    #[test]
    fn test_healthy_file_opens_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let (storage, warning) = LocalStorage::open_or_recover(&path);
        assert!(warning.is_none());
        assert!(storage.requests().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"productRequests": [], "productOrders": []}"#).unwrap();

        let mut storage = LocalStorage::open(&path).unwrap();
        storage
            .append(record(RequestKind::NewItemRequest, "REQ-4"))
            .unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["storage.json".to_string()]);
        assert_eq!(LocalStorage::open(&path).unwrap().requests()[0].id, "REQ-4");
    }

    #[test]
    fn test_session_flag_defaults_to_signed_out() {
        let mut session = SessionStorage::default();
        assert!(!session.is_authenticated());
        session.set_authenticated(true);
        assert!(session.is_authenticated());
        session.clear();
        assert!(!session.is_authenticated());
    }
}
