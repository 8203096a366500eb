//! Settings store persisted as a JSON document.
//!
//! The document maps user ids to their records. Writes are serialized by a
//! writer lock: the updated document is persisted by writing a temporary file
//! next to it and renaming it over the document, and only then committed to
//! the in-memory map. Readers never wait on disk I/O, and a write whose
//! persistence fails leaves memory untouched.

use homescreen_core::{SettingsStore, StoreError, UserId, UserSettings};
use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tempfile::NamedTempFile;

type Records = BTreeMap<UserId, UserSettings>;

/// A settings store backed by a JSON file.
///
/// # Lifecycle
///
/// Open it at process start with [`open`](Self::open) and hand it to the
/// engine; [`close`](Self::close) (or the engine's shutdown) flushes it.
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    records: RwLock<Records>,
    writer: Mutex<()>,
}

impl JsonFileSettingsStore {
    /// Open the store, loading the document if it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Records::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Records::new(),
            Err(err) => return Err(err.into()),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), users = records.len(), "opened settings store");

        Ok(Self::with_records(path, records))
    }

    fn with_records(path: PathBuf, records: Records) -> Self {
        Self {
            path,
            records: RwLock::new(records),
            writer: Mutex::new(()),
        }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and release the store.
    pub fn close(self) -> Result<(), StoreError> {
        self.flush()
    }

    // Records are only replaced after a successful persist, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Records> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Records> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn serialize_writes(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, records: &Records) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(records)?)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(io::Error::from)?;
        Ok(())
    }

    // Apply `change` to a copy, persist the resulting document, then commit.
    fn write_through(
        &self,
        user_id: UserId,
        change: impl FnOnce(&mut UserSettings),
    ) -> Result<UserSettings, StoreError> {
        let _writer = self.serialize_writes();

        let mut snapshot = self.read().clone();
        let record = snapshot.entry(user_id).or_default();
        change(record);
        let written = record.clone();

        self.persist(&snapshot)?;
        self.write().insert(user_id, written.clone());
        Ok(written)
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self, user_id: UserId) -> Result<Option<UserSettings>, StoreError> {
        Ok(self.read().get(&user_id).cloned())
    }

    fn store(&self, user_id: UserId, settings: UserSettings) -> Result<(), StoreError> {
        self.write_through(user_id, |record| *record = settings)
            .map(|_| ())
    }

    fn modify(
        &self,
        user_id: UserId,
        update: &mut dyn FnMut(&mut UserSettings),
    ) -> Result<UserSettings, StoreError> {
        self.write_through(user_id, |record| update(record))
    }

    fn flush(&self) -> Result<(), StoreError> {
        let _writer = self.serialize_writes();
        let snapshot = self.read().clone();
        self.persist(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.load(UserId::new_v4()).unwrap(), None);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let user = UserId::new_v4();
        let settings = UserSettings::new()
            .with_feature_enabled(true)
            .with_section("LatestShows")
            .with_section("MyMedia");

        let store = JsonFileSettingsStore::open(&path).unwrap();
        store.store(user, settings.clone()).unwrap();
        store.close().unwrap();

        let reopened = JsonFileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.load(user).unwrap(), Some(settings));
    }

    #[test]
    fn corrupt_document_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"{ not json").unwrap();

        let err = JsonFileSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn failed_persist_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // The document path is a directory, so the final rename fails.
        let path = dir.path().join("settings.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        let store = JsonFileSettingsStore::with_records(path.clone(), Records::new());
        let user = UserId::new_v4();
        assert!(store.store(user, UserSettings::new().with_feature_enabled(true)).is_err());
        assert_eq!(store.load(user).unwrap(), None);
    }

    #[test]
    fn modify_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let user = UserId::new_v4();

        let store = JsonFileSettingsStore::open(&path).unwrap();
        store.modify(user, &mut |s| s.feature_enabled = true).unwrap();

        let on_disk: Records = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert!(on_disk[&user].feature_enabled);
    }

    #[test]
    fn concurrent_writers_for_one_user_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = Arc::new(JsonFileSettingsStore::open(&path).unwrap());
        let user = UserId::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .modify(user, &mut |s| s.enabled_sections.push(format!("S{i}")))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load(user).unwrap().unwrap().enabled_sections.len(), 8);

        let reopened = JsonFileSettingsStore::open(&path).unwrap();
        let mut sections = reopened.load(user).unwrap().unwrap().enabled_sections;
        sections.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("S{i}")).collect();
        assert_eq!(sections, expected);
    }

    #[test]
    fn panicking_update_leaves_store_usable() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileSettingsStore::open(dir.path().join("settings.json")).unwrap());
        let (a, b) = (UserId::new_v4(), UserId::new_v4());
        store.store(a, UserSettings::new().with_section("MyMedia")).unwrap();
        store.store(b, UserSettings::new().with_feature_enabled(true)).unwrap();

        let panicking = Arc::clone(&store);
        let outcome = thread::spawn(move || {
            panicking.modify(a, &mut |s| {
                s.enabled_sections.clear();
                panic!("update failed");
            })
        })
        .join();
        assert!(outcome.is_err());

        assert_eq!(
            store.load(a).unwrap(),
            Some(UserSettings::new().with_section("MyMedia"))
        );
        assert!(store.load(b).unwrap().unwrap().feature_enabled);
        store.store(b, UserSettings::new()).unwrap();
    }
}
