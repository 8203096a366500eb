//! In-process settings store.

use homescreen_core::{SettingsStore, StoreError, UserId, UserSettings};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A settings store kept in memory for the lifetime of the process.
///
/// Updates are applied to a copy and committed whole, so a panicking update
/// leaves the previous record in place and the store usable.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    records: RwLock<HashMap<UserId, UserSettings>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a record.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no user has a record.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, UserSettings>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, UserSettings>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, user_id: UserId) -> Result<Option<UserSettings>, StoreError> {
        Ok(self.read().get(&user_id).cloned())
    }

    fn store(&self, user_id: UserId, settings: UserSettings) -> Result<(), StoreError> {
        self.write().insert(user_id, settings);
        Ok(())
    }

    fn modify(
        &self,
        user_id: UserId,
        update: &mut dyn FnMut(&mut UserSettings),
    ) -> Result<UserSettings, StoreError> {
        let mut records = self.write();
        let mut record = records.get(&user_id).cloned().unwrap_or_default();
        update(&mut record);
        records.insert(user_id, record.clone());
        Ok(record)
    }
}
