//! # Identity Repository
//!
//! Owns the credential table: a map from generated user id to the stored
//! credential record, persisted as one serialized blob. This repository is
//! the only writer of that key.

use qb_core::codec;
use qb_core::error::{AppError, Result};
use qb_core::models::{CredentialRecord, ProfilePatch, UserCredential};
use qb_core::traits::DurableStore;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Storage key for the credential table.
pub const USERS_KEY: &str = "blog-app-users";

pub struct IdentityRepository {
    store: Arc<dyn DurableStore>,
}

impl IdentityRepository {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    /// Loads the full table. An absent key is an empty table; a corrupt
    /// blob is logged and reset to empty (the defined fallback).
    fn load(&self) -> HashMap<Uuid, CredentialRecord> {
        let Some(raw) = self.store.get(USERS_KEY) else {
            return HashMap::new();
        };
        match codec::decode(USERS_KEY, &raw) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("resetting credential table: {e}");
                self.store.remove(USERS_KEY);
                HashMap::new()
            }
        }
    }

    /// Writes the full table back. Called before every mutating operation
    /// returns, so no mutation is ever partially applied.
    fn save(&self, table: &HashMap<Uuid, CredentialRecord>) -> Result<()> {
        let raw = codec::encode(table)?;
        self.store.set(USERS_KEY, &raw);
        Ok(())
    }

    /// Case-insensitive email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<UserCredential> {
        let needle = email.to_lowercase();
        self.load()
            .into_iter()
            .find(|(_, record)| record.email.to_lowercase() == needle)
            .map(|(id, record)| record.into_credential(id))
    }

    /// Inserts a new credential. Fails with `EmailInUse` if any existing
    /// credential already has the email (case-insensitive).
    pub fn insert(&self, credential: &UserCredential) -> Result<()> {
        let mut table = self.load();
        let needle = credential.email.to_lowercase();
        if table
            .values()
            .any(|record| record.email.to_lowercase() == needle)
        {
            return Err(AppError::EmailInUse);
        }
        table.insert(credential.id, CredentialRecord::from(credential));
        self.save(&table)
    }

    /// Merges only the provided patch fields into the stored credential.
    pub fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<UserCredential> {
        let mut table = self.load();
        let record = table.get_mut(&id).ok_or(AppError::UserNotFound)?;
        if let Some(name) = &patch.name {
            record.name = name.clone();
        }
        if let Some(picture) = &patch.profile_picture {
            record.profile_picture = Some(picture.clone());
        }
        let updated = record.clone().into_credential(id);
        self.save(&table)?;
        Ok(updated)
    }

    /// Case-insensitive email match AND exact password match.
    /// Plaintext comparison by design; see DESIGN.md.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Option<UserCredential> {
        let needle = email.to_lowercase();
        self.load()
            .into_iter()
            .find(|(_, record)| {
                record.email.to_lowercase() == needle && record.password == password
            })
            .map(|(id, record)| record.into_credential(id))
    }

    /// Overwrites the password of the credential matching `email`
    /// (case-insensitive). Used by the password-reset flow.
    pub fn set_password(&self, email: &str, new_password: &str) -> Result<()> {
        let mut table = self.load();
        let needle = email.to_lowercase();
        let record = table
            .values_mut()
            .find(|record| record.email.to_lowercase() == needle)
            .ok_or(AppError::UserNotFound)?;
        record.password = new_password.to_string();
        self.save(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qb_store_memory::MemoryStore;

    fn repo() -> IdentityRepository {
        IdentityRepository::new(Arc::new(MemoryStore::new()))
    }

    fn alice() -> UserCredential {
        UserCredential {
            id: Uuid::now_v7(),
            name: "Alice".into(),
            email: "Alice@Example.com".into(),
            password: "pw1".into(),
            profile_picture: None,
        }
    }

    #[test]
    fn test_insert_rejects_case_variant_duplicate() {
        let repo = repo();
        repo.insert(&alice()).unwrap();

        let mut dup = alice();
        dup.id = Uuid::now_v7();
        dup.email = "ALICE@example.COM".into();
        assert!(matches!(repo.insert(&dup), Err(AppError::EmailInUse)));

        // The table retains exactly one entry for the email.
        assert!(repo.find_by_email("alice@example.com").is_some());
    }

    #[test]
    fn test_verify_credentials_requires_exact_password() {
        let repo = repo();
        repo.insert(&alice()).unwrap();

        assert!(repo.verify_credentials("alice@example.com", "pw1").is_some());
        assert!(repo.verify_credentials("alice@example.com", "PW1").is_none());
        assert!(repo.verify_credentials("alice@example.com", "pw2").is_none());
    }

    #[test]
    fn test_update_merges_only_provided_fields() {
        let repo = repo();
        let cred = alice();
        repo.insert(&cred).unwrap();

        let patch = ProfilePatch {
            name: Some("Alice B.".into()),
            profile_picture: None,
        };
        let updated = repo.update(cred.id, &patch).unwrap();
        assert_eq!(updated.name, "Alice B.");
        assert_eq!(updated.email, cred.email);
        assert_eq!(updated.password, cred.password);
        assert_eq!(updated.profile_picture, None);
    }

    #[test]
    fn test_update_unknown_id_is_user_not_found() {
        let repo = repo();
        let err = repo.update(Uuid::now_v7(), &ProfilePatch::default()).unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[test]
    fn test_corrupt_table_resets_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(USERS_KEY, "{definitely not json");
        let repo = IdentityRepository::new(store.clone());

        assert!(repo.find_by_email("anyone@example.com").is_none());
        // Insert works after the reset.
        repo.insert(&alice()).unwrap();
        assert!(repo.find_by_email("alice@example.com").is_some());
    }
}
