//! User directory repository.

use emporium_core::{Email, UserId, UserRecord};

use super::RepositoryError;
use crate::storage::{self, KeyValueStore, keys};

/// Repository for the user directory.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All registered users in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the directory cannot be decoded.
    pub fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        Ok(storage::load(self.store, keys::USERS)?.unwrap_or_default())
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|user| &user.email == email))
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read.
    pub fn get_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|user| &user.id == id))
    }

    /// Append a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub fn create(&self, user: UserRecord) -> Result<(), RepositoryError> {
        let mut users = self.list()?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        users.push(user);
        storage::save(self.store, keys::USERS, &users)?;
        Ok(())
    }

    /// Replace the record with the same ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    /// Returns `RepositoryError::Conflict` if another user already has the email.
    pub fn update(&self, user: UserRecord) -> Result<(), RepositoryError> {
        let mut users = self.list()?;
        if users
            .iter()
            .any(|existing| existing.email == user.email && existing.id != user.id)
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = user;
        storage::save(self.store, keys::USERS, &users)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn user(id: &str, email: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            name: "Test User".to_string(),
            email: Email::parse(email).unwrap(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_empty_directory() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(user("u1", "a@x.com")).unwrap();

        let err = repo.create(user("u2", "a@x.com")).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_lookup_by_email_and_id() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(user("u1", "a@x.com")).unwrap();
        repo.create(user("u2", "b@x.com")).unwrap();

        let email = Email::parse("b@x.com").unwrap();
        assert_eq!(repo.get_by_email(&email).unwrap().unwrap().id.as_str(), "u2");
        assert!(repo.get_by_id(&UserId::new("u1")).unwrap().is_some());
        assert!(repo.get_by_id(&UserId::new("u3")).unwrap().is_none());
    }

    #[test]
    fn test_update_keeps_own_email_but_rejects_others() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        repo.create(user("u1", "a@x.com")).unwrap();
        repo.create(user("u2", "b@x.com")).unwrap();

        let mut renamed = user("u1", "a@x.com");
        renamed.name = "Renamed".to_string();
        repo.update(renamed).unwrap();
        assert_eq!(repo.list().unwrap()[0].name, "Renamed");

        let err = repo.update(user("u1", "b@x.com")).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let err = repo.update(user("u9", "z@x.com")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn test_corrupt_directory_is_reported() {
        let store = MemoryStore::new();
        store.set(keys::USERS, "not json").unwrap();
        let err = UserRepository::new(&store).list().unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
