//! Authentication service.
//!
//! Keeps the session user in a watch channel backed by the `user` key and
//! the account directory under `users`. Passwords are compared in
//! plaintext (see DESIGN.md).

mod error;

pub use error::AuthError;

use emporium_core::{
    Credentials, Email, ProfileUpdate, PublicUser, RegisterRequest, UserId, UserRecord,
};
use tokio::sync::watch;
use tracing::{info, instrument};

use crate::db::{RepositoryError, SessionRepository, UserRepository};
use crate::storage::SharedStore;

/// Authentication service.
///
/// Handles registration, login, logout and profile edits.
pub struct AuthService {
    store: SharedStore,
    session: watch::Sender<Option<PublicUser>>,
}

impl AuthService {
    /// Create the service, restoring any persisted session.
    #[must_use]
    pub fn load(store: SharedStore) -> Self {
        let current = SessionRepository::new(store.as_ref()).load();
        let (session, _) = watch::channel(current);
        Self { store, session }
    }

    fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self.store.as_ref())
    }

    fn sessions(&self) -> SessionRepository<'_> {
        SessionRepository::new(self.store.as_ref())
    }

    /// Persist and publish a new session user.
    fn start_session(&self, user: PublicUser) -> PublicUser {
        self.sessions().save(&user);
        self.session.send_replace(Some(user.clone()));
        user
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<PublicUser> {
        self.session.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Receive every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<PublicUser>> {
        self.session.subscribe()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingField` if the password is empty.
    /// Returns `AuthError::DuplicateEmail` if the email is already registered.
    #[instrument(skip(self))]
    pub async fn register(&self, request: RegisterRequest) -> Result<PublicUser, AuthError> {
        let email = Email::parse(&request.email)?;
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let record = UserRecord {
            id: UserId::generate(),
            name: UserRecord::compose_name(&request.first_name, &request.last_name),
            email,
            password: request.password,
        };
        let user = record.public();

        self.users().create(record).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::DuplicateEmail,
            other => AuthError::Repository(other),
        })?;

        info!(user_id = %user.id, "Registered new account");
        Ok(self.start_session(user))
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account has the email.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    #[instrument(skip(self))]
    pub async fn login(&self, credentials: Credentials) -> Result<PublicUser, AuthError> {
        let email = Email::parse(&credentials.email)?;
        let record = self
            .users()
            .get_by_email(&email)?
            .ok_or(AuthError::UserNotFound)?;

        if record.password != credentials.password {
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %record.id, "Signed in");
        Ok(self.start_session(record.public()))
    }

    /// End the session. Signing out while signed out is a no-op.
    pub async fn logout(&self) {
        self.sessions().clear();
        self.session.send_if_modified(|session| session.take().is_some());
    }

    /// Edit the signed-in user's profile and refresh the session.
    ///
    /// Unset fields are kept; an empty password keeps the current password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session.
    /// Returns `AuthError::MissingField` if the name is set but blank.
    /// Returns `AuthError::DuplicateEmail` if another account has the new email.
    #[instrument(skip(self))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<PublicUser, AuthError> {
        let current = self.current_user().ok_or(AuthError::NotAuthenticated)?;

        let name = match update.name {
            Some(name) if name.trim().is_empty() => return Err(AuthError::MissingField("name")),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        let email = update.email.as_deref().map(Email::parse).transpose()?;
        let password = update.password.filter(|password| !password.is_empty());

        let users = self.users();
        let mut record = users
            .get_by_id(&current.id)?
            .ok_or(AuthError::UserNotFound)?;
        record.apply(name, email, password);
        let user = record.public();

        users.update(record).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::DuplicateEmail,
            RepositoryError::NotFound => AuthError::UserNotFound,
            other => AuthError::Repository(other),
        })?;

        info!(user_id = %user.id, "Updated profile");
        Ok(self.start_session(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: "analytical".to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::load(store.clone());

        let user = auth.register(request("a@x.com")).await.unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(auth.current_user(), Some(user.clone()));

        let persisted = store.get(keys::USER).unwrap().unwrap();
        assert!(persisted.contains("a@x.com"));
        assert!(!persisted.contains("analytical"));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::load(store.clone());
        auth.register(request("a@x.com")).await.unwrap();

        let err = auth.register(request("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(err.to_string(), "Email is already registered");
        assert_eq!(UserRepository::new(store.as_ref()).list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let auth = AuthService::load(Arc::new(MemoryStore::new()));
        assert!(matches!(
            auth.register(request("not-an-email")).await,
            Err(AuthError::InvalidEmail(_))
        ));

        let mut blank = request("a@x.com");
        blank.password = String::new();
        assert!(matches!(
            auth.register(blank).await,
            Err(AuthError::MissingField("password"))
        ));
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_errors_and_success() {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::load(store);
        auth.register(request("a@x.com")).await.unwrap();
        auth.logout().await;

        assert!(matches!(
            auth.login(credentials("b@x.com", "analytical")).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            auth.login(credentials("a@x.com", "wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!auth.is_authenticated());

        let user = auth
            .login(credentials("a@x.com", "analytical"))
            .await
            .unwrap();
        assert_eq!(user.email.as_str(), "a@x.com");
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_session_survives_reload_until_logout() {
        let store = Arc::new(MemoryStore::new());
        let first = AuthService::load(store.clone());
        let user = first.register(request("a@x.com")).await.unwrap();

        let second = AuthService::load(store.clone());
        assert_eq!(second.current_user(), Some(user));

        second.logout().await;
        assert!(AuthService::load(store).current_user().is_none());
    }

    #[tokio::test]
    async fn test_update_profile_requires_session() {
        let auth = AuthService::load(Arc::new(MemoryStore::new()));
        let err = auth
            .update_profile(ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_update_profile_merges_and_refreshes_session() {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::load(store.clone());
        auth.register(request("b@x.com")).await.unwrap();
        auth.logout().await;
        auth.register(request("a@x.com")).await.unwrap();

        let err = auth
            .update_profile(ProfileUpdate {
                email: Some("b@x.com".to_string()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));

        let user = auth
            .update_profile(ProfileUpdate {
                name: Some("Ada King".to_string()),
                email: Some("ada@x.com".to_string()),
                password: Some(String::new()),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Ada King");
        assert_eq!(auth.current_user(), Some(user));

        auth.logout().await;
        auth.login(credentials("ada@x.com", "analytical"))
            .await
            .unwrap();
    }
}
