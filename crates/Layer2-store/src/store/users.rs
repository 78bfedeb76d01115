//! User accounts and the login session
//!
//! Passwords are stored and compared as plain text; this layer provides no
//! credential security.

use super::LocalRecordStore;
use crate::coerce::IntoRecordId;
use crate::model::{PublicUser, RegisterUser, Session, User, UsersEnvelope};
use maison_foundation::{time, Error, KeyValueStorage, Result, SESSION_KEY};
use tracing::{debug, info, warn};

impl<S: KeyValueStorage> LocalRecordStore<S> {
    /// Create an account. The email is stored lowercased.
    ///
    /// Fails with [`Error::DuplicateEmail`] if the email is taken, ignoring
    /// case. The returned record still carries the password.
    pub fn register_user(&self, form: RegisterUser) -> Result<User> {
        let mut envelope = self.load::<UsersEnvelope>()?;
        if envelope.find_by_email(&form.email).is_some() {
            debug!("Registration rejected, email already in use");
            return Err(Error::DuplicateEmail);
        }

        let now = time::now_iso();
        let user = User {
            id: envelope.next_id()?,
            full_name: form.full_name,
            email: form.email.to_lowercase(),
            password: form.password,
            created_at: now.clone(),
            updated_at: now.clone(),
        };

        envelope.users.push(user.clone());
        envelope.touch(&now);
        self.save(&envelope)?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Check credentials and open a session, replacing any previous one.
    /// `Ok(None)` when no account matches.
    pub fn login_user(&self, email: &str, password: &str) -> Result<Option<PublicUser>> {
        let envelope = self.load::<UsersEnvelope>()?;
        let Some(user) = envelope
            .users
            .iter()
            .find(|u| u.has_email(email) && u.password == password)
        else {
            debug!("Login rejected");
            return Ok(None);
        };

        let session = Session::for_user(user, time::now_iso());
        self.write_slot(SESSION_KEY, &session)?;

        info!("User {} logged in", user.id);
        Ok(Some(user.into()))
    }

    /// Drop the session. No-op when nobody is logged in.
    pub fn logout_user(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY)?;
        debug!("Session cleared");
        Ok(())
    }

    /// The logged-in user, or `None`.
    ///
    /// A session that cannot be parsed or that points at a user who no
    /// longer exists is deleted on the way out.
    pub fn get_current_user(&self) -> Option<PublicUser> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match self.resolve_session(&raw) {
            Ok(Some(user)) => Some(user.into()),
            Ok(None) => {
                self.discard_session("user no longer exists");
                None
            }
            Err(e) => {
                self.discard_session(&e.to_string());
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_current_user().is_some()
    }

    pub fn get_user_by_id(&self, id: impl IntoRecordId) -> Result<Option<PublicUser>> {
        let envelope = self.load::<UsersEnvelope>()?;
        Ok(id
            .into_record_id()
            .and_then(|id| envelope.find(id))
            .map(PublicUser::from))
    }

    fn resolve_session(&self, raw: &str) -> Result<Option<User>> {
        let session: Session =
            serde_json::from_str(raw).map_err(|e| Error::corrupted(SESSION_KEY, e))?;
        let envelope = self.load::<UsersEnvelope>()?;
        Ok(envelope.find(session.user_id).cloned())
    }

    fn discard_session(&self, reason: &str) {
        warn!("Discarding session: {}", reason);
        if let Err(e) = self.logout_user() {
            warn!("Failed to clear session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maison_foundation::{MemoryStorage, USERS_KEY};

    fn store() -> LocalRecordStore<MemoryStorage> {
        LocalRecordStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_register_lowercases_and_keeps_password() {
        let store = store();
        let user = store
            .register_user(RegisterUser::new("Anne", "Anne@Example.FR", "pw"))
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "anne@example.fr");
        assert_eq!(user.password, "pw");
    }

    #[test]
    fn test_duplicate_email_ignores_case() {
        let store = store();
        store
            .register_user(RegisterUser::new("A", "A@x.com", "1"))
            .unwrap();
        let err = store
            .register_user(RegisterUser::new("B", "a@x.com", "2"))
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateEmail));
        let users: UsersEnvelope = store.read_slot(USERS_KEY).unwrap().unwrap();
        assert_eq!(users.users.len(), 1);
        assert_eq!(users.last_user_id, 1);
    }

    #[test]
    fn test_login_requires_exact_password() {
        let store = store();
        store
            .register_user(RegisterUser::new("A", "a@x.com", "Secret"))
            .unwrap();

        assert!(store.login_user("a@x.com", "secret").unwrap().is_none());
        assert!(!store.is_logged_in());

        let user = store.login_user("A@X.COM", "Secret").unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert!(store.is_logged_in());
    }

    #[test]
    fn test_unparsable_session_heals() {
        let store = store();
        store.storage().set(SESSION_KEY, "not json").unwrap();

        assert!(store.get_current_user().is_none());
        assert!(!store.storage().contains(SESSION_KEY).unwrap());
    }

    #[test]
    fn test_get_user_by_id_strips_password() {
        let store = store();
        store
            .register_user(RegisterUser::new("A", "a@x.com", "pw"))
            .unwrap();

        let user = store.get_user_by_id("1").unwrap().unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(store.get_user_by_id(2).unwrap().is_none());
    }
}
