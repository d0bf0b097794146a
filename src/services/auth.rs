//! Mock merchant authentication held in an explicit session object.
//!
//! [`AuthSession::init`] restores the signed-in user from a
//! [`SessionStorage`]; every sign-in writes the user back, and
//! [`AuthSession::logout`] clears it. No credentials are checked.

use thiserror::Error;

use crate::domain::session::SessionUser;
use crate::domain::types::{ImageUrl, UserEmail, UserId, UserName};
use crate::forms::auth::{LoginFormPayload, OtpFormPayload, RegisterFormPayload};

use super::{ServiceError, ServiceResult};

#[derive(Debug, Error)]
#[error("session storage failed: {0}")]
pub struct SessionStorageError(pub String);

/// Where the signed-in user is remembered between requests.
pub trait SessionStorage {
    /// Return the stored user; unreadable entries are errors.
    fn load_user(&self) -> Result<Option<SessionUser>, SessionStorageError>;
    fn save_user(&self, user: &SessionUser) -> Result<(), SessionStorageError>;
    fn clear_user(&self);
}

fn avatar_url(id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={id}")
}

pub struct AuthSession<S: SessionStorage> {
    storage: S,
    user: Option<SessionUser>,
}

impl<S: SessionStorage> AuthSession<S> {
    /// Restore the session from `storage`.
    ///
    /// A corrupt entry is logged, removed and treated as signed out.
    pub fn init(storage: S) -> Self {
        let user = match storage.load_user() {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Discarding unreadable session user: {e}");
                storage.clear_user();
                None
            }
        };
        Self { storage, user }
    }

    /// Release the session and hand the storage back.
    pub fn teardown(self) -> S {
        self.storage
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> ServiceResult<&SessionUser> {
        self.user.as_ref().ok_or(ServiceError::Unauthorized)
    }

    fn sign_in(&mut self, user: SessionUser) -> ServiceResult<&SessionUser> {
        if let Err(e) = self.storage.save_user(&user) {
            log::error!("Failed to store session user: {e}");
            return Err(ServiceError::Internal);
        }
        log::info!("User {} signed in", user.id);
        Ok(&*self.user.insert(user))
    }

    fn mock_user(id: &str, name: UserName, email: UserEmail) -> ServiceResult<SessionUser> {
        Ok(SessionUser {
            id: UserId::new(id)?,
            name,
            email,
            avatar: Some(ImageUrl::new(avatar_url(id))?),
        })
    }

    pub fn login(&mut self, payload: LoginFormPayload) -> ServiceResult<&SessionUser> {
        let user = Self::mock_user("123", UserName::new("Demo User")?, payload.email)?;
        self.sign_in(user)
    }

    pub fn register(&mut self, payload: RegisterFormPayload) -> ServiceResult<&SessionUser> {
        let user = Self::mock_user("123", payload.name, payload.email)?;
        self.sign_in(user)
    }

    pub fn login_with_google(&mut self) -> ServiceResult<&SessionUser> {
        let user = Self::mock_user(
            "456",
            UserName::new("Google User")?,
            UserEmail::new("google@example.com")?,
        )?;
        self.sign_in(user)
    }

    pub fn login_with_otp(&mut self, payload: OtpFormPayload) -> ServiceResult<&SessionUser> {
        let email = UserEmail::new(format!("{}@user.com", payload.phone))?;
        let user = Self::mock_user("789", UserName::new("OTP User")?, email)?;
        self.sign_in(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("User {} signed out", user.id);
        }
        self.storage.clear_user();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// In-memory storage mirroring the cookie session.
    #[derive(Default)]
    struct MemoryStorage {
        user: RefCell<Option<SessionUser>>,
        corrupt: RefCell<bool>,
        fail_writes: bool,
    }

    impl SessionStorage for MemoryStorage {
        fn load_user(&self) -> Result<Option<SessionUser>, SessionStorageError> {
            if *self.corrupt.borrow() {
                return Err(SessionStorageError("invalid json".into()));
            }
            Ok(self.user.borrow().clone())
        }

        fn save_user(&self, user: &SessionUser) -> Result<(), SessionStorageError> {
            if self.fail_writes {
                return Err(SessionStorageError("storage full".into()));
            }
            *self.user.borrow_mut() = Some(user.clone());
            Ok(())
        }

        fn clear_user(&self) {
            *self.corrupt.borrow_mut() = false;
            *self.user.borrow_mut() = None;
        }
    }

    fn login_payload() -> LoginFormPayload {
        LoginFormPayload {
            email: UserEmail::new("awa@example.com").unwrap(),
        }
    }

    #[test]
    fn login_persists_user_across_sessions() {
        let mut session = AuthSession::init(MemoryStorage::default());
        assert!(!session.is_authenticated());

        let user = session.login(login_payload()).unwrap();
        assert_eq!(user.id.as_str(), "123");
        assert_eq!(user.name.as_str(), "Demo User");
        assert_eq!(user.email.as_str(), "awa@example.com");

        let restored = AuthSession::init(session.teardown());
        assert!(restored.is_authenticated());
        assert_eq!(restored.user().unwrap().email.as_str(), "awa@example.com");
    }

    #[test]
    fn corrupt_entry_is_treated_as_signed_out() {
        let storage = MemoryStorage::default();
        *storage.corrupt.borrow_mut() = true;

        let session = AuthSession::init(storage);

        assert!(!session.is_authenticated());
        assert_eq!(session.require_user().unwrap_err(), ServiceError::Unauthorized);
        assert!(!*session.teardown().corrupt.borrow());
    }

    #[test]
    fn mock_providers_use_fixed_identities() {
        let mut session = AuthSession::init(MemoryStorage::default());

        let google = session.login_with_google().unwrap().clone();
        assert_eq!(google.id.as_str(), "456");
        assert_eq!(google.email.as_str(), "google@example.com");
        assert_eq!(
            google.avatar.unwrap().as_str(),
            "https://i.pravatar.cc/150?u=456"
        );

        let otp = session
            .login_with_otp(OtpFormPayload {
                phone: "+221771234567".into(),
            })
            .unwrap()
            .clone();
        assert_eq!(otp.id.as_str(), "789");
        assert_eq!(otp.email.as_str(), "+221771234567@user.com");

        let registered = session
            .register(RegisterFormPayload {
                name: UserName::new("Awa Diop").unwrap(),
                email: UserEmail::new("awa@example.com").unwrap(),
            })
            .unwrap()
            .clone();
        assert_eq!(registered.id.as_str(), "123");
        assert_eq!(registered.name.as_str(), "Awa Diop");
    }

    #[test]
    fn logout_clears_storage() {
        let mut session = AuthSession::init(MemoryStorage::default());
        session.login(login_payload()).unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.teardown().user.borrow().is_none());
    }

    #[test]
    fn failed_write_keeps_user_signed_out() {
        let storage = MemoryStorage {
            fail_writes: true,
            ..MemoryStorage::default()
        };
        let mut session = AuthSession::init(storage);

        let err = session.login(login_payload()).unwrap_err();

        assert_eq!(err, ServiceError::Internal);
        assert!(!session.is_authenticated());
    }
}
