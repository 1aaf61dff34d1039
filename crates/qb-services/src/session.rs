//! # Session Manager
//!
//! State machine over `{anonymous, authenticated}` with an orthogonal
//! `is_loading` busy flag wrapped around every operation so a UI can
//! disable its controls. Operations are `async` so callers can await them,
//! but each one is a deferred-completion wrapper around a synchronous
//! read-modify-write: it either fully commits its write to the Durable
//! Store or, on error, commits nothing.
//!
//! The session pointer is rehydrated from the Durable Store at
//! construction; pending reset codes are persisted too, so they survive a
//! process restart.

use crate::identity::IdentityRepository;
use qb_core::codec;
use qb_core::error::{AppError, Result};
use qb_core::models::{ProfilePatch, ResetCode, UserCredential, UserProfile};
use qb_core::traits::DurableStore;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Storage key for the current-session pointer.
pub const SESSION_KEY: &str = "blog-app-user";

/// Storage key for pending password-reset codes (email → code).
pub const RESET_CODES_KEY: &str = "blog-app-reset-codes";

pub struct SessionManager {
    store: Arc<dyn DurableStore>,
    identity: IdentityRepository,
    current: RwLock<Option<UserProfile>>,
    loading: AtomicBool,
}

/// Raises the busy flag for the duration of one operation.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SessionManager {
    /// Builds the manager and rehydrates the session pointer. A corrupt
    /// pointer is removed and the manager starts anonymous.
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        let current = match store.get(SESSION_KEY) {
            Some(raw) => match codec::decode::<UserProfile>(SESSION_KEY, &raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    log::warn!("discarding stored session: {e}");
                    store.remove(SESSION_KEY);
                    None
                }
            },
            None => None,
        };
        Self {
            identity: IdentityRepository::new(store.clone()),
            store,
            current: RwLock::new(current),
            loading: AtomicBool::new(false),
        }
    }

    // ── Read-only surface ───────────────────────────────────────────────

    pub fn current_user(&self) -> Option<UserProfile> {
        self.current.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Creates a credential with a fresh v7 id, establishes a session, and
    /// returns the new profile. Fails with `EmailInUse` on a
    /// case-insensitive duplicate.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let _busy = LoadingGuard::raise(&self.loading);

        let credential = UserCredential {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            profile_picture: None,
        };
        self.identity.insert(&credential)?;

        let profile = UserProfile::from(&credential);
        self.establish(profile.clone())?;
        Ok(profile)
    }

    /// Fails with `InvalidCredentials` unless a credential matches the
    /// email (case-insensitive) and password (exact).
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let _busy = LoadingGuard::raise(&self.loading);

        let credential = self
            .identity
            .verify_credentials(email, password)
            .ok_or(AppError::InvalidCredentials)?;

        let profile = UserProfile::from(&credential);
        self.establish(profile.clone())?;
        Ok(profile)
    }

    /// Clears the session. Always succeeds.
    pub async fn logout(&self) {
        let _busy = LoadingGuard::raise(&self.loading);
        self.store.remove(SESSION_KEY);
        *self.current.write().expect("session lock poisoned") = None;
    }

    /// Applies a name/picture patch to both the stored credential and the
    /// live session projection.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<UserProfile> {
        let _busy = LoadingGuard::raise(&self.loading);

        let session = self.current_user().ok_or(AppError::NotAuthenticated)?;
        let updated = self.identity.update(session.id, &patch)?;

        let profile = UserProfile::from(&updated);
        self.establish(profile.clone())?;
        Ok(profile)
    }

    /// Always reports success so callers cannot probe which emails exist.
    /// When the email does exist, stores a fresh 6-digit code, overwriting
    /// any pending code for the same email.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        let _busy = LoadingGuard::raise(&self.loading);

        if self.identity.find_by_email(email).is_none() {
            return Ok(());
        }

        let code = ResetCode {
            code: generate_code(),
            issued_at: chrono::Utc::now(),
        };
        // Stands in for delivery by email.
        log::info!("reset code for {email}: {}", code.code);

        let mut pending = self.load_reset_codes();
        pending.insert(email.to_string(), code);
        self.save_reset_codes(&pending)
    }

    /// Checks the pending code without consuming it, so the user can
    /// re-verify before submitting a new password.
    pub async fn verify_reset_code(&self, email: &str, code: &str) -> Result<()> {
        let _busy = LoadingGuard::raise(&self.loading);
        self.check_code(email, code)
    }

    /// Overwrites the password and consumes the pending code. Does not
    /// auto-login.
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<()> {
        let _busy = LoadingGuard::raise(&self.loading);

        self.check_code(email, code)?;
        self.identity.set_password(email, new_password)?;

        let mut pending = self.load_reset_codes();
        pending.remove(email);
        self.save_reset_codes(&pending)
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Persists the session pointer and swaps the live projection.
    fn establish(&self, profile: UserProfile) -> Result<()> {
        let raw = codec::encode(&profile)?;
        self.store.set(SESSION_KEY, &raw);
        *self.current.write().expect("session lock poisoned") = Some(profile);
        Ok(())
    }

    fn check_code(&self, email: &str, code: &str) -> Result<()> {
        let pending = self.load_reset_codes();
        match pending.get(email) {
            Some(reset) if reset.code == code => Ok(()),
            _ => Err(AppError::InvalidCode),
        }
    }

    fn load_reset_codes(&self) -> HashMap<String, ResetCode> {
        let Some(raw) = self.store.get(RESET_CODES_KEY) else {
            return HashMap::new();
        };
        match codec::decode(RESET_CODES_KEY, &raw) {
            Ok(pending) => pending,
            Err(e) => {
                log::warn!("discarding pending reset codes: {e}");
                self.store.remove(RESET_CODES_KEY);
                HashMap::new()
            }
        }
    }

    fn save_reset_codes(&self, pending: &HashMap<String, ResetCode>) -> Result<()> {
        let raw = codec::encode(pending)?;
        self.store.set(RESET_CODES_KEY, &raw);
        Ok(())
    }
}

/// Six decimal digits, "100000".."999999".
fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}
