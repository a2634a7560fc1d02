//! # Session State
//!
//! Shared ownership wrapper around the sale session.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple handlers may access/modify the session
//! 2. Only one handler should modify the session at a time
//! 3. Handlers can run concurrently on the async runtime
//!
//! Every session operation is synchronous and runs to completion inside
//! the lock, so a caller never observes a half-applied operation.
//!
//! ## Why Not RwLock?
//! Session operations are quick and most of them modify state. A RwLock
//! would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use orchid_core::SaleSession;

/// Shared session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<SaleSession>>,
}

impl SessionState {
    /// Creates a fresh session state: empty active sale, no parked sales.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(SaleSession::new())),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = state.with_session(|s| s.totals(&vat));
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.add(&item))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}
