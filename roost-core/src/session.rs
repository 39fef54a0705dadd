use std::sync::RwLock;

/// Stored session identity, the equivalent of the browser tab's saved
/// login. Single-writer: only the sign-in/sign-out path mutates it.
pub trait SessionStore: Send + Sync {
    /// The signed-in user's id, if any. Unknown users never have a
    /// confirmed booking.
    fn current_user_id(&self) -> Option<String>;
}

pub struct MemorySession {
    user_id: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self {
            user_id: RwLock::new(None),
        }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: RwLock::new(Some(user_id.into())),
        }
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        *self.user_id.write().unwrap_or_else(|p| p.into_inner()) = Some(user_id.into());
    }

    pub fn sign_out(&self) {
        *self.user_id.write().unwrap_or_else(|p| p.into_inner()) = None;
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySession {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.read().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let session = MemorySession::new();
        assert_eq!(session.current_user_id(), None);

        session.sign_in("u42");
        assert_eq!(session.current_user_id(), Some("u42".to_string()));

        session.sign_out();
        assert_eq!(session.current_user_id(), None);
    }
}
