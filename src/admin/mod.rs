use std::collections::HashSet;
use uuid::Uuid;

/// Shared secret used when no ADMIN_PASSWORD is configured
pub const DEMO_ADMIN_PASSWORD: &str = "smu2025";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect password")]
    InvalidPassword,

    #[error("Admin session required")]
    Unauthorized,
}

/// Single shared-secret gate for the moderation endpoints.
/// Successful logins get an opaque token that stays valid until logout.
pub struct AdminGate {
    password: String,
    sessions: HashSet<Uuid>,
}

impl AdminGate {
    pub fn new(password: String) -> Self {
        Self {
            password,
            sessions: HashSet::new(),
        }
    }

    pub fn login(&mut self, password: &str) -> Result<Uuid, AuthError> {
        if password != self.password {
            tracing::warn!("Rejected admin login attempt");
            return Err(AuthError::InvalidPassword);
        }

        let token = Uuid::new_v4();
        self.sessions.insert(token);
        tracing::info!("Admin session opened ({} active)", self.sessions.len());
        Ok(token)
    }

    pub fn logout(&mut self, token: &Uuid) -> bool {
        self.sessions.remove(token)
    }

    pub fn is_admin(&self, token: &Uuid) -> bool {
        self.sessions.contains(token)
    }

    /// Check a raw `Authorization` header value of the form `Bearer <token>`
    pub fn authorize(&self, header: Option<&str>) -> Result<Uuid, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .and_then(|t| Uuid::parse_str(t.trim()).ok())
            .ok_or(AuthError::Unauthorized)?;

        if self.is_admin(&token) {
            Ok(token)
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
