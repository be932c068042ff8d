// src/session/mod.rs — Session context: the single owner of identity state
//
// The persisted token is readable by every component but writable only
// here, via login / logout / guest entry. Everything else receives the
// resolved context by reference so no two components hold divergent
// views of the current identity.

pub mod token;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infra::errors::SalonError;
use crate::infra::paths;

/// UI-gating role derived from the token's role claim.
/// `Guest` is synthetic: it is never decoded from a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Customer,
    Stylist,
    Owner,
}

impl Role {
    fn from_claim(claim: &str) -> Option<Role> {
        match claim {
            "customer" => Some(Role::Customer),
            "stylist" => Some(Role::Stylist),
            "owner" => Some(Role::Owner),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Guest => "guest",
            Role::Customer => "customer",
            Role::Stylist => "stylist",
            Role::Owner => "owner",
        };
        f.write_str(s)
    }
}

/// On-disk shape at ~/.salonctl/session.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    guest_mode: bool,
}

pub struct SessionContext {
    path: PathBuf,
    access_token: Option<String>,
    role: Option<Role>,
    user_id: Option<i64>,
    guest_mode: bool,
}

impl SessionContext {
    /// Resolve the session from the default persisted location.
    pub fn resolve() -> Self {
        Self::resolve_from(paths::session_file_path())
    }

    /// Resolve the session from an explicit file. A malformed file or an
    /// undecodable/expired token discards the session entirely: the file
    /// is cleared and the result is anonymous. No error escapes here.
    pub fn resolve_from(path: PathBuf) -> Self {
        let mut session = Self {
            path,
            access_token: None,
            role: None,
            user_id: None,
            guest_mode: false,
        };

        let persisted: PersistedSession = match std::fs::read_to_string(&session.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!("Discarding unreadable session file: {e}");
                    session.clear_persisted();
                    return session;
                }
            },
            Err(_) => return session, // no session file: anonymous
        };

        if persisted.guest_mode {
            session.guest_mode = true;
            session.role = Some(Role::Guest);
            return session;
        }

        let Some(raw_token) = persisted.access_token else {
            return session;
        };

        match Self::derive_identity(&raw_token) {
            Ok((role, user_id)) => {
                session.access_token = Some(raw_token);
                session.role = Some(role);
                session.user_id = user_id;
            }
            Err(e) => {
                tracing::warn!("Discarding stored token: {e}");
                session.clear_persisted();
            }
        }

        session
    }

    fn derive_identity(raw_token: &str) -> Result<(Role, Option<i64>), SalonError> {
        let claims = token::decode_claims(raw_token)
            .map_err(|e| SalonError::Auth { message: e.to_string() })?;
        if claims.is_expired(chrono::Utc::now().timestamp()) {
            return Err(SalonError::Auth {
                message: "session token expired".into(),
            });
        }
        let role = claims
            .role
            .as_deref()
            .and_then(Role::from_claim)
            .ok_or_else(|| SalonError::Auth {
                message: "token carries no usable role claim".into(),
            })?;
        let user_id = claims.sub.as_deref().and_then(|s| s.parse().ok());
        Ok((role, user_id))
    }

    /// Adopt a freshly issued token. Clears guest mode: the two modes are
    /// mutually exclusive.
    pub fn login(&mut self, raw_token: String) -> Result<(), SalonError> {
        let (role, user_id) = Self::derive_identity(&raw_token)?;
        self.guest_mode = false;
        self.access_token = Some(raw_token);
        self.role = Some(role);
        self.user_id = user_id;
        self.persist()
    }

    /// Enter guest mode, unconditionally dropping any existing token.
    pub fn enter_guest_mode(&mut self) -> Result<(), SalonError> {
        self.access_token = None;
        self.user_id = None;
        self.guest_mode = true;
        self.role = Some(Role::Guest);
        self.persist()
    }

    /// Clear all session state, returning to anonymous.
    pub fn logout(&mut self) -> Result<(), SalonError> {
        self.access_token = None;
        self.role = None;
        self.user_id = None;
        self.guest_mode = false;
        self.clear_persisted();
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_guest(&self) -> bool {
        self.guest_mode
    }

    /// None means anonymous.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    /// Bearer credential for authenticated calls.
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Atomic write with owner-only permissions, same scheme as any other
    /// credential file: tmp then rename so a crash can't corrupt it.
    fn persist(&self) -> Result<(), SalonError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }

        let persisted = PersistedSession {
            access_token: self.access_token.clone(),
            guest_mode: self.guest_mode,
        };
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| SalonError::Other(e.into()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn clear_persisted(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"sub":"42","role":"customer","exp":4102444800} — expires in 2100
    const CUSTOMER_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI0MiIsInJvbGUiOiJjdXN0b21lciIsImV4cCI6NDEwMjQ0NDgwMH0.sig";
    // {"sub":"7","role":"owner","exp":4102444800}
    const OWNER_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI3Iiwicm9sZSI6Im93bmVyIiwiZXhwIjo0MTAyNDQ0ODAwfQ.sig";

    fn scratch_session() -> (tempfile::TempDir, SessionContext) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionContext::resolve_from(dir.path().join("session.json"));
        (dir, session)
    }

    #[test]
    fn fresh_session_is_anonymous() {
        let (_dir, session) = scratch_session();
        assert!(!session.is_authenticated());
        assert!(!session.is_guest());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn login_derives_role_and_persists() {
        let (dir, mut session) = scratch_session();
        session.login(CUSTOMER_TOKEN.to_string()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Customer));
        assert_eq!(session.user_id(), Some(42));

        let reloaded = SessionContext::resolve_from(dir.path().join("session.json"));
        assert_eq!(reloaded.bearer(), Some(CUSTOMER_TOKEN));
        assert_eq!(reloaded.role(), Some(Role::Customer));
    }

    #[test]
    fn owner_role_is_decoded() {
        let (_dir, mut session) = scratch_session();
        session.login(OWNER_TOKEN.to_string()).unwrap();
        assert_eq!(session.role(), Some(Role::Owner));
        assert_eq!(session.user_id(), Some(7));
    }

    #[test]
    fn malformed_persisted_token_resolves_anonymous_and_clears_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"access_token":"not-a-jwt","guest_mode":false}"#).unwrap();

        let session = SessionContext::resolve_from(path.clone());
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
        assert!(!path.exists(), "bad token file must be cleared");
    }

    #[test]
    fn guest_mode_clears_existing_token() {
        let (_dir, mut session) = scratch_session();
        session.login(CUSTOMER_TOKEN.to_string()).unwrap();
        session.enter_guest_mode().unwrap();
        assert!(session.is_guest());
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
        assert_eq!(session.role(), Some(Role::Guest));
    }

    #[test]
    fn login_clears_guest_mode() {
        let (_dir, mut session) = scratch_session();
        session.enter_guest_mode().unwrap();
        session.login(CUSTOMER_TOKEN.to_string()).unwrap();
        assert!(!session.is_guest());
        assert_eq!(session.role(), Some(Role::Customer));
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let (dir, mut session) = scratch_session();
        session.login(CUSTOMER_TOKEN.to_string()).unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);

        let reloaded = SessionContext::resolve_from(dir.path().join("session.json"));
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn login_rejects_token_without_role() {
        let (_dir, mut session) = scratch_session();
        // {"sub":"1","exp":4102444800} — no role claim
        let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIiwiZXhwIjo0MTAyNDQ0ODAwfQ.sig";
        assert!(matches!(
            session.login(token.to_string()),
            Err(SalonError::Auth { .. })
        ));
        assert!(!session.is_authenticated());
    }
}
