//! Authentication context.
//!
//! The core does not hash passwords or sign tokens - both live behind
//! traits implemented by an external credential service. What the core
//! needs is a request-scoped answer to "who is calling?", carried
//! explicitly through [`RequestContext`] rather than any process-wide
//! current-user state.

use crate::error::{CoreError, CoreResult};

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The username the caller authenticated as.
    pub username: String,
}

impl Principal {
    /// Creates a principal for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Request-scoped authentication state.
///
/// Built once per request by the handler layer and passed by reference
/// into every mutating service call. Read paths don't take one.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    principal: Option<Principal>,
}

impl RequestContext {
    /// A context with no authenticated caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context carrying an authenticated caller.
    #[must_use]
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Returns the authenticated caller, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns whether the caller is authenticated.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.principal.is_some()
    }

    /// Returns the authenticated caller or [`CoreError::Unauthorized`].
    pub fn require_authorized(&self) -> CoreResult<&Principal> {
        self.principal.as_ref().ok_or(CoreError::Unauthorized)
    }
}

/// Verifies bearer tokens.
///
/// Implementations (JWT verification etc.) live outside the core; the
/// core only needs the yes/no answer and the principal it decodes to.
pub trait TokenVerifier: Send + Sync {
    /// Returns the principal a token authenticates, or `None` if the
    /// token is invalid or expired.
    fn verify(&self, token: &str) -> Option<Principal>;
}

/// Builds a request context from an optional bearer token.
///
/// A missing or invalid token yields an anonymous context; it is the
/// mutating operations that turn that into an error.
pub fn context_from_token(verifier: &dyn TokenVerifier, token: Option<&str>) -> RequestContext {
    match token.and_then(|token| verifier.verify(token)) {
        Some(principal) => RequestContext::authenticated(principal),
        None => RequestContext::anonymous(),
    }
}

/// A username/password pair supplied at login.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The username.
    pub username: String,
    /// The plaintext password, compared by the external service.
    pub password: String,
}

/// Checks a username/password pair.
///
/// The hash comparison itself is the implementor's concern.
pub trait CredentialVerifier: Send + Sync {
    /// Returns whether the pair names a known user with the right password.
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Logs a caller in.
///
/// Both username and password are required; verification is delegated and
/// a failed check is [`CoreError::Unauthorized`] without distinguishing
/// unknown user from wrong password.
pub fn login(verifier: &dyn CredentialVerifier, credentials: &Credentials) -> CoreResult<Principal> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(CoreError::validation(
            "both username and password are required",
        ));
    }
    if verifier.authenticate(&credentials.username, &credentials.password) {
        Ok(Principal::new(credentials.username.clone()))
    } else {
        Err(CoreError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedVerifier;

    impl CredentialVerifier for FixedVerifier {
        fn authenticate(&self, username: &str, password: &str) -> bool {
            username == "admin" && password == "hunter2"
        }
    }

    struct PrefixTokens;

    impl TokenVerifier for PrefixTokens {
        fn verify(&self, token: &str) -> Option<Principal> {
            token.strip_prefix("ok:").map(Principal::new)
        }
    }

    #[test]
    fn anonymous_context_is_unauthorized() {
        let ctx = RequestContext::anonymous();
        assert!(!ctx.is_authorized());
        assert!(matches!(
            ctx.require_authorized(),
            Err(CoreError::Unauthorized)
        ));
    }

    #[test]
    fn authenticated_context_carries_principal() {
        let ctx = RequestContext::authenticated(Principal::new("admin"));
        assert_eq!(ctx.require_authorized().unwrap().username, "admin");
    }

    #[test]
    fn context_from_valid_token() {
        let ctx = context_from_token(&PrefixTokens, Some("ok:admin"));
        assert!(ctx.is_authorized());
        assert_eq!(ctx.principal().unwrap().username, "admin");
    }

    #[test]
    fn context_from_bad_or_missing_token_is_anonymous() {
        assert!(!context_from_token(&PrefixTokens, Some("garbage")).is_authorized());
        assert!(!context_from_token(&PrefixTokens, None).is_authorized());
    }

    #[test]
    fn login_requires_both_fields() {
        let missing = Credentials {
            username: "admin".into(),
            password: String::new(),
        };
        assert!(matches!(
            login(&FixedVerifier, &missing),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn login_success_and_failure() {
        let good = Credentials {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        assert_eq!(login(&FixedVerifier, &good).unwrap().username, "admin");

        let bad = Credentials {
            username: "admin".into(),
            password: "wrong".into(),
        };
        assert!(matches!(
            login(&FixedVerifier, &bad),
            Err(CoreError::Unauthorized)
        ));
    }
}
