// HTTP Digest authentication
//
// The appliance answers unauthenticated requests with 401 and a
// `WWW-Authenticate: Digest ...` challenge. The latest challenge is cached
// and answered pre-emptively on later requests (the nonce count advances
// with each answer); a fresh 401 replaces it.

use std::sync::{Mutex, PoisonError};

use digest_auth::{AuthContext, HttpMethod, WwwAuthenticateHeader};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::trace;

use crate::error::Error;

/// Admin credentials for the appliance's web interface.
#[derive(Debug, Clone)]
pub struct DigestCredentials {
    pub username: String,
    pub password: SecretString,
}

impl DigestCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Digest state shared by every request of one transport.
#[derive(Debug)]
pub(crate) struct DigestAuth {
    credentials: DigestCredentials,
    challenge: Mutex<Option<WwwAuthenticateHeader>>,
}

impl DigestAuth {
    pub(crate) fn new(credentials: DigestCredentials) -> Self {
        Self {
            credentials,
            challenge: Mutex::new(None),
        }
    }

    pub(crate) fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Answer the cached challenge for `method` on `uri`.
    ///
    /// Returns `None` before the appliance has issued its first challenge.
    pub(crate) fn authorization(&self, method: &Method, uri: &str) -> Result<Option<String>, Error> {
        let mut guard = self.challenge.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(challenge) => self.respond(challenge, method, uri).map(Some),
            None => Ok(None),
        }
    }

    /// Parse a fresh `WWW-Authenticate` header, cache it, and answer it.
    pub(crate) fn accept_challenge(
        &self,
        header: &str,
        method: &Method,
        uri: &str,
    ) -> Result<String, Error> {
        trace!("received digest challenge");
        let mut challenge =
            digest_auth::parse(header).map_err(|e| Error::DigestChallenge(e.to_string()))?;
        let answer = self.respond(&mut challenge, method, uri)?;
        *self.challenge.lock().unwrap_or_else(PoisonError::into_inner) = Some(challenge);
        Ok(answer)
    }

    fn respond(
        &self,
        challenge: &mut WwwAuthenticateHeader,
        method: &Method,
        uri: &str,
    ) -> Result<String, Error> {
        let http_method = if *method == Method::POST {
            HttpMethod::POST
        } else {
            HttpMethod::GET
        };
        let context = AuthContext::new_with_method(
            self.credentials.username.as_str(),
            self.credentials.password.expose_secret(),
            uri,
            Option::<&[u8]>::None,
            http_method,
        );
        challenge
            .respond(&context)
            .map(|answer| answer.to_header_string())
            .map_err(|e| Error::DigestChallenge(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHALLENGE: &str =
        r#"Digest realm="PBX", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", qop="auth""#;

    fn auth() -> DigestAuth {
        DigestAuth::new(DigestCredentials::new(
            "admin",
            SecretString::from("secret".to_string()),
        ))
    }

    #[test]
    fn no_authorization_before_first_challenge() {
        let auth = auth();
        let header = auth.authorization(&Method::GET, "/tree");
        assert!(matches!(header, Ok(None)));
    }

    #[test]
    fn cached_challenge_answers_later_requests() {
        let auth = auth();
        let first = auth
            .accept_challenge(CHALLENGE, &Method::GET, "/tree")
            .expect("challenge should parse");
        assert!(first.starts_with("Digest "));
        assert!(first.contains(r#"username="admin""#));
        assert!(first.contains(r#"uri="/tree""#));

        let second = auth
            .authorization(&Method::POST, "/configs_set?configId=2")
            .expect("cached challenge should answer")
            .expect("challenge is cached");
        assert!(second.contains(r#"uri="/configs_set?configId=2""#));
        assert!(second.contains("nc=00000002"));
    }

    #[test]
    fn garbage_challenge_is_rejected() {
        let auth = auth();
        let result = auth.accept_challenge("Basic realm=\"x\"", &Method::GET, "/tree");
        assert!(matches!(result, Err(Error::DigestChallenge(_))));
    }
}
