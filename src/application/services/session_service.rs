//! Signed, stateless session tokens carried in the `SESSION` cookie.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "SESSION";

/// Issues and verifies session tokens.
///
/// # Token Format
///
/// ```text
/// base64url(username) "." expires_at_unix "." hex(hmac_sha256(secret, base64url(username) "." expires_at_unix))
/// ```
///
/// The username is encoded so it can never contain the `.` separator. The MAC
/// is checked in constant time.
#[derive(Clone)]
pub struct SessionService {
    signing_secret: String,
    session_ttl_seconds: i64,
    remember_me_seconds: i64,
    secure_cookies: bool,
}

/// A freshly issued session ready to be sent as a cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    /// `Some` for persistent ("remember me") cookies, `None` for browser-session cookies.
    pub max_age: Option<i64>,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key
    /// - `session_ttl_seconds` - lifetime of a session without remember-me
    /// - `remember_me_seconds` - lifetime of a remember-me session
    /// - `secure_cookies` - add the `Secure` attribute to cookies
    pub fn new(
        signing_secret: String,
        session_ttl_seconds: i64,
        remember_me_seconds: i64,
        secure_cookies: bool,
    ) -> Self {
        Self {
            signing_secret,
            session_ttl_seconds,
            remember_me_seconds,
            secure_cookies,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length")
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Issues a session for `username`.
    pub fn issue(&self, username: &str, remember_me: bool) -> IssuedSession {
        let ttl = if remember_me {
            self.remember_me_seconds
        } else {
            self.session_ttl_seconds
        };
        let expires_at = Utc::now().timestamp().saturating_add(ttl);

        IssuedSession {
            token: self.token_for(username, expires_at),
            max_age: remember_me.then_some(ttl),
        }
    }

    fn token_for(&self, username: &str, expires_at: i64) -> String {
        let payload = format!("{}.{}", URL_SAFE_NO_PAD.encode(username), expires_at);
        let signature = self.sign(&payload);
        format!("{payload}.{signature}")
    }

    /// Verifies a token and returns the username it was issued for.
    ///
    /// Returns `None` for malformed, tampered or expired tokens.
    pub fn verify(&self, token: &str) -> Option<String> {
        let (payload, signature) = token.rsplit_once('.')?;
        let (encoded_user, expires_at) = payload.split_once('.')?;

        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let expires_at: i64 = expires_at.parse().ok()?;
        if Utc::now().timestamp() >= expires_at {
            return None;
        }

        let username = URL_SAFE_NO_PAD.decode(encoded_user).ok()?;
        String::from_utf8(username).ok()
    }

    /// `Set-Cookie` value carrying an issued session.
    pub fn cookie(&self, session: &IssuedSession) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            session.token
        );
        if let Some(max_age) = session.max_age {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn clear_cookie(&self) -> String {
        let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Extracts a named cookie from a `Cookie` header value.
///
/// Handles multiple cookies separated by semicolons and ignores the rest.
pub fn find_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|cookie| {
        let mut parts = cookie.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(value),
            _ => None,
        }
    })
}
