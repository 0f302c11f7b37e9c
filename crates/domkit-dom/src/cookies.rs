//! Cookie jar
//!
//! `document.cookie` semantics for a single origin: the getter joins
//! live `name=value` pairs, the setter parses one `Set-Cookie`-style
//! string with `path`, `max-age` and `expires` attributes.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{PersistentSlots, StorageError};

/// A browser cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    /// Unix timestamp; `None` for session cookies
    pub expires: Option<u64>,
}

impl Cookie {
    /// Create a new session cookie
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            expires: None,
        }
    }

    /// Check if cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.is_some_and(|expires| expires <= now())
    }

    /// Parse a `document.cookie` assignment
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, value.trim());

        for part in parts {
            let Some((attr, val)) = part.trim().split_once('=') else {
                continue;
            };
            match attr.trim().to_ascii_lowercase().as_str() {
                "path" => cookie.path = val.trim().to_string(),
                "max-age" => {
                    if let Ok(secs) = val.trim().parse::<i64>() {
                        cookie.expires = Some(now().saturating_add_signed(secs));
                    }
                }
                "expires" => {
                    if let Ok(ts) = val.trim().parse::<u64>() {
                        cookie.expires = Some(ts);
                    }
                }
                _ => {}
            }
        }

        Some(cookie)
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Cookie jar for the document's origin
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a cookie; an already-expired cookie deletes it
    pub fn set(&mut self, cookie: Cookie) {
        self.cookies
            .retain(|c| !(c.name == cookie.name && c.path == cookie.path));
        if !cookie.is_expired() {
            self.cookies.push(cookie);
        }
    }

    /// Value of a live cookie
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.name == name && !c.is_expired())
            .map(|c| c.value.as_str())
    }

    /// Delete every cookie with this name
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.cookies.len();
        self.cookies.retain(|c| c.name != name);
        self.cookies.len() != before
    }

    /// `document.cookie` getter
    pub fn cookie_string(&self) -> String {
        self.cookies
            .iter()
            .filter(|c| !c.is_expired())
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `document.cookie` setter; malformed input is ignored
    pub fn set_cookie_string(&mut self, text: &str) {
        match Cookie::parse(text) {
            Some(cookie) => self.set(cookie),
            None => tracing::debug!("ignoring malformed cookie {:?}", text),
        }
    }

    /// Number of live cookies
    pub fn len(&self) -> usize {
        self.cookies.iter().filter(|c| !c.is_expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistentSlots for CookieJar {
    fn read_slot(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|raw| decode_cookie_value(raw).unwrap_or_else(|| raw.to_string()))
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set(Cookie::new(key, &encode_cookie_value(value)));
        Ok(())
    }

    fn erase_slot(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.remove(key))
    }
}

/// Percent-encode bytes that would break a `name=value; ...` cookie string
pub fn encode_cookie_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'%' | b';' | b',' | b'=' | b'"' | b'\\' => out.push_str(&format!("%{byte:02X}")),
            b if b.is_ascii_whitespace() || b.is_ascii_control() => {
                out.push_str(&format!("%{b:02X}"))
            }
            b if b.is_ascii() => out.push(b as char),
            b => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Reverse of [`encode_cookie_value`]; `None` on malformed escapes
pub fn decode_cookie_value(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = value.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
