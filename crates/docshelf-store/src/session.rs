//! Client-side session gate.
//!
//! A session is a single `{ "expiryAt": <epoch millis> }` record. It gates
//! nothing cryptographically; it only lets the CLI refuse to list once the
//! record has lapsed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use docshelf_core::{DocshelfError, Result};

use crate::kv::KeyValueStore;

/// Key holding the session record.
pub const SESSION_KEY: &str = "auth.session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Expiry as milliseconds since the Unix epoch. Numeric strings are
    /// accepted on read.
    #[serde(deserialize_with = "millis_from_number_or_string")]
    pub expiry_at: i64,
}

fn millis_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let from_float = |f: f64| -> std::result::Result<i64, D::Error> {
        if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Ok(f.trunc() as i64)
        } else {
            Err(serde::de::Error::custom(format!("expiryAt out of range: {f}")))
        }
    };

    match Millis::deserialize(deserializer)? {
        Millis::Int(ms) => Ok(ms),
        Millis::Float(f) => from_float(f),
        Millis::Text(text) => {
            let text = text.trim();
            match text.parse::<i64>() {
                Ok(ms) => Ok(ms),
                Err(_) => text
                    .parse::<f64>()
                    .map_err(|_| serde::de::Error::custom(format!("expiryAt is not numeric: '{text}'")))
                    .and_then(from_float),
            }
        }
    }
}

impl SessionRecord {
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expiry_at).single()
    }

    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() < self.expiry_at
    }
}

/// Session record stored under [`SESSION_KEY`].
#[derive(Debug)]
pub struct SessionGate<S> {
    store: S,
}

impl<S: KeyValueStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored record, if present and parseable.
    #[must_use]
    pub fn record(&self) -> Option<SessionRecord> {
        let raw = self.store.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = SESSION_KEY, error = %e, "session record is corrupt");
                None
            }
        }
    }

    /// `true` iff a parseable record exists and `now` is before its expiry.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.record().is_some_and(|r| r.is_valid(now))
    }

    /// Remove a stale or unparseable record. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Propagates the store's write error.
    pub fn logout_if_expired(&mut self, now: DateTime<Utc>) -> Result<bool> {
        if self.store.get(SESSION_KEY).is_none() || self.is_valid(now) {
            return Ok(false);
        }
        self.store.remove(SESSION_KEY)?;
        info!("expired session cleared");
        Ok(true)
    }

    /// Write a record expiring `ttl` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`DocshelfError::Config`] for a non-positive `ttl`, or the
    /// store's write error.
    pub fn start(&mut self, now: DateTime<Utc>, ttl: Duration) -> Result<SessionRecord> {
        if ttl <= Duration::zero() {
            return Err(DocshelfError::Config(format!(
                "session ttl must be positive, got {}s",
                ttl.num_seconds()
            )));
        }
        let expires = now.checked_add_signed(ttl).ok_or_else(|| {
            DocshelfError::Config(format!("session ttl out of range: {}h", ttl.num_hours()))
        })?;
        let record = SessionRecord {
            expiry_at: expires.timestamp_millis(),
        };
        let json =
            serde_json::to_string(&record).map_err(|e| DocshelfError::Serialization(e.to_string()))?;
        self.store.set(SESSION_KEY, json)?;
        info!(expiry_at = record.expiry_at, "session started");
        Ok(record)
    }

    /// Remove the record unconditionally.
    ///
    /// # Errors
    ///
    /// Propagates the store's write error.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(SESSION_KEY)
    }

    /// Fail with [`DocshelfError::SessionExpired`] unless the session is valid.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require(&self, now: DateTime<Utc>) -> Result<()> {
        if self.is_valid(now) {
            Ok(())
        } else {
            Err(DocshelfError::SessionExpired)
        }
    }
}
