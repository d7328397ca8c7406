//! API key resolution for the text-generation endpoint.
//!
//! Lookup order: session override, then the persisted value, then the
//! configured default. Empty strings count as unset everywhere, except that
//! emptying the key field clears the key for the rest of the session.

use crate::storage::Storage;
use std::sync::{Arc, RwLock};

pub const CREDENTIAL_KEY: &str = "xai_api_key";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Session {
    #[default]
    Unset,
    Key(String),
    /// The user emptied the field; nothing resolves until restart.
    Cleared,
}

pub struct CredentialStore {
    storage: Arc<Storage>,
    session: RwLock<Session>,
    default: Option<String>,
}

impl CredentialStore {
    pub fn new(storage: Arc<Storage>, default: Option<String>) -> Self {
        Self {
            storage,
            session: RwLock::new(Session::Unset),
            default: non_empty(default),
        }
    }

    /// Use `value` for this process only, without persisting it.
    pub fn set_session(&self, value: Option<String>) {
        self.replace_session(match non_empty(value) {
            Some(v) => Session::Key(v),
            None => Session::Unset,
        });
    }

    fn replace_session(&self, session: Session) {
        if let Ok(mut s) = self.session.write() {
            *s = session;
        }
    }

    pub fn get(&self) -> anyhow::Result<Option<String>> {
        let session = self.session.read().map(|s| s.clone()).unwrap_or_default();
        match session {
            Session::Key(v) => return Ok(Some(v)),
            Session::Cleared => return Ok(None),
            Session::Unset => {}
        }
        if let Some(v) = non_empty(self.storage.get_setting(CREDENTIAL_KEY)?) {
            return Ok(Some(v));
        }
        Ok(self.default.clone())
    }

    /// Make `value` current and persist it.
    ///
    /// An empty value leaves the stored key on disk but hides it (and the
    /// configured default) until the process restarts.
    pub fn set(&self, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        if value.is_empty() {
            self.replace_session(Session::Cleared);
            return Ok(());
        }
        self.replace_session(Session::Key(value.to_string()));
        self.storage.put_setting(CREDENTIAL_KEY, value)?;
        tracing::debug!("persisted api key");
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.set_session(None);
        self.storage.delete_setting(CREDENTIAL_KEY)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// `xai-abc…wxyz` style rendering for display.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
