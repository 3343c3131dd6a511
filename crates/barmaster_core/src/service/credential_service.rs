//! Fixed username/password table checked at login.
//!
//! Passwords are compared in plain text, case-sensitively.

use std::collections::BTreeMap;

/// Static credential table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    entries: BTreeMap<String, String>,
}

impl CredentialStore {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(user, password)| (user.to_string(), password.to_string()))
                .collect(),
        )
    }

    /// True iff `username` exists and its password matches exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.entries
            .get(username)
            .is_some_and(|stored| stored == password)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::from_pairs(default_credentials())
    }
}

/// Built-in accounts used when no table is configured.
pub fn default_credentials() -> [(&'static str, &'static str); 3] {
    [("admin", "admin"), ("leo", "1234"), ("guest", "0000")]
}

#[cfg(test)]
mod tests {
    use super::CredentialStore;

    #[test]
    fn verify_requires_exact_match() {
        let store = CredentialStore::default();
        assert!(store.verify("leo", "1234"));
        assert!(!store.verify("Leo", "1234"));
        assert!(!store.verify("leo", "12345"));
        assert!(!store.verify("nobody", ""));
    }
}
