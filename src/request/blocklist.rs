use std::collections::BTreeSet;

use crate::request::caller::app_uri;

/// System packages that must never be offered credentials.
pub const SYSTEM_PACKAGES: [&str; 3] = ["android", "com.android.settings", "com.oneplus.applocker"];

/// Caller URIs this service refuses to fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blocklist {
    uris: BTreeSet<String>,
}

impl Blocklist {
    /// System packages plus the host app itself.
    pub fn new(host_package: &str) -> Self {
        let mut blocklist = Self::default();
        for package in SYSTEM_PACKAGES {
            blocklist.add(package);
        }
        blocklist.add(host_package);
        blocklist
    }

    /// Add user exclusions: bare package names or full URIs.
    pub fn with_exclusions<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            self.add(entry.as_ref());
        }
        self
    }

    pub fn add(&mut self, entry: &str) {
        let entry = entry.trim();
        if entry.is_empty() {
            return;
        }

        if entry.contains("://") {
            self.uris.insert(entry.to_string());
        } else {
            self.uris.insert(app_uri(entry));
        }
    }

    /// Exact URI match; a caller with no URI is never blocked.
    pub fn is_blocked(&self, uri: Option<&str>) -> bool {
        uri.is_some_and(|uri| self.uris.contains(uri))
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }
}
