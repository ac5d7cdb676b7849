// request-client/src/headers.rs
use std::collections::BTreeMap;

/// Ordered header list with case-insensitive names.
///
/// Lookups ignore ASCII case; the spelling of the most recent `insert` is what
/// a transport receives. Whether that spelling survives onto the wire is up
/// to the transport: `ReqwestClient` goes through `http::HeaderMap`, which
/// lowercases every name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing every existing entry with the same name.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        let Some(pos) = self.position(&name) else {
            self.entries.push((name, value));
            return None;
        };

        // Drop later duplicates; everything up to `pos` stays where it is.
        let mut index = 0;
        self.entries.retain(|(existing, _)| {
            let keep = index <= pos || !existing.eq_ignore_ascii_case(&name);
            index += 1;
            keep
        });
        let previous = std::mem::replace(&mut self.entries[pos], (name, value)).1;
        Some(previous)
    }

    /// Add an entry without touching existing ones (repeated response headers)
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let previous = self.get(name).map(String::from);
        self.entries
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        previous
    }

    /// Overlay `other` on top of `self`; names from `other` win.
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl From<&BTreeMap<String, String>> for Headers {
    fn from(map: &BTreeMap<String, String>) -> Self {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert!(headers.contains("Content-type"));
        assert_eq!(headers.get("accept"), None);
    }

    #[test]
    fn test_insert_replaces_and_keeps_new_spelling() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        headers.insert("x-trace", "1");
        let previous = headers.insert("content-type", "text/plain");

        assert_eq!(previous.as_deref(), Some("application/json"));
        assert_eq!(headers.len(), 2);
        let entries: Vec<_> = headers.iter().collect();
        assert_eq!(entries, vec![("content-type", "text/plain"), ("x-trace", "1")]);
    }

    #[test]
    fn test_insert_collapses_appended_duplicates() {
        let mut headers = Headers::new();
        headers.append("Set-Cookie", "a=1");
        headers.append("set-cookie", "b=2");
        headers.insert("SET-COOKIE", "c=3");
        let entries: Vec<_> = headers.iter().collect();
        assert_eq!(entries, vec![("SET-COOKIE", "c=3")]);
    }

    #[test]
    fn test_merge_explicit_wins() {
        let mut defaults: Headers = [("Content-Type", "application/json"), ("Accept", "*/*")]
            .into_iter()
            .collect();
        let explicit: Headers = [("accept", "text/html"), ("test", "test")]
            .into_iter()
            .collect();
        defaults.merge(&explicit);

        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults.get("Accept"), Some("text/html"));
        assert_eq!(defaults.get("test"), Some("test"));
        assert_eq!(defaults.get("content-type"), Some("application/json"));
    }

    #[test]
    fn test_remove() {
        let mut headers: Headers = [("X-One", "1")].into_iter().collect();
        assert_eq!(headers.remove("x-one").as_deref(), Some("1"));
        assert!(headers.is_empty());
        assert_eq!(headers.remove("x-one"), None);
    }
}
