use crate::base::neterror::NetError;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::str::FromStr;

/// A header map that strictly preserves insertion order.
///
/// Names are stored lower case, so keys are unique under case-insensitive
/// comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedHeaderMap {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl OrderedHeaderMap {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let name_header = HeaderName::from_str(name).map_err(|_| NetError::InvalidHeader)?;
        let value_header = HeaderValue::from_str(value).map_err(|_| NetError::InvalidHeader)?;
        self.set(name_header, value_header);
        Ok(())
    }

    /// Insert an already validated header.
    pub fn set(&mut self, name: HeaderName, value: HeaderValue) {
        // Update in place if exists, else append.
        // HeaderName is already lowercase, so simple equality works.
        if let Some((_, v)) = self.headers.iter_mut().find(|(n, _)| *n == name) {
            *v = value;
        } else {
            self.headers.push((name, value));
        }
    }

    /// Insert an already validated header only when none exists for `name`.
    /// Returns true if the value was inserted.
    pub fn set_if_absent(&mut self, name: HeaderName, value: HeaderValue) -> bool {
        if self.headers.iter().any(|(n, _)| *n == name) {
            return false;
        }
        self.headers.push((name, value));
        true
    }

    pub fn remove(&mut self, name: &str) {
        if let Ok(target) = HeaderName::from_str(name) {
            self.headers.retain(|(n, _)| *n != target);
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        let target = HeaderName::from_str(name).ok()?;
        self.headers
            .iter()
            .find(|(n, _)| *n == target)
            .map(|(_, v)| v)
    }

    /// Get a header value as a string, if it is visible ASCII.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.headers.iter().map(|(n, v)| (n, v))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Consumes the map and returns a standard http::HeaderMap.
    pub fn to_header_map(self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers {
            map.append(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("Content-Type", "application/json").unwrap();
        assert_eq!(headers.get_str("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_case_insensitive_get() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("ACCEPT", "text/html").unwrap();
        assert!(headers.get("accept").is_some());
        assert!(headers.get("Accept").is_some());
    }

    #[test]
    fn test_names_stored_lower_case() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("X-Custom-Header", "1").unwrap();
        let (name, _) = headers.iter().next().unwrap();
        assert_eq!(name.as_str(), "x-custom-header");
    }

    #[test]
    fn test_update_existing_header() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("Host", "example.com").unwrap();
        headers.insert("HOST", "updated.com").unwrap();
        assert_eq!(headers.get_str("host"), Some("updated.com"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_set_if_absent() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("Accept-Encoding", "br").unwrap();
        let inserted = headers.set_if_absent(
            http::header::ACCEPT_ENCODING,
            HeaderValue::from_static("gzip"),
        );
        assert!(!inserted);
        assert_eq!(headers.get_str("accept-encoding"), Some("br"));

        assert!(headers.set_if_absent(http::header::ACCEPT, HeaderValue::from_static("*/*")));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_remove_header() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("X-Custom", "value").unwrap();
        headers.remove("x-custom");
        assert!(headers.get("X-Custom").is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("Host", "example.com").unwrap();
        headers.insert("Accept", "text/html").unwrap();
        headers.insert("User-Agent", "test").unwrap();
        headers.insert("Accept", "*/*").unwrap();

        let map = headers.to_header_map();
        let names: Vec<_> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["host", "accept", "user-agent"]);
        assert_eq!(map["accept"], "*/*");
    }

    #[test]
    fn test_invalid_header_name() {
        let mut headers = OrderedHeaderMap::new();
        let result = headers.insert("Invalid Header", "value");
        assert_eq!(result, Err(NetError::InvalidHeader));
    }

    #[test]
    fn test_invalid_header_value() {
        let mut headers = OrderedHeaderMap::new();
        let result = headers.insert("Valid", "invalid\nvalue");
        assert_eq!(result, Err(NetError::InvalidHeader));
    }
}
