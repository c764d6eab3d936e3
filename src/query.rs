use crate::compat::{String, ToString, Vec};
use crate::encoding::percent::{percent_decode, percent_encode_into};

/// Value side of a query parameter: a plain string or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Single(String),
    List(Vec<String>),
}

impl Value {
    /// The scalar form, or the first element of a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::List(vs) => vs.first().map(String::as_str),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Single(v)
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(vs: [&str; N]) -> Self {
        Self::List(vs.iter().map(ToString::to_string).collect())
    }
}

/// How repeated keys collapse when a query string is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Last occurrence wins (the default).
    #[default]
    KeepLast,
    /// First occurrence wins; later duplicates are ignored.
    KeepFirst,
    /// Promote to a list only once a second occurrence is seen.
    UseArrays,
    /// Every value is stored as a list, even with a single element.
    AlwaysUseArrays,
}

/// Query codec policy: duplicate-key resolution plus serialization shape.
///
/// The two axes are independent; `use_array_syntax` controls whether list
/// values serialize as `key[]=v1&key[]=v2` rather than repeated `key=v`,
/// and `sort_keys` orders keys lexicographically on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub duplicates: DuplicatePolicy,
    pub use_array_syntax: bool,
    pub sort_keys: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn array_syntax(mut self) -> Self {
        self.use_array_syntax = true;
        self
    }

    pub fn sorted(mut self) -> Self {
        self.sort_keys = true;
        self
    }
}

/// An ordered mapping from key to [`Value`], the in-memory form of a query
/// string. Keys are unique; first-seen order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Scalar view of a key's value (first element for lists).
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set a key, replacing any existing value and keeping its position.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Parse a query string (no leading `?`) into a parameter mapping.
    ///
    /// Tokens are split on `&` (empty tokens from stray `&&` are dropped),
    /// then on the first `=`; a token without `=` gets an empty value. Keys
    /// and values are percent-decoded with `+` as space. A key ending in a
    /// literal `[]` has the suffix stripped and always accumulates into a
    /// list, regardless of the duplicate policy. Parsing never fails.
    pub fn parse(query: &str, options: QueryOptions) -> Self {
        let mut params = Self::new();
        for token in query.split('&').filter(|t| !t.is_empty()) {
            let (raw_key, raw_value) = token.split_once('=').unwrap_or((token, ""));
            let mut key = percent_decode(raw_key, true);
            let value = percent_decode(raw_value, true);
            let explicit_list = key.ends_with("[]");
            if explicit_list {
                key.truncate(key.len() - 2);
            }
            params.accumulate(key, value, explicit_list, options.duplicates);
        }
        params
    }

    fn accumulate(
        &mut self,
        key: String,
        value: String,
        explicit_list: bool,
        policy: DuplicatePolicy,
    ) {
        let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) else {
            let stored = if explicit_list || policy == DuplicatePolicy::AlwaysUseArrays {
                Value::List([value].into())
            } else {
                Value::Single(value)
            };
            self.entries.push((key, stored));
            return;
        };

        if explicit_list {
            // Explicit `key[]` elements always append, whatever the policy.
            push_or_promote(&mut entry.1, value);
            return;
        }

        match policy {
            DuplicatePolicy::KeepLast => entry.1 = Value::Single(value),
            DuplicatePolicy::KeepFirst => {}
            DuplicatePolicy::UseArrays | DuplicatePolicy::AlwaysUseArrays => {
                push_or_promote(&mut entry.1, value);
            }
        }
    }

    /// Serialize into a query string, without a leading `?`.
    ///
    /// Keys are emitted in insertion order unless `sort_keys` is set, in
    /// which case they are sorted lexicographically by their raw form. List
    /// values emit one pair per element, with a literal `[]` key suffix when
    /// `use_array_syntax` is set. An empty mapping serializes to `""`.
    pub fn serialize(&self, options: QueryOptions) -> String {
        let mut order: Vec<&(String, Value)> = self.entries.iter().collect();
        if options.sort_keys {
            order.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let mut result = String::new();
        for (key, value) in order {
            match value {
                Value::Single(v) => push_pair(&mut result, key, v, false),
                Value::List(vs) => {
                    for v in vs {
                        push_pair(&mut result, key, v, options.use_array_syntax);
                    }
                }
            }
        }
        result
    }
}

/// Append to a list value, promoting a scalar to a two-element list.
fn push_or_promote(slot: &mut Value, value: String) {
    match slot {
        Value::List(vs) => vs.push(value),
        Value::Single(first) => {
            let first = core::mem::take(first);
            *slot = Value::List([first, value].into());
        }
    }
}

fn push_pair(result: &mut String, key: &str, value: &str, array_syntax: bool) {
    if !result.is_empty() {
        result.push('&');
    }
    percent_encode_into(result, key);
    if array_syntax {
        result.push_str("[]");
    }
    result.push('=');
    percent_encode_into(result, value);
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k.as_ref(), v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::Vec;

    fn opts() -> QueryOptions {
        QueryOptions::new()
    }

    #[test]
    fn test_parse_empty() {
        assert!(QueryParams::parse("", opts()).is_empty());
    }

    #[test]
    fn test_parse_basic() {
        let params = QueryParams::parse("a=1&b=2", opts());
        assert_eq!(params.len(), 2);
        assert_eq!(params.get_str("a"), Some("1"));
        assert_eq!(params.get_str("b"), Some("2"));
    }

    #[test]
    fn test_parse_missing_equals() {
        let params = QueryParams::parse("flag&a=1", opts());
        assert_eq!(params.get_str("flag"), Some(""));
        assert_eq!(params.get_str("a"), Some("1"));
    }

    #[test]
    fn test_parse_stray_ampersands() {
        let params = QueryParams::parse("&&a=1&&&b=2&", opts());
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_decodes_plus_and_percent() {
        let params = QueryParams::parse("msg=hello+world%21", opts());
        assert_eq!(params.get_str("msg"), Some("hello world!"));
    }

    #[test]
    fn test_duplicates_keep_last() {
        let params = QueryParams::parse("a=1&a=2", opts());
        assert_eq!(params.get("a"), Some(&Value::Single("2".into())));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let params = QueryParams::parse(
            "a=1&a=2",
            opts().duplicates(DuplicatePolicy::KeepFirst),
        );
        assert_eq!(params.get("a"), Some(&Value::Single("1".into())));
    }

    #[test]
    fn test_duplicates_use_arrays() {
        let params = QueryParams::parse(
            "a=1&a=2&b=3",
            opts().duplicates(DuplicatePolicy::UseArrays),
        );
        assert_eq!(params.get("a"), Some(&Value::from(["1", "2"])));
        assert_eq!(params.get("b"), Some(&Value::Single("3".into())));
    }

    #[test]
    fn test_duplicates_always_use_arrays() {
        let params = QueryParams::parse(
            "a=1&b=2",
            opts().duplicates(DuplicatePolicy::AlwaysUseArrays),
        );
        assert_eq!(params.get("a"), Some(&Value::from(["1"])));
        assert_eq!(params.get("b"), Some(&Value::from(["2"])));
    }

    #[test]
    fn test_explicit_bracket_keys() {
        // `key[]` forces a list even under the default policy
        let params = QueryParams::parse("a[]=1&a[]=2", opts());
        assert_eq!(params.get("a"), Some(&Value::from(["1", "2"])));

        let params = QueryParams::parse("a%5B%5D=1", opts());
        assert_eq!(params.get("a"), Some(&Value::from(["1"])));
    }

    #[test]
    fn test_explicit_bracket_overrides_keep_first() {
        let params = QueryParams::parse(
            "a[]=1&a[]=2",
            opts().duplicates(DuplicatePolicy::KeepFirst),
        );
        assert_eq!(params.get("a"), Some(&Value::from(["1", "2"])));
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let params = QueryParams::parse("c=1&a=2&b=3&a=4", opts());
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(params.get_str("a"), Some("4"));
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(QueryParams::new().serialize(opts()), "");
    }

    #[test]
    fn test_serialize_basic() {
        let mut params = QueryParams::new();
        params.set("a", "1");
        params.set("b", "two words");
        assert_eq!(params.serialize(opts()), "a=1&b=two%20words");
    }

    #[test]
    fn test_serialize_sorted() {
        let mut params = QueryParams::new();
        params.set("b", "2");
        params.set("a", "1");
        assert_eq!(params.serialize(opts().sorted()), "a=1&b=2");
    }

    #[test]
    fn test_serialize_list_repeated_keys() {
        let mut params = QueryParams::new();
        params.set("a", ["1", "2"]);
        assert_eq!(params.serialize(opts()), "a=1&a=2");
    }

    #[test]
    fn test_serialize_list_array_syntax() {
        let mut params = QueryParams::new();
        params.set("a", ["1", "2"]);
        assert_eq!(params.serialize(opts().array_syntax()), "a[]=1&a[]=2");
    }

    #[test]
    fn test_round_trip_scalars() {
        let mut params = QueryParams::new();
        params.set("name", "François");
        params.set("q", "a+b & c");
        let options = opts();
        assert_eq!(QueryParams::parse(&params.serialize(options), options), params);
    }

    #[test]
    fn test_round_trip_arrays() {
        let mut params = QueryParams::new();
        params.set("a", ["a", "b"]);
        let options = opts()
            .duplicates(DuplicatePolicy::AlwaysUseArrays)
            .array_syntax();
        assert_eq!(QueryParams::parse(&params.serialize(options), options), params);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::parse("a=1&b=2", opts());
        params.set("a", "9");
        assert_eq!(params.serialize(opts()), "a=9&b=2");
    }

    #[test]
    fn test_remove() {
        let mut params = QueryParams::parse("a=1&b=2", opts());
        assert_eq!(params.remove("a"), Some(Value::Single("1".into())));
        assert_eq!(params.remove("a"), None);
        assert_eq!(params.len(), 1);
    }
}
