use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::config::{Config, ArrayStyle};
use crate::encoding::query_encode;
use crate::error::{Error, Result};
use crate::query::{QueryValue, IntoQueryValue};

/// An ordered, immutable map from query parameter names to [`QueryValue`]s.
///
/// # Semantics
///
///   * **Names are unique.** Setting a name that is already present replaces
///     its value; it never appends to or merges with the old value. The
///     parameter keeps its original position.
///   * **Order is preserved.** Parameters iterate, compare, and serialize in
///     insertion order.
///   * **Values never change in place.** Every method that alters the
///     parameters takes `&self` and returns a new `QueryParameters`.
///   * **Removing a missing name is a no-op**, not an error.
///
/// # Example
///
/// ```rust
/// use fluent_url::QueryParameters;
///
/// let empty = QueryParameters::new();
/// let query = empty.with("q", "rust")?.with("page", 2)?;
/// assert!(empty.is_empty());
/// assert_eq!(query.to_string(), "q=rust&page=2");
///
/// let query = query.with("q", "url")?;
/// assert_eq!(query.to_string(), "q=url&page=2");
///
/// let query = query.without(["page", "missing"]);
/// assert_eq!(query.to_string(), "q=url");
/// # Ok::<(), fluent_url::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParameters {
    params: IndexMap<String, QueryValue>,
}

impl QueryParameters {
    /// Creates an empty set of query parameters.
    #[inline]
    pub fn new() -> QueryParameters {
        QueryParameters::default()
    }

    /// Builds parameters from `(name, value)` pairs. A name appearing more
    /// than once keeps its first position and its last value.
    ///
    /// Fails if any name is empty or any value does not collapse to a
    /// string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluent_url::QueryParameters;
    ///
    /// let query = QueryParameters::try_from_iter([("a", "1"), ("b", "2"), ("a", "3")])?;
    /// assert_eq!(query.to_string(), "a=3&b=2");
    ///
    /// assert!(QueryParameters::try_from_iter([("", "1")]).is_err());
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    pub fn try_from_iter<I, N, V>(iter: I) -> Result<QueryParameters>
        where I: IntoIterator<Item = (N, V)>, N: Into<String>, V: IntoQueryValue
    {
        QueryParameters::new().with_all(iter)
    }

    /// Returns the value of the parameter `name`, if it is present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluent_url::{QueryParameters, QueryValue};
    ///
    /// let query = QueryParameters::new().with("ids", [1, 2])?;
    /// assert_eq!(query.get("ids"), Some(&QueryValue::from(vec!["1", "2"])));
    /// assert_eq!(query.get("missing"), None);
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    #[inline]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.params.get(name)
    }

    /// Returns `true` if a parameter named `name` is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns a copy of `self` with the parameter `name` set to `value`,
    /// replacing any existing value for `name`.
    ///
    /// Fails if `name` is empty or `value` does not collapse to a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluent_url::QueryParameters;
    ///
    /// let query = QueryParameters::new().with("a", "1")?.with("a", "2")?;
    /// assert_eq!(query.get("a").unwrap(), "2");
    /// assert_eq!(query.len(), 1);
    ///
    /// assert!(query.with("", "x").is_err());
    /// assert!(query.with("ratio", f64::NAN).is_err());
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    pub fn with<N, V>(&self, name: N, value: V) -> Result<QueryParameters>
        where N: Into<String>, V: IntoQueryValue
    {
        let mut params = self.params.clone();
        insert(&mut params, name.into(), value)?;
        Ok(QueryParameters { params })
    }

    /// Returns a copy of `self` with every `(name, value)` pair in `iter`
    /// set, in order, as if by repeated calls to [`with()`](Self::with).
    /// Parameters not named in `iter` are kept.
    ///
    /// Fails, leaving nothing changed, if any name is empty or any value does
    /// not collapse to a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluent_url::QueryParameters;
    ///
    /// let query = QueryParameters::new().with("a", "1")?;
    /// let query = query.with_all([("b", "2"), ("a", "3")])?;
    /// assert_eq!(query.to_string(), "a=3&b=2");
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    pub fn with_all<I, N, V>(&self, iter: I) -> Result<QueryParameters>
        where I: IntoIterator<Item = (N, V)>, N: Into<String>, V: IntoQueryValue
    {
        let mut params = self.params.clone();
        for (name, value) in iter {
            insert(&mut params, name.into(), value)?;
        }

        Ok(QueryParameters { params })
    }

    /// Returns a copy of `self` without the parameters in `names`. Names that
    /// are not present are ignored. The remaining parameters keep their
    /// order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluent_url::QueryParameters;
    ///
    /// let query = QueryParameters::try_from_iter([("a", "1"), ("b", "2"), ("c", "3")])?;
    /// assert_eq!(query.without(["b"]).to_string(), "a=1&c=3");
    /// assert_eq!(query.without(["x"]), query);
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    pub fn without<I, S>(&self, names: I) -> QueryParameters
        where I: IntoIterator<Item = S>, S: AsRef<str>
    {
        let mut params = self.params.clone();
        for name in names {
            let name = name.as_ref();
            if params.shift_remove(name).is_none() {
                log::debug!("query parameter `{}` not present; nothing to remove", name);
            }
        }

        QueryParameters { params }
    }

    /// Returns an empty set of parameters.
    #[inline]
    pub fn without_all(&self) -> QueryParameters {
        QueryParameters::new()
    }

    /// The number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over `(name, value)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> + '_ {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns an iterator over the parameter names in insertion order.
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.params.keys().map(|k| k.as_str())
    }

    /// Returns the parameters as an ordered list of owned pairs.
    pub fn to_vec(&self) -> Vec<(String, QueryValue)> {
        self.params.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Renders the parameters as a percent-encoded query string, without the
    /// leading `?`, according to `config`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluent_url::{QueryParameters, Config, ArrayStyle};
    ///
    /// let query = QueryParameters::new().with("tag", ["x", "y"])?;
    /// let config = Config { array_style: ArrayStyle::Indexed, ..Config::default() };
    /// assert_eq!(query.render(&config), "tag[0]=x&tag[1]=y");
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    pub fn render(&self, config: &Config) -> String {
        Rendered { query: self, config }.to_string()
    }

    /// Whether rendering writes at least one `name=value` pair. Parameters
    /// whose only values are empty sequences write nothing.
    pub(crate) fn has_pairs(&self) -> bool {
        self.params.values().any(|value| !value.is_empty())
    }

    pub(crate) fn write_query<W: Write>(&self, out: &mut W, config: &Config) -> fmt::Result {
        let plus = config.space_as_plus;
        let mut first = true;
        for (name, value) in &self.params {
            let key = query_encode(name, plus);
            for (i, v) in value.iter().enumerate() {
                if !first { out.write_char('&')?; }
                first = false;

                match (value, config.array_style) {
                    (QueryValue::Single(_), _) | (_, ArrayStyle::Repeated) => out.write_str(&key)?,
                    (_, ArrayStyle::Brackets) => write!(out, "{}[]", key)?,
                    (_, ArrayStyle::Indexed) => write!(out, "{}[{}]", key, i)?,
                }

                write!(out, "={}", query_encode(v, plus))?;
            }
        }

        Ok(())
    }
}

struct Rendered<'a> {
    query: &'a QueryParameters,
    config: &'a Config,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.query.write_query(f, self.config)
    }
}

fn insert<V>(params: &mut IndexMap<String, QueryValue>, name: String, value: V) -> Result<()>
    where V: IntoQueryValue
{
    if name.is_empty() {
        return Err(Error::empty("query parameter name"));
    }

    let value = value.into_query_value(&name)?;
    params.insert(name, value);
    Ok(())
}

/// Equality is order-sensitive: two sets of parameters are equal only if
/// they serialize identically.
impl PartialEq for QueryParameters {
    fn eq(&self, other: &QueryParameters) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for QueryParameters { }

impl Hash for QueryParameters {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self.iter() {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<'a> IntoIterator for &'a QueryParameters {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = indexmap::map::Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl fmt::Display for QueryParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_query(f, &Config::default())
    }
}

#[cfg(feature = "serde")]
mod serde {
    use std::fmt;

    use ::serde::ser::{Serialize, Serializer, SerializeMap};
    use ::serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

    use super::{QueryParameters, insert};
    use crate::query::QueryValue;

    impl Serialize for QueryParameters {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(k, v)?;
            }

            map.end()
        }
    }

    struct QueryParametersVisitor;

    impl<'de> Visitor<'de> for QueryParametersVisitor {
        type Value = QueryParameters;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a map of query parameter names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut query = QueryParameters::new();
            while let Some((name, value)) = access.next_entry::<String, QueryValue>()? {
                insert(&mut query.params, name, value).map_err(de::Error::custom)?;
            }

            Ok(query)
        }
    }

    impl<'de> Deserialize<'de> for QueryParameters {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(QueryParametersVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn query(pairs: &[(&str, &str)]) -> QueryParameters {
        QueryParameters::try_from_iter(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn send_and_sync() {
        fn assert<T: Send + Sync>() {}
        assert::<QueryParameters>();
    }

    #[test]
    fn with_overrides_in_place() {
        let q = query(&[("a", "1"), ("b", "2")]);
        let q2 = q.with("a", "3").unwrap();
        assert_eq!(q2.to_string(), "a=3&b=2");
        assert_eq!(q2.get("a").unwrap(), "3");
        assert_eq!(q.get("a").unwrap(), "1");
    }

    #[test]
    fn with_replaces_single_with_multi() {
        let q = query(&[("a", "1")]).with("a", vec!["2", "3"]).unwrap();
        assert_eq!(q.get("a"), Some(&QueryValue::from(vec!["2", "3"])));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn with_rejects_empty_name() {
        let error = QueryParameters::new().with("", "x").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(error.argument(), "query parameter name");
    }

    #[test]
    fn with_all_is_atomic() {
        let q = query(&[("a", "1")]);
        let result = q.with_all(vec![("b", 1.0), ("c", f64::NAN)]);
        assert!(result.is_err());
        assert_eq!(q, query(&[("a", "1")]));
    }

    #[test]
    fn without_keeps_order() {
        let q = query(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        assert_eq!(q.without(["b", "nope"]).names().collect::<Vec<_>>(), ["a", "c", "d"]);
        assert_eq!(q.without(Vec::<String>::new()), q);
        assert!(q.without_all().is_empty());
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn equality_is_ordered() {
        assert_eq!(query(&[("a", "1"), ("b", "2")]), query(&[("a", "1"), ("b", "2")]));
        assert_ne!(query(&[("a", "1"), ("b", "2")]), query(&[("b", "2"), ("a", "1")]));
    }

    #[test]
    fn to_vec_and_iter() {
        let q = query(&[("x", "1"), ("y", "2")]);
        let pairs: Vec<_> = q.iter().map(|(k, v)| (k, v.first().unwrap())).collect();
        assert_eq!(pairs, [("x", "1"), ("y", "2")]);
        assert_eq!(q.to_vec()[1], ("y".to_string(), QueryValue::from("2")));
        assert_eq!((&q).into_iter().count(), 2);
    }

    #[test]
    fn render_array_styles() {
        let q = query(&[("q", "a b")]).with("tag", ["x", "y"]).unwrap();
        let render = |array_style, space_as_plus| q.render(&Config { array_style, space_as_plus });

        assert_eq!(q.to_string(), "q=a%20b&tag=x&tag=y");
        assert_eq!(render(ArrayStyle::Repeated, true), "q=a+b&tag=x&tag=y");
        assert_eq!(render(ArrayStyle::Brackets, false), "q=a%20b&tag[]=x&tag[]=y");
        assert_eq!(render(ArrayStyle::Indexed, false), "q=a%20b&tag[0]=x&tag[1]=y");
    }

    #[test]
    fn render_edge_cases() {
        assert_eq!(QueryParameters::new().to_string(), "");
        assert_eq!(query(&[("empty", "")]).to_string(), "empty=");

        let q = QueryParameters::new()
            .with("none", Vec::<String>::new()).unwrap()
            .with("a", "1").unwrap();
        assert_eq!(q.to_string(), "a=1");
        assert!(q.has_pairs());
        assert!(!q.without(["a"]).has_pairs());
        assert!(!QueryParameters::new().has_pairs());

        let q = query(&[("k&=", "v&=#")]);
        assert_eq!(q.to_string(), "k%26%3D=v%26%3D%23");
    }
}
