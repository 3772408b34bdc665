use std::fmt;
use std::borrow::Cow;

use crate::error::{Error, Result};

/// The value of a single query parameter: either one string or an ordered
/// sequence of strings for repeated, array-style parameters.
///
/// # Example
///
/// ```rust
/// use fluent_url::QueryValue;
///
/// let single = QueryValue::from("rust");
/// assert_eq!(single.as_single(), Some("rust"));
///
/// let multi = QueryValue::from(vec!["a", "b"]);
/// assert_eq!(multi.as_multi(), Some(&["a".to_string(), "b".to_string()][..]));
/// assert_eq!(multi.first(), Some("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// A parameter with exactly one value: `?name=value`.
    Single(String),
    /// A parameter with an ordered list of values.
    Multi(Vec<String>),
}

impl QueryValue {
    /// Returns the value if `self` is [`QueryValue::Single`].
    pub fn as_single(&self) -> Option<&str> {
        match self {
            QueryValue::Single(v) => Some(v),
            QueryValue::Multi(_) => None,
        }
    }

    /// Returns the values if `self` is [`QueryValue::Multi`].
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            QueryValue::Single(_) => None,
            QueryValue::Multi(v) => Some(v),
        }
    }

    /// Returns the first value, if there is one. A `Multi` may be empty.
    pub fn first(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Returns an iterator over every value in order. A `Single` yields
    /// exactly one item.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let slice = match self {
            QueryValue::Single(v) => std::slice::from_ref(v),
            QueryValue::Multi(v) => v.as_slice(),
        };

        slice.iter().map(|s| s.as_str())
    }

    /// The number of values held.
    pub fn len(&self) -> usize {
        match self {
            QueryValue::Single(_) => 1,
            QueryValue::Multi(v) => v.len(),
        }
    }

    /// Returns `true` only for a `Multi` with no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq<str> for QueryValue {
    fn eq(&self, other: &str) -> bool {
        self.as_single() == Some(other)
    }
}

impl PartialEq<&str> for QueryValue {
    fn eq(&self, other: &&str) -> bool {
        self.eq(*other)
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for QueryValue {
    fn eq(&self, other: &[S]) -> bool {
        match self.as_multi() {
            Some(v) => v.len() == other.len()
                && v.iter().zip(other).all(|(a, b)| a == b.as_ref()),
            None => false,
        }
    }
}

/// Values are joined with `,` for display purposes only; serialization in a
/// URL goes through [`QueryParameters`](crate::QueryParameters).
impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i != 0 { f.write_str(",")?; }
            f.write_str(value)?;
        }

        Ok(())
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Cow<'_, str>> for QueryValue {
    fn from(value: Cow<'_, str>) -> Self {
        QueryValue::Single(value.into_owned())
    }
}

impl<S: Into<String>> From<Vec<S>> for QueryValue {
    fn from(values: Vec<S>) -> Self {
        QueryValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

/// Conversion of a value into a [`QueryValue`]: the value _collapses_ to a
/// string or to an ordered sequence of strings.
///
/// The conversion is fallible; values with no faithful string form, such as
/// `f64::NAN`, are rejected with [`ErrorKind::InvalidArgument`]. `name` is the
/// parameter being set and is used only for error reporting.
///
/// # Provided Implementations
///
///   * **`&str`, `String`, `Cow<str>`, `char`**: the string itself.
///   * **integers**: their decimal `Display` form.
///   * **`f32`, `f64`**: their `Display` form; `NaN` and infinities fail.
///   * **`bool`**: `"1"` or `"0"`.
///   * **`Vec<T>`, `[T; N]`, `&[T]`**: a `Multi` of each element, which
///     must itself collapse to a single string.
///   * **`QueryValue`**: itself.
///   * **`&T`**: the implementation for `T`, cloning as needed.
///
/// [`ErrorKind::InvalidArgument`]: crate::ErrorKind::InvalidArgument
pub trait IntoQueryValue {
    /// Collapses `self` into a `QueryValue` for the parameter `name`.
    fn into_query_value(self, name: &str) -> Result<QueryValue>;
}

impl IntoQueryValue for QueryValue {
    #[inline(always)]
    fn into_query_value(self, _: &str) -> Result<QueryValue> {
        Ok(self)
    }
}

impl IntoQueryValue for &QueryValue {
    #[inline(always)]
    fn into_query_value(self, _: &str) -> Result<QueryValue> {
        Ok(self.clone())
    }
}

macro_rules! impl_with_to_string {
    ($($T:ty),+) => {$(
        impl IntoQueryValue for $T {
            #[inline(always)]
            fn into_query_value(self, _: &str) -> Result<QueryValue> {
                Ok(QueryValue::Single(self.to_string()))
            }
        }

        impl IntoQueryValue for &$T {
            #[inline(always)]
            fn into_query_value(self, _: &str) -> Result<QueryValue> {
                Ok(QueryValue::Single(self.to_string()))
            }
        }
    )+}
}

impl_with_to_string! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    char, String
}

impl IntoQueryValue for &str {
    #[inline(always)]
    fn into_query_value(self, _: &str) -> Result<QueryValue> {
        Ok(QueryValue::Single(self.to_string()))
    }
}

impl IntoQueryValue for Cow<'_, str> {
    #[inline(always)]
    fn into_query_value(self, _: &str) -> Result<QueryValue> {
        Ok(QueryValue::Single(self.into_owned()))
    }
}

impl IntoQueryValue for bool {
    #[inline(always)]
    fn into_query_value(self, _: &str) -> Result<QueryValue> {
        Ok(QueryValue::Single(if self { "1" } else { "0" }.to_string()))
    }
}

impl IntoQueryValue for &bool {
    #[inline(always)]
    fn into_query_value(self, name: &str) -> Result<QueryValue> {
        (*self).into_query_value(name)
    }
}

macro_rules! impl_for_float {
    ($($T:ty),+) => {$(
        impl IntoQueryValue for $T {
            fn into_query_value(self, name: &str) -> Result<QueryValue> {
                if !self.is_finite() {
                    let reason = format!("`{}` does not collapse to a string", self);
                    return Err(Error::invalid_argument(name.to_string(), reason));
                }

                Ok(QueryValue::Single(self.to_string()))
            }
        }

        impl IntoQueryValue for &$T {
            #[inline(always)]
            fn into_query_value(self, name: &str) -> Result<QueryValue> {
                (*self).into_query_value(name)
            }
        }
    )+}
}

impl_for_float!(f32, f64);

fn collapse_all<I, T>(name: &str, items: I) -> Result<QueryValue>
    where I: IntoIterator<Item = T>, T: IntoQueryValue
{
    let mut values = vec![];
    for item in items {
        match item.into_query_value(name)? {
            QueryValue::Single(v) => values.push(v),
            QueryValue::Multi(_) => {
                let reason = "nested sequences do not collapse to a string";
                return Err(Error::invalid_argument(name.to_string(), reason));
            }
        }
    }

    Ok(QueryValue::Multi(values))
}

impl<T: IntoQueryValue> IntoQueryValue for Vec<T> {
    fn into_query_value(self, name: &str) -> Result<QueryValue> {
        collapse_all(name, self)
    }
}

impl<T: IntoQueryValue, const N: usize> IntoQueryValue for [T; N] {
    fn into_query_value(self, name: &str) -> Result<QueryValue> {
        collapse_all(name, self)
    }
}

impl<'a, T> IntoQueryValue for &'a [T] where &'a T: IntoQueryValue {
    fn into_query_value(self, name: &str) -> Result<QueryValue> {
        collapse_all(name, self.iter())
    }
}

#[cfg(feature = "serde")]
mod serde {
    use std::fmt;

    use ::serde::ser::{Serialize, Serializer};
    use ::serde::de::{Deserialize, Deserializer, Error, SeqAccess, Visitor};

    use super::QueryValue;

    /// A `Single` serializes as a string, a `Multi` as a sequence of strings.
    impl Serialize for QueryValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                QueryValue::Single(v) => serializer.serialize_str(v),
                QueryValue::Multi(v) => serializer.collect_seq(v),
            }
        }
    }

    struct QueryValueVisitor;

    impl<'de> Visitor<'de> for QueryValueVisitor {
        type Value = QueryValue;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a string or a sequence of strings")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(QueryValue::Single(v.to_string()))
        }

        fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(QueryValue::Single(v))
        }

        fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(QueryValue::Single(if v { "1" } else { "0" }.to_string()))
        }

        fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(QueryValue::Single(v.to_string()))
        }

        fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(QueryValue::Single(v.to_string()))
        }

        fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
            if !v.is_finite() {
                return Err(E::custom(format_args!("`{}` does not collapse to a string", v)));
            }

            Ok(QueryValue::Single(v.to_string()))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(value) = seq.next_element::<QueryValue>()? {
                match value {
                    QueryValue::Single(value) => values.push(value),
                    QueryValue::Multi(_) => {
                        return Err(A::Error::custom("nested sequences do not collapse to a string"));
                    }
                }
            }

            Ok(QueryValue::Multi(values))
        }
    }

    impl<'de> Deserialize<'de> for QueryValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(QueryValueVisitor)
        }
    }
}
