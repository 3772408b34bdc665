use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that may never appear literally in any URL component.
const PATH_SET: AsciiSet = CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub trait EncodeSet {
    const SET: AsciiSet;
}

#[derive(Default, Clone, Copy)]
#[allow(non_camel_case_types)]
pub struct QUERY_ENCODE_SET;

impl EncodeSet for QUERY_ENCODE_SET {
    const SET: AsciiSet = PATH_SET
        .remove(b'?')
        .add(b'%')
        .add(b'+')
        .add(b'&')
        .add(b'=')
        .add(b'[')
        .add(b']');
}

#[derive(Default, Clone, Copy)]
#[allow(non_camel_case_types)]
pub struct USER_INFO_ENCODE_SET;

impl EncodeSet for USER_INFO_ENCODE_SET {
    const SET: AsciiSet = PATH_SET
        .add(b'%')
        .add(b'/')
        .add(b':')
        .add(b'@')
        .add(b'[')
        .add(b']')
        .add(b'\\')
        .add(b'^')
        .add(b'|');
}

pub fn percent_encode<S: EncodeSet + Default>(string: &str) -> Cow<'_, str> {
    utf8_percent_encode(string, &S::SET).into()
}

/// Percent-encodes a query key or value. When `space_as_plus` is set, spaces
/// are written as `+`; a literal `+` is always encoded, so the two never
/// collide.
pub fn query_encode(string: &str, space_as_plus: bool) -> Cow<'_, str> {
    if !space_as_plus || !string.contains(' ') {
        return percent_encode::<QUERY_ENCODE_SET>(string);
    }

    let mut encoded = String::with_capacity(string.len());
    for (i, piece) in string.split(' ').enumerate() {
        if i != 0 { encoded.push('+'); }
        encoded.push_str(&percent_encode::<QUERY_ENCODE_SET>(piece));
    }

    Cow::Owned(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_strings_are_borrowed() {
        assert!(matches!(query_encode("abc-_.~", false), Cow::Borrowed("abc-_.~")));
        assert!(matches!(percent_encode::<USER_INFO_ENCODE_SET>("bob"), Cow::Borrowed("bob")));
    }

    #[test]
    fn query_delimiters_are_encoded() {
        assert_eq!(query_encode("a&b=c", false), "a%26b%3Dc");
        assert_eq!(query_encode("1+1", false), "1%2B1");
        assert_eq!(query_encode("100%", false), "100%25");
        assert_eq!(query_encode("#top", false), "%23top");
        assert_eq!(query_encode("what?", false), "what?");
        assert_eq!(query_encode("a[]", false), "a%5B%5D");
    }

    #[test]
    fn spaces() {
        assert_eq!(query_encode("a b", false), "a%20b");
        assert_eq!(query_encode("a b", true), "a+b");
        assert_eq!(query_encode(" a+b ", true), "+a%2Bb+");
    }

    #[test]
    fn user_info() {
        assert_eq!(percent_encode::<USER_INFO_ENCODE_SET>("a:b@c/d"), "a%3Ab%40c%2Fd");
        assert_eq!(percent_encode::<USER_INFO_ENCODE_SET>("p ss%"), "p%20ss%25");
    }
}
