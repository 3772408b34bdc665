//! The error type returned when a URL component is rejected.

use std::fmt;
use std::borrow::Cow;

/// The kind of an [`Error`].
///
/// Every rejection is currently an invalid argument: an empty scheme or host,
/// an empty query parameter name, or a query value that does not collapse to
/// a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An argument to a constructor or `with_` method was rejected.
    InvalidArgument,
}

/// An error produced when constructing or deriving a [`Url`](crate::Url) or
/// [`QueryParameters`](crate::QueryParameters) with an invalid argument.
///
/// Errors are reported by the call that received the offending value; no
/// partially-valid value is ever returned alongside one.
///
/// # Example
///
/// ```rust
/// use fluent_url::{Url, ErrorKind};
///
/// let error = Url::new("https", "").unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(error.argument(), "host");
/// assert_eq!(error.to_string(), "invalid argument `host`: must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    argument: Cow<'static, str>,
    reason: Cow<'static, str>,
}

/// A `Result` with the error type defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid_argument<A, R>(argument: A, reason: R) -> Error
        where A: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>
    {
        let error = Error {
            kind: ErrorKind::InvalidArgument,
            argument: argument.into(),
            reason: reason.into(),
        };

        log::warn!("rejecting {}", error);
        error
    }

    pub(crate) fn empty(argument: &'static str) -> Error {
        Error::invalid_argument(argument, "must not be empty")
    }

    /// Returns the kind of this error.
    #[inline(always)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the name of the rejected argument: `"scheme"`, `"host"`, or
    /// the name of the offending query parameter.
    #[inline(always)]
    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// Returns a human readable description of why the argument was
    /// rejected.
    #[inline(always)]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => "invalid argument".fmt(f),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`: {}", self.kind, self.argument, self.reason)
    }
}

impl std::error::Error for Error { }
