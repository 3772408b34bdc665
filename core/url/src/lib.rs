#![warn(rust_2018_idioms)]

//! Immutable URL values with a fluent, copy-on-write API.
//!
//! A [`Url`] is built from a scheme and a host and then refined with `with_`
//! and `without_` methods. Each method returns a new `Url`; the original is
//! never modified. Query parameters live in an ordered [`QueryParameters`]
//! container whose values are either a single string or a sequence of
//! strings ([`QueryValue`]). Anything implementing [`IntoQueryValue`],
//! including integers, booleans, and arrays of them, can be used as a value.
//!
//! ```rust
//! use fluent_url::Url;
//!
//! let url = Url::new("https", "example.com")?
//!     .with_path("/search")
//!     .with_query_parameter("q", "rust url")?
//!     .with_query_parameter("page", 2)?
//!     .with_fragment("results");
//!
//! assert_eq!(url.to_string(), "https://example.com/search?q=rust%20url&page=2#results");
//!
//! let next = url.with_query_parameter("page", 3)?;
//! assert_eq!(next.query_parameter("page").unwrap(), "3");
//! assert_eq!(url.query_parameter("page").unwrap(), "2");
//! # Ok::<(), fluent_url::Error>(())
//! ```
//!
//! # Features
//!
//! | feature   | enables                                                   |
//! |-----------|-----------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` for query values and [`Config`] |
//! | `figment` | `Config::figment()` and `figment::Provider` for `Config`    |
//!
//! # Logging
//!
//! Rejected arguments are logged at `warn` through the [`log`] facade;
//! implicit authority creation and query replacement are logged at `trace`.
//! Nothing is printed unless the application installs a logger.

mod error;
mod encoding;
mod url;

pub mod config;
pub mod query;

#[doc(inline)]
pub use crate::url::{Url, Authority};
#[doc(inline)]
pub use crate::query::{QueryParameters, QueryValue, IntoQueryValue};
#[doc(inline)]
pub use crate::config::{Config, ArrayStyle};
pub use crate::error::{Error, ErrorKind, Result};
