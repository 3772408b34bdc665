//! Serialization options.
//!
//! A [`Config`] controls how the query part of a URL is rendered by
//! [`Url::render()`](crate::Url::render()) and
//! [`QueryParameters::render()`](crate::QueryParameters::render()). The
//! `Display` implementations always use [`Config::default()`].
//!
//! With the `serde` feature enabled, `Config` can be deserialized from any
//! format; with the `figment` feature enabled, [`Config::figment()`] provides
//! the conventional configuration sources.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// How a parameter with a [`QueryValue::Multi`](crate::QueryValue::Multi)
/// value is written into a query string.
///
/// | style      | `tag = ["a", "b"]` renders as |
/// |------------|-------------------------------|
/// | `Repeated` | `tag=a&tag=b`                 |
/// | `Brackets` | `tag[]=a&tag[]=b`             |
/// | `Indexed`  | `tag[0]=a&tag[1]=b`           |
///
/// An empty `Multi` renders nothing in every style.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArrayStyle {
    /// The key is repeated once per value: `"repeated"`.
    #[default]
    Repeated,
    /// The key is suffixed with `[]`: `"brackets"`.
    Brackets,
    /// The key is suffixed with the value's index: `"indexed"`.
    Indexed,
}

impl ArrayStyle {
    fn as_str(&self) -> &'static str {
        match self {
            ArrayStyle::Repeated => "repeated",
            ArrayStyle::Brackets => "brackets",
            ArrayStyle::Indexed => "indexed",
        }
    }
}

impl FromStr for ArrayStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let style = match &*s.to_ascii_lowercase() {
            "repeated" => ArrayStyle::Repeated,
            "brackets" => ArrayStyle::Brackets,
            "indexed" => ArrayStyle::Indexed,
            _ => return Err("an array style (repeated, brackets, indexed)")
        };

        Ok(style)
    }
}

impl fmt::Display for ArrayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Options for rendering URLs and query strings.
///
/// # Example
///
/// ```rust
/// use fluent_url::{Url, Config, ArrayStyle};
///
/// let url = Url::new("https", "example.com")?
///     .with_query_parameter("tag", ["a b", "c"])?;
///
/// assert_eq!(url.to_string(), "https://example.com?tag=a%20b&tag=c");
///
/// let config = Config { array_style: ArrayStyle::Brackets, space_as_plus: true };
/// assert_eq!(url.render(&config), "https://example.com?tag[]=a+b&tag[]=c");
/// # Ok::<(), fluent_url::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// How sequence-valued parameters are written. **(default: `repeated`)**
    pub array_style: ArrayStyle,
    /// Whether spaces in query keys and values are written as `+` instead of
    /// `%20`. **(default: `false`)**
    pub space_as_plus: bool,
}

#[cfg(feature = "figment")]
mod provider {
    use figment::{Figment, Profile, Provider, Metadata, Error};
    use figment::providers::{Serialized, Toml, Env, Format};
    use figment::value::{Map, Dict};

    use super::Config;

    impl Config {
        /// Returns the default provider figment: [`Config::default()`],
        /// merged with `FluentUrl.toml` (or the file named by the
        /// `FLUENT_URL_CONFIG` environment variable), merged with environment
        /// variables prefixed with `FLUENT_URL_`.
        ///
        /// # Example
        ///
        /// ```rust
        /// use fluent_url::Config;
        ///
        /// let config: Config = Config::figment().extract().unwrap();
        /// # let _ = config;
        /// ```
        pub fn figment() -> Figment {
            Figment::from(Config::default())
                .merge(Toml::file(Env::var_or("FLUENT_URL_CONFIG", "FluentUrl.toml")))
                .merge(Env::prefixed("FLUENT_URL_").ignore(&["CONFIG"]))
        }

        /// Extracts a `Config` from `provider`.
        pub fn from<T: Provider>(provider: T) -> Result<Config, Error> {
            let config = Figment::from(provider).extract::<Config>()?;
            log::debug!("extracted url config: {:?}", config);
            Ok(config)
        }
    }

    impl Provider for Config {
        fn metadata(&self) -> Metadata {
            Metadata::named("fluent_url Config")
        }

        fn data(&self) -> Result<Map<Profile, Dict>, Error> {
            Serialized::defaults(self).data()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.array_style, ArrayStyle::Repeated);
        assert!(!config.space_as_plus);
    }

    #[test]
    fn array_style_from_str() {
        assert_eq!("repeated".parse(), Ok(ArrayStyle::Repeated));
        assert_eq!("Brackets".parse(), Ok(ArrayStyle::Brackets));
        assert_eq!("INDEXED".parse(), Ok(ArrayStyle::Indexed));
        assert!("php".parse::<ArrayStyle>().is_err());
    }

    #[test]
    fn array_style_display_round_trips() {
        for style in [ArrayStyle::Repeated, ArrayStyle::Brackets, ArrayStyle::Indexed] {
            assert_eq!(style.to_string().parse(), Ok(style));
        }
    }
}
