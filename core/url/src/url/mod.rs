//! The [`Url`] value and its [`Authority`].

mod authority;
mod url;

pub use self::authority::*;
pub use self::url::*;
