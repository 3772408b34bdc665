//! The query part of a URL: [`QueryParameters`] and its [`QueryValue`]s.

mod value;
mod parameters;

pub use self::value::*;
pub use self::parameters::*;
