//! Building blocks of slimsql: the `@name` statement compiler, connection string parsing,
//! dynamic values, the shape of driver responses and the contract drivers implement.
mod as_value;
mod connection_config;
mod connection_string;
mod driver;
mod error;
mod parse;
mod prepared;
mod query;
mod util;
mod value;

pub use ::anyhow::Context;
pub use ::indoc;
pub use as_value::*;
pub use connection_config::*;
pub use connection_string::*;
pub use driver::*;
pub use error::*;
pub use parse::*;
pub use prepared::*;
pub use query::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
