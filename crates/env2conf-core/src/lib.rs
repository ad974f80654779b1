//! # env2conf-core
//!
//! Turns flat `KEY=VALUE` pairs into a nested document and prints it as JSON,
//! YAML, or TOML.
//!
//! Keys are dotted paths; a bracketed index turns a segment into an array, so
//! `config.servers[0].host=a` and `config.servers[1].host=b` build an array of
//! two maps under `config.servers`. Values are typed on the way in: integers,
//! floats, booleans, `null`, `{}` and `[]` are recognized, and a value wrapped
//! in double quotes stays a string.
//!
//! ## Quick start
//!
//! ```rust
//! use env2conf_core::{convert, Config, Format};
//!
//! let config = Config::new("app", Format::Json);
//! let pairs = [("app.name", "svc"), ("app.port", "8080"), ("HOME", "/root")];
//! let json = convert(&config, pairs).unwrap();
//! assert_eq!(json, "{\n  \"app\": {\n    \"port\": 8080,\n    \"name\": \"svc\"\n  }\n}\n");
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tagged union and `Map`
//! - [`array`]: `SparseArray`, the auto-growing array
//! - [`sanitize`]: raw string → typed value
//! - [`path`]: dotted/bracketed path parser
//! - [`document`]: `Document` / `Builder`
//! - [`render`]: `Format` and the JSON/YAML renderers
//! - [`toml`]: TOML encoder
//! - [`config`]: prefix selection and output format
//! - [`error`]: error types

pub mod array;
pub mod config;
pub mod document;
pub mod error;
pub mod path;
pub mod render;
pub mod sanitize;
pub mod toml;
pub mod value;

pub use array::{ElementType, SparseArray};
pub use config::Config;
pub use document::{Builder, Document};
pub use error::ConfError;
pub use render::{render, Format};
pub use sanitize::sanitize;
pub use value::{Kind, Map, Value};

/// Build a document from `pairs` and render it as `config.format`.
pub fn convert<I, K, V>(config: &Config, pairs: I) -> error::Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Document::build(config, pairs)?.render(config.format)
}
