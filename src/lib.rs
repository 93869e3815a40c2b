// packconf - fluent configuration builder for webpack-style bundlers
//
// One session = one ConfigBuilder: chained mutators accumulate caller
// configuration, finalize() back-fills every untouched default category
// exactly once and returns the finished record.

pub mod builder;
pub mod defaults;
pub mod models;
pub mod utils;

pub use builder::ConfigBuilder;
pub use defaults::{DefaultCategory, DefaultRegistry};
pub use models::{ConfigRecord, Devtool, Fallback, Mode, Output};
pub use utils::{ConfigError, Result};
