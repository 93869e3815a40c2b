// Shared utilities module
pub mod errors;
pub mod logging;
pub mod paths;

pub use errors::*;
pub use logging::*;
pub use paths::*;
