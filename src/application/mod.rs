// Application layer - use cases shared by the HTTP API, the CLI and the io module.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
