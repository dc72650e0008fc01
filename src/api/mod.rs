//! HTTP surface of the ledger.
//!
//! - `POST /spending/` create an entry
//! - `GET /spending/` list entries
//! - `DELETE /spending/:id` delete an entry
//! - `GET /summary/monthly` monthly totals
//! - `GET /ping` liveness probe

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::{ServerConfig, run_server};
pub use state::AppState;
