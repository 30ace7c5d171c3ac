//! Executor adapters.
//!
//! - [`ReqwestExecutor`]: live network round trips
//! - [`HandlerExecutor`]: in-process calls into a `tower::Service`

mod handler_executor;
mod reqwest_executor;

pub use handler_executor::HandlerExecutor;
pub use reqwest_executor::ReqwestExecutor;
