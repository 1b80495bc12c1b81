//! HTTP endpoint that scores practice calls for a voice agent.
//!
//! A POST carrying a call transcript and session context is run through two
//! sequential LLM calls: a scoring engine that answers in JSON and a feedback
//! engine that answers in prose. The results are reshaped into flat narrator
//! variables a voice agent can read aloud.
//!
//! # Example
//!
//! ```rust,no_run
//! use repscore_models::ResponsesClient;
//! use repscore_server::{ApiState, RepscoreConfig, create_router};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(RepscoreConfig::load(None)?);
//!     let client = Arc::new(ResponsesClient::new(config.provider().clone()));
//!     let app = create_router(ApiState::new(client, config.clone()));
//!
//!     let listener = tokio::net::TcpListener::bind(config.server().bind_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod pipeline;
mod telemetry;

pub use api::{ApiState, EVALUATE_PATH, create_router};
pub use config::{Prompts, RepscoreConfig, ServerSettings};
pub use pipeline::{Evaluation, evaluate_session};
pub use telemetry::init_tracing;
