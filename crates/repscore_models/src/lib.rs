//! LLM provider client for Repscore.
//!
//! Both engines (scoring and feedback) are single calls to the OpenAI
//! Responses API. This crate provides the request type, the provider
//! configuration, and the [`ResponsesDriver`] trait the request handler is
//! written against, with [`ResponsesClient`] as the HTTP implementation.
//!
//! # Example
//!
//! ```no_run
//! use repscore_models::{ProviderConfig, ResponsesClient, ResponsesDriver, ResponsesRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig::builder()
//!     .api_key(Some("sk-test".to_string()))
//!     .build()?;
//! let client = ResponsesClient::new(config);
//!
//! let request = ResponsesRequest::new("gpt-4o-mini", "Reply with OK.", "ping")?;
//! let envelope = client.create_response(&request).await?;
//! println!("{}", envelope);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod driver;
mod request;

pub use client::ResponsesClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_MODEL, ProviderConfig, ProviderConfigBuilder};
pub use driver::ResponsesDriver;
pub use request::{ResponsesRequest, ResponsesRequestBuilder};
