//! # adcraft
//!
//! Marketing content generation behind a single `POST /generate` contract.
//!
//! A request names a tool (landing page, sales page, ad copy, logo, ...) and
//! the brand context. Text tools are answered with a JSON object in the
//! tool's schema, image tools with a data-URI image and a caption. Passing a
//! prior result plus a refinement instruction asks for a modified version of
//! that result instead.
//!
//! - [`GenerationDispatcher`] is the server side: identity gate, prompt
//!   assembly, one model call, schema validation.
//! - [`GenerationClient`] is the calling side, with input validation and a
//!   cancelling timeout.
//! - [`GeminiClient`] implements [`ModelProvider`] over the Gemini REST API.
//!
//! ```no_run
//! use adcraft::{ClientConfig, GenerationClient, GenerationInputs, ToolType};
//!
//! # async fn run() -> adcraft::Result<()> {
//! let client = GenerationClient::new(ClientConfig::from_env(), "user-123");
//! let inputs = GenerationInputs::new("Acme Coffee")
//!     .with_brand("Coffee", "Commuters")
//!     .with_tone("Bold")
//!     .with_offer("Cold brew subscription");
//!
//! let page = client.generate(ToolType::LandingPage, inputs.clone()).await?;
//! let sharper = client
//!     .refine(ToolType::LandingPage, &page, "Make the CTA more urgent", inputs)
//!     .await?;
//! # let _ = sharper;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gemini;
pub mod identity;
pub mod logger;
pub mod media;
pub mod models;
pub mod provider;
pub mod schema;

#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
mod test_support;

pub use client::GenerationClient;
pub use config::{ClientConfig, Config, GeminiConfig, ServerConfig};
pub use dispatcher::{GenerationDispatcher, ModelSelection};
pub use error::{AdcraftError, Result};
pub use gemini::GeminiClient;
pub use identity::{CallerIdentity, IdentityVerifier, PresenceCheck};
pub use models::*;
pub use provider::{ContentPart, ContentRequest, ContentResponse, ModelProvider, ResponseFormat};
pub use schema::SchemaKind;
