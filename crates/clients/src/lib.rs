//! HTTP clients for the external generation services.
//!
//! [`LlmClient`] and [`ImageClient`] are the trait seams the API layer
//! depends on; [`HttpLlmClient`] and [`HttpImageClient`] are the
//! production implementations, speaking the OpenAI-compatible wire format
//! over `reqwest`. Handlers receive the traits as `Arc<dyn ...>` so tests
//! can substitute in-memory fakes.

pub mod error;
pub mod image;
pub mod llm;

pub use error::ClientError;
pub use image::{HttpImageClient, ImageClient, ImageRequest};
pub use llm::{ChatMessage, CompletionOptions, HttpLlmClient, LlmClient, TextStream};
