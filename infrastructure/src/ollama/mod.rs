//! Ollama chat API provider
//!
//! Talks to a local Ollama daemon over `POST /api/chat` with native tool
//! calling. The API is stateless, so each session keeps its own history.

mod gateway;
pub mod model_info;
mod session;
mod types;

pub use gateway::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, OllamaGateway};
pub use model_info::{discover_context_length, parse_context_length};
pub use session::OllamaSession;
