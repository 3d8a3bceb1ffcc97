//! Image engine capability and its Cloudflare Workers AI binding.
//!
//! [`ImageEngine`] is the seam the API layer depends on; [`WorkersAiClient`]
//! is the production implementation that submits multipart generation
//! requests to the FLUX.2 [dev] model over the Workers AI REST API.

pub mod client;
pub mod workers_ai;

pub use client::{run_generation, EngineError, GenerationOutcome, ImageEngine};
pub use workers_ai::{WorkersAiClient, WorkersAiConfig};
