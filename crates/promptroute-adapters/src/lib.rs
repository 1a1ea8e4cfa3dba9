//! Provider adapters for PromptRoute.
//!
//! Each adapter implements [`promptroute_kernel::ProviderAdapter`] over one
//! or two hosted model APIs.  Adapters never fail: transport problems,
//! missing credentials and undecodable replies all come back as
//! [`promptroute_kernel::ProviderPayload::ProviderError`].
//!
//! | Adapter | Backend |
//! |---------|---------|
//! | [`CodeAdapter`] | Anthropic Messages API |
//! | [`ConversationalAdapter`] | OpenAI Chat Completions (delegates image prompts) |
//! | [`ImageAdapter`] | Gemini expansion, then OpenAI Images |
//! | [`ReasoningAdapter`] | Gemini via its OpenAI-compatible endpoint |

mod backend;
pub mod code;
pub mod config;
pub mod conversational;
pub mod decode;
pub mod error;
pub mod image;
pub mod reasoning;

use std::sync::Arc;

use promptroute_kernel::{AdapterSet, ProviderAdapter};

pub use code::CodeAdapter;
pub use config::{ProviderSettings, RouterConfig, read_config_file};
pub use conversational::ConversationalAdapter;
pub use error::{ConfigError, Result};
pub use image::ImageAdapter;
pub use reasoning::ReasoningAdapter;

/// Build the full adapter set from configuration.
///
/// The conversational adapter shares the image adapter instance for its
/// image-keyword delegation.
pub fn build_adapter_set(config: &RouterConfig) -> AdapterSet {
    let image: Arc<dyn ProviderAdapter> = Arc::new(ImageAdapter::new(config));

    AdapterSet {
        code: Arc::new(CodeAdapter::new(&config.anthropic)),
        conversational: Arc::new(ConversationalAdapter::new(
            &config.openai,
            Arc::clone(&image),
        )),
        image,
        reasoning: Arc::new(ReasoningAdapter::new(&config.gemini)),
    }
}
