//! Core of PromptRoute.
//!
//! This crate holds the only decision logic in the system.  It is pure: no
//! configuration, no network, no shared mutable state.
//!
//! ## Pipeline
//!
//! ```text
//! prompt ──> Dispatcher ──(classify?)──> ProviderAdapter ──> ProviderPayload
//!                                                                 │
//!                              NormalizedResult <── normalize <───┘
//! ```
//!
//! ## Modules
//!
//! - [`classifier`] -- Ordered keyword-table prompt classifier.
//! - [`dispatch`] -- Explicit/classified route tables and the [`Dispatcher`].
//! - [`payload`] -- The tagged [`ProviderPayload`] union.
//! - [`normalize`] -- Payload to canonical text.
//! - [`provider`] -- The [`ProviderAdapter`] trait implemented by backends.
//! - [`router`] -- The [`PromptRouter`] facade tying it together.
//! - [`error`] -- Kernel error types.

pub mod classifier;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod provider;
pub mod request;
pub mod router;

pub use classifier::{KeywordRule, TaskCategory, TaskClassifier, classify};
pub use dispatch::{AdapterSet, Dispatcher, ProviderRoute, RouteSource};
pub use error::{KernelError, Result};
pub use normalize::{NormalizedResult, normalize};
pub use payload::ProviderPayload;
pub use provider::{ProviderAdapter, ProviderKind};
pub use request::{Prompt, RouteRequest};
pub use router::PromptRouter;
