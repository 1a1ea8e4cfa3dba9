//! Dispatch policy.
//!
//! Picks the adapter for a request:
//!
//! 1. An explicit provider identifier is looked up in [`EXPLICIT_ROUTES`].
//!    Unknown identifiers are rejected with
//!    [`KernelError::UnknownProvider`]; classification is *not* consulted.
//! 2. Otherwise the prompt is classified and the category is looked up in
//!    [`CATEGORY_ROUTES`].  A category missing from the table falls back to
//!    the code adapter.
//!
//! The policy is stateless; [`Dispatcher`] only holds the adapter handles.

use std::sync::Arc;

use crate::classifier::{TaskCategory, TaskClassifier};
use crate::error::{KernelError, Result};
use crate::provider::{ProviderAdapter, ProviderKind};
use crate::request::RouteRequest;

// ---------------------------------------------------------------------------
// Route tables
// ---------------------------------------------------------------------------

/// An adapter slot together with the label reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderRoute {
    pub kind: ProviderKind,
    pub label: &'static str,
}

impl ProviderRoute {
    const fn new(kind: ProviderKind, label: &'static str) -> Self {
        Self { kind, label }
    }
}

/// Known explicit provider identifiers.  `deepseek` aliases the code
/// adapter under its own label.
pub const EXPLICIT_ROUTES: &[(&str, ProviderRoute)] = &[
    ("claude", ProviderRoute::new(ProviderKind::Code, "claude")),
    ("deepseek", ProviderRoute::new(ProviderKind::Code, "deepseek")),
    ("chatgpt", ProviderRoute::new(ProviderKind::Conversational, "chatgpt")),
    ("gemini", ProviderRoute::new(ProviderKind::Image, "gemini + Dall-E")),
    ("gemini-llama", ProviderRoute::new(ProviderKind::Reasoning, "llama")),
];

/// Default route for each classified category.
pub const CATEGORY_ROUTES: &[(TaskCategory, ProviderRoute)] = &[
    (TaskCategory::Coding, ProviderRoute::new(ProviderKind::Code, "claude")),
    (
        TaskCategory::Conversational,
        ProviderRoute::new(ProviderKind::Conversational, "chatgpt"),
    ),
    (
        TaskCategory::ImageGeneration,
        ProviderRoute::new(ProviderKind::Image, "gemini + Dall-E"),
    ),
    (
        TaskCategory::LogicalReasoning,
        ProviderRoute::new(ProviderKind::Reasoning, "llama"),
    ),
];

/// Route used when a category has no table entry.
pub const FALLBACK_ROUTE: ProviderRoute = ProviderRoute::new(ProviderKind::Code, "claude");

/// Look up an explicit provider identifier.
///
/// Besides the provider ids in [`EXPLICIT_ROUTES`], a category name
/// (`coding`, `conversational`, `image_generation`, `logical_reasoning`)
/// selects that category's default route.
pub fn explicit_route(provider: &str) -> Option<ProviderRoute> {
    EXPLICIT_ROUTES
        .iter()
        .find(|(id, _)| *id == provider)
        .map(|(_, route)| *route)
        .or_else(|| TaskCategory::from_name(provider).map(category_route))
}

/// Look up the default route for a category.
pub fn category_route(category: TaskCategory) -> ProviderRoute {
    CATEGORY_ROUTES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, route)| *route)
        .unwrap_or(FALLBACK_ROUTE)
}

/// How a route was chosen, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// The caller named the provider.
    Explicit,
    /// The classifier picked the category.
    Classified(TaskCategory),
}

/// Resolve the route for a request without touching any adapter.
pub fn resolve(
    request: &RouteRequest,
    classifier: &TaskClassifier,
) -> Result<(ProviderRoute, RouteSource)> {
    if let Some(provider) = request.explicit_provider() {
        return explicit_route(provider)
            .map(|route| (route, RouteSource::Explicit))
            .ok_or_else(|| KernelError::UnknownProvider {
                provider: provider.to_owned(),
            });
    }

    let category = classifier.classify(request.prompt().as_str());
    Ok((category_route(category), RouteSource::Classified(category)))
}

// ---------------------------------------------------------------------------
// Adapter set
// ---------------------------------------------------------------------------

/// One adapter per [`ProviderKind`].
#[derive(Clone)]
pub struct AdapterSet {
    pub code: Arc<dyn ProviderAdapter>,
    pub conversational: Arc<dyn ProviderAdapter>,
    pub image: Arc<dyn ProviderAdapter>,
    pub reasoning: Arc<dyn ProviderAdapter>,
}

impl AdapterSet {
    /// The adapter filling the given slot.
    pub fn get(&self, kind: ProviderKind) -> &Arc<dyn ProviderAdapter> {
        match kind {
            ProviderKind::Code => &self.code,
            ProviderKind::Conversational => &self.conversational,
            ProviderKind::Image => &self.image,
            ProviderKind::Reasoning => &self.reasoning,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Applies the dispatch policy over a concrete [`AdapterSet`].
#[derive(Clone)]
pub struct Dispatcher {
    adapters: AdapterSet,
    classifier: TaskClassifier,
}

impl Dispatcher {
    /// Create a dispatcher with the built-in classifier.
    pub fn new(adapters: AdapterSet) -> Self {
        Self {
            adapters,
            classifier: TaskClassifier::default(),
        }
    }

    /// Select the adapter and label for a request.
    pub fn dispatch(
        &self,
        request: &RouteRequest,
    ) -> Result<(Arc<dyn ProviderAdapter>, &'static str)> {
        let (route, source) = resolve(request, &self.classifier)?;

        tracing::info!(
            provider = %route.kind,
            label = route.label,
            source = ?source,
            "request dispatched"
        );

        Ok((Arc::clone(self.adapters.get(route.kind)), route.label))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn req(prompt: &str, provider: Option<&str>) -> RouteRequest {
        RouteRequest::new(prompt, provider.map(str::to_owned)).unwrap()
    }

    #[test]
    fn explicit_ids_map_to_expected_slots() {
        let cases = [
            ("claude", ProviderKind::Code, "claude"),
            ("deepseek", ProviderKind::Code, "deepseek"),
            ("chatgpt", ProviderKind::Conversational, "chatgpt"),
            ("gemini", ProviderKind::Image, "gemini + Dall-E"),
            ("gemini-llama", ProviderKind::Reasoning, "llama"),
        ];
        for (id, kind, label) in cases {
            let route = explicit_route(id).unwrap();
            assert_eq!(route.kind, kind, "{id}");
            assert_eq!(route.label, label, "{id}");
        }
    }

    #[test]
    fn explicit_skips_classifier() {
        let (route, source) = resolve(&req("I feel sad", Some("claude")), &TaskClassifier::default())
            .unwrap();
        assert_eq!(route.kind, ProviderKind::Code);
        assert_eq!(source, RouteSource::Explicit);
    }

    #[test]
    fn unknown_explicit_is_rejected_not_classified() {
        let err = resolve(&req("write code", Some("bard")), &TaskClassifier::default())
            .unwrap_err();
        assert_eq!(
            err,
            KernelError::UnknownProvider {
                provider: "bard".into()
            }
        );
    }

    #[test]
    fn category_names_are_explicit_ids() {
        let (route, source) =
            resolve(&req("hello there", Some("coding")), &TaskClassifier::default()).unwrap();
        assert_eq!(route, ProviderRoute::new(ProviderKind::Code, "claude"));
        assert_eq!(source, RouteSource::Explicit);

        let route = explicit_route("logical_reasoning").unwrap();
        assert_eq!(route.kind, ProviderKind::Reasoning);
    }

    #[test]
    fn explicit_ids_are_case_sensitive() {
        assert!(explicit_route("Claude").is_none());
    }

    #[test]
    fn every_category_has_a_route() {
        for category in [
            TaskCategory::Coding,
            TaskCategory::Conversational,
            TaskCategory::ImageGeneration,
            TaskCategory::LogicalReasoning,
        ] {
            assert!(CATEGORY_ROUTES.iter().any(|(c, _)| *c == category));
        }
    }

    #[test]
    fn classified_routes() {
        let classifier = TaskClassifier::default();
        let (route, source) = resolve(&req("write a function", None), &classifier).unwrap();
        assert_eq!(route, ProviderRoute::new(ProviderKind::Code, "claude"));
        assert_eq!(source, RouteSource::Classified(TaskCategory::Coding));

        let (route, _) = resolve(&req("hello there", None), &classifier).unwrap();
        assert_eq!(route.label, "chatgpt");

        let (route, _) = resolve(&req("generate a sunset", None), &classifier).unwrap();
        assert_eq!(route.label, "gemini + Dall-E");

        let (route, _) = resolve(&req("how far is 3 km", None), &classifier).unwrap();
        assert_eq!(route.label, "llama");
    }

    #[test]
    fn fallback_route_is_code() {
        assert_eq!(FALLBACK_ROUTE.kind, ProviderKind::Code);
    }
}
