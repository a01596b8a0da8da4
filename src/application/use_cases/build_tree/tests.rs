use super::*;
use crate::shared::error::FetchError;
use crate::traceability::domain::{NodeMarker, TraversalDirection};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Mock implementations for testing
#[derive(Default)]
struct MockProductFetcher {
    remote: HashMap<String, ProductNode>,
    denied: Vec<String>,
    offline: bool,
    hang: bool,
}

impl MockProductFetcher {
    fn with_remote(nodes: Vec<ProductNode>) -> Self {
        Self {
            remote: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProductFetcher for MockProductFetcher {
    async fn fetch_product_by_id(&self, id: &str) -> std::result::Result<ProductNode, FetchError> {
        if self.hang {
            futures::future::pending::<()>().await;
        }
        if self.offline {
            return Err(FetchError::Transport {
                details: "connection refused".to_string(),
            });
        }
        if self.denied.iter().any(|d| d == id) {
            return Err(FetchError::AccessDenied { id: id.to_string() });
        }
        self.remote
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
    }
}

#[derive(Clone, Default)]
struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }
    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}

fn shoe() -> ProductNode {
    ProductNode::new("shoe", "Shoe", "org-1").with_children(["laces", "sole"])
}

fn laces() -> ProductNode {
    ProductNode::new("laces", "Laces", "org-1").with_parents(["shoe"])
}

fn sole() -> ProductNode {
    ProductNode::new("sole", "Sole", "org-2").with_parents(["shoe"])
}

fn shoe_catalog() -> Vec<ProductNode> {
    vec![shoe(), laces(), sole()]
}

fn use_case(fetcher: MockProductFetcher) -> BuildTreeUseCase<MockProductFetcher, MockProgressReporter> {
    BuildTreeUseCase::new(fetcher, MockProgressReporter::default())
}

fn child_ids(tree: &TreeNode) -> Vec<&str> {
    tree.children.iter().map(|c| c.source_id.as_str()).collect()
}

#[tokio::test]
async fn test_supplier_tree_for_shoe() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .direction(TraversalDirection::TowardComponents)
        .seed_nodes(shoe_catalog())
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    assert_eq!(response.tree.source_id, "shoe");
    assert_eq!(response.tree.label, "Shoe");
    assert_eq!(child_ids(&response.tree), vec!["laces", "sole"]);
    assert!(response.tree.children.iter().all(TreeNode::is_leaf));
    assert_eq!(response.root_candidates.len(), 1);
    assert_eq!(response.root_candidates[0].id, "shoe");
    assert_eq!(response.stats.nodes_created, 3);
    assert_eq!(response.stats.unresolved_neighbors, 0);
    assert!(!response.stats.truncated);
}

#[tokio::test]
async fn test_brand_tree_from_laces() {
    let request = BuildTreeRequest::builder()
        .root_id("laces")
        .direction(TraversalDirection::TowardConsumers)
        .seed_nodes(shoe_catalog())
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    let candidate_ids: Vec<&str> = response
        .root_candidates
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(candidate_ids, vec!["laces", "sole"]);
    assert_eq!(response.tree.source_id, "laces");
    assert_eq!(child_ids(&response.tree), vec!["shoe"]);
    assert!(response.tree.children[0].is_leaf());
}

#[tokio::test]
async fn test_external_products_are_flagged() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(shoe_catalog())
        .caller_organization_id("org-1")
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    assert!(!response.tree.is_external);
    assert!(!response.tree.children[0].is_external);
    assert!(response.tree.children[1].is_external);
}

#[tokio::test]
async fn test_without_organization_nothing_is_external() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(shoe_catalog())
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    assert!(!response.tree.children[1].is_external);
}

#[tokio::test]
async fn test_default_root_is_first_candidate() {
    let request = BuildTreeRequest::builder()
        .direction(TraversalDirection::TowardConsumers)
        .seed_nodes(shoe_catalog())
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    assert_eq!(response.tree.source_id, "laces");
}

#[tokio::test]
async fn test_known_non_candidate_root_falls_back_to_first_candidate() {
    let request = BuildTreeRequest::builder()
        .root_id("laces")
        .direction(TraversalDirection::TowardComponents)
        .seed_nodes(shoe_catalog())
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    assert_eq!(response.tree.source_id, "shoe");
}

#[tokio::test]
async fn test_pure_cycle_offers_every_product_as_root() {
    let seed = vec![
        ProductNode::new("a", "A", "org-1").with_children(["b"]).with_parents(["b"]),
        ProductNode::new("b", "B", "org-1").with_children(["a"]).with_parents(["a"]),
    ];
    let request = BuildTreeRequest::builder()
        .root_id("b")
        .seed_nodes(seed.clone())
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    let candidates: Vec<&str> = response
        .root_candidates
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(candidates, vec!["a", "b"]);
    assert_eq!(response.tree.source_id, "b");
    assert_eq!(child_ids(&response.tree), vec!["a"]);

    let without_root = BuildTreeRequest::builder().seed_nodes(seed).build().unwrap();
    let response = use_case(MockProductFetcher::default())
        .execute(without_root)
        .await
        .unwrap();
    assert!(!response.is_empty());
    assert_eq!(response.tree.marker, NodeMarker::Product);
    assert_eq!(response.tree.source_id, "a");
    assert_eq!(child_ids(&response.tree), vec!["b"]);
}

#[tokio::test]
async fn test_empty_seed_returns_empty_state() {
    let request = BuildTreeRequest::builder().build().unwrap();
    let reporter = MockProgressReporter::default();
    let use_case = BuildTreeUseCase::new(MockProductFetcher::default(), reporter.clone());

    let response = use_case.execute(request).await.unwrap();

    assert!(response.is_empty());
    assert_eq!(response.tree.marker, NodeMarker::EmptyState);
    assert!(response.root_candidates.is_empty());
    assert_eq!(response.stats.nodes_created, 0);
    assert!(reporter
        .messages()
        .iter()
        .any(|m| m.contains("No products to trace")));
}

#[tokio::test]
async fn test_unknown_root_is_fetched_from_product_service() {
    // Seed holds only the caller's own products; the brand's shoe is remote
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(vec![laces()])
        .caller_organization_id("org-1")
        .build()
        .unwrap();

    let fetcher = MockProductFetcher::with_remote(vec![shoe(), sole()]);
    let response = use_case(fetcher).execute(request).await.unwrap();

    assert_eq!(response.tree.source_id, "shoe");
    assert_eq!(child_ids(&response.tree), vec!["laces", "sole"]);
    assert!(response.tree.children[1].is_external);
}

#[tokio::test]
async fn test_unresolvable_root_fails_the_build() {
    let request = BuildTreeRequest::builder()
        .root_id("ghost")
        .seed_nodes(shoe_catalog())
        .build()
        .unwrap();

    let err = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap_err();

    let trace_error = err.downcast_ref::<TraceError>().unwrap();
    assert!(matches!(trace_error, TraceError::RootUnresolved { id, .. } if id == "ghost"));
}

#[tokio::test]
async fn test_transport_failure_on_root_is_distinct() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .build()
        .unwrap();
    let fetcher = MockProductFetcher {
        offline: true,
        ..MockProductFetcher::default()
    };

    let err = use_case(fetcher).execute(request).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TraceError>(),
        Some(TraceError::Transport { .. })
    ));
}

#[tokio::test]
async fn test_neighbor_failures_are_absorbed() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(vec![shoe()])
        .build()
        .unwrap();
    let fetcher = MockProductFetcher {
        remote: HashMap::from([("laces".to_string(), laces())]),
        denied: vec!["sole".to_string()],
        ..MockProductFetcher::default()
    };
    let reporter = MockProgressReporter::default();
    let use_case = BuildTreeUseCase::new(fetcher, reporter.clone());

    let response = use_case.execute(request).await.unwrap();

    assert_eq!(child_ids(&response.tree), vec!["laces"]);
    assert_eq!(response.stats.unresolved_neighbors, 1);
    assert!(reporter
        .messages()
        .iter()
        .any(|m| m.starts_with("Error:") && m.contains("could not be resolved")));
}

#[tokio::test]
async fn test_transport_failure_on_neighbor_is_absorbed() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(vec![shoe()])
        .build()
        .unwrap();
    let fetcher = MockProductFetcher {
        offline: true,
        ..MockProductFetcher::default()
    };

    let response = use_case(fetcher).execute(request).await.unwrap();

    assert!(response.tree.is_leaf());
    assert_eq!(response.stats.unresolved_neighbors, 2);
}

#[tokio::test]
async fn test_layout_follows_tree_shape() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(shoe_catalog())
        .viewport(900.0, 600.0)
        .build()
        .unwrap();

    let response = use_case(MockProductFetcher::default())
        .execute(request)
        .await
        .unwrap();

    assert_eq!(
        response.layout,
        LayoutEstimator::estimate(2, 3, 900.0, 600.0)
    );
}

#[tokio::test]
async fn test_repeated_builds_are_identical_but_use_fresh_stores() {
    let use_case = use_case(MockProductFetcher::default());
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(shoe_catalog())
        .caller_organization_id("org-1")
        .build()
        .unwrap();

    let first = use_case.execute(request.clone()).await.unwrap();
    let second = use_case.execute(request).await.unwrap();

    assert_eq!(first.tree, second.tree);
    assert_eq!(first.layout, second.layout);
    assert_ne!(first.stats.generation, second.stats.generation);
}

#[tokio::test]
async fn test_abandoned_build_publishes_nothing() {
    let request = BuildTreeRequest::builder()
        .root_id("shoe")
        .seed_nodes(vec![shoe()])
        .build()
        .unwrap();
    let fetcher = MockProductFetcher {
        hang: true,
        ..MockProductFetcher::default()
    };
    let use_case = use_case(fetcher);

    let outcome = tokio::time::timeout(Duration::from_millis(50), use_case.execute(request)).await;

    assert!(outcome.is_err());
}
