//! Selection and ancestor reveal.
#![allow(missing_docs)]

use std::sync::Arc;

use cms_tree_core::{NodeKey, ServiceError, TreeEventKind, TreeNode};
use cms_tree_store::{LocateOutcome, TreeStore, TreeStoreConfig, TreeStoreError};
use cms_tree_testkit::{folder, init_test_tracing, leaf, media_tree, MockTreeService};

fn store_for(service: &MockTreeService) -> TreeStore {
    TreeStore::new(Arc::new(service.clone()))
}

fn logo() -> TreeNode {
    TreeNode::from(leaf("logo", "Logo", &["media", "images"]))
}

fn cached_entry(store: &TreeStore, parent: &NodeKey, id: &str) -> TreeNode {
    store
        .cached_children(parent)
        .unwrap_or_default()
        .into_iter()
        .find(|node| node.id == NodeKey::node(id))
        .unwrap_or_else(|| panic!("{id} cached under {parent}"))
}

#[tokio::test]
async fn single_ancestor_path_reveals_root_entry() {
    init_test_tracing();
    let service = MockTreeService::new()
        .with_children(NodeKey::Root, vec![folder("A", "A", &[])])
        .with_children(NodeKey::node("A"), vec![leaf("X", "X", &["A"])]);
    let store = store_for(&service);
    let mut events = store.subscribe_events();
    let x = TreeNode::new("X", "X")
        .with_parent(NodeKey::node("A"))
        .with_parent_path("A");

    let outcome = store.locate_to_selected_node(x.clone()).await.unwrap();

    assert_eq!(outcome, LocateOutcome::Revealed { last_index: 1 });
    assert_eq!(store.selected_node(), Some(x.clone()));
    let selected = events.try_recv().unwrap();
    assert_eq!(selected.kind, TreeEventKind::Selected);
    assert_eq!(selected.node, x);

    assert!(cached_entry(&store, &NodeKey::Root, "A").is_expanded);
    assert!(store.is_cached(&NodeKey::node("A")));
    assert_eq!(
        service.children_requests(),
        vec![NodeKey::Root, NodeKey::node("A")]
    );
}

#[tokio::test]
async fn reselecting_same_node_is_a_no_op() {
    let service = media_tree();
    let store = store_for(&service);
    let mut events = store.subscribe_events();

    store.locate_to_selected_node(logo()).await.unwrap();
    let calls_after_first = service.calls();

    let outcome = store.locate_to_selected_node(logo()).await.unwrap();

    assert_eq!(outcome, LocateOutcome::AlreadySelected);
    assert_eq!(service.calls(), calls_after_first);
    let selected: Vec<_> = events
        .drain()
        .into_iter()
        .filter(|event| event.kind == TreeEventKind::Selected)
        .collect();
    assert_eq!(selected.len(), 1);
}

#[tokio::test]
async fn ancestors_are_fetched_in_order_and_expanded_after_their_children() {
    init_test_tracing();
    let service = media_tree();
    let store = Arc::new(store_for(&service));
    store.load_nodes(&NodeKey::Root).await.unwrap();
    let mut images_gate = service.hold_children(NodeKey::node("images"));

    let walk = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.locate_to_selected_node(logo()).await }
    });

    images_gate.reached().await;
    // media's children are in and media is expanded; images is still in flight.
    assert!(cached_entry(&store, &NodeKey::Root, "media").is_expanded);
    assert!(!cached_entry(&store, &NodeKey::node("media"), "images").is_expanded);
    assert!(!store.is_cached(&NodeKey::node("images")));
    assert_eq!(store.selected_node().map(|node| node.id), Some(NodeKey::node("logo")));

    images_gate.release();
    let outcome = walk.await.unwrap().unwrap();

    assert_eq!(outcome, LocateOutcome::Revealed { last_index: 2 });
    assert!(cached_entry(&store, &NodeKey::node("media"), "images").is_expanded);
    assert!(store.is_cached(&NodeKey::node("images")));
    assert_eq!(
        service.children_requests(),
        vec![NodeKey::Root, NodeKey::node("media"), NodeKey::node("images")]
    );
}

#[tokio::test]
async fn cached_ancestors_cost_no_fetch() {
    let service = media_tree();
    let store = store_for(&service);
    for key in [NodeKey::Root, NodeKey::node("media"), NodeKey::node("images")] {
        store.load_nodes(&key).await.unwrap();
    }
    service.reset_calls();

    let outcome = store.locate_to_selected_node(logo()).await.unwrap();

    assert_eq!(outcome, LocateOutcome::Revealed { last_index: 2 });
    assert!(service.calls().is_empty());
    assert!(cached_entry(&store, &NodeKey::Root, "media").is_expanded);
    assert!(cached_entry(&store, &NodeKey::node("media"), "images").is_expanded);
    // Siblings are untouched.
    assert!(!cached_entry(&store, &NodeKey::Root, "docs").is_expanded);
}

#[tokio::test]
async fn walk_does_not_publish_children() {
    let service = media_tree();
    let store = store_for(&service);
    let mut root = store.subscribe_children(&NodeKey::Root);

    store.locate_to_selected_node(logo()).await.unwrap();

    assert!(root.try_recv().is_none());
    assert!(store.is_cached(&NodeKey::Root));
}

#[tokio::test]
async fn top_level_node_has_nothing_to_reveal() {
    let service = media_tree();
    let store = store_for(&service);
    let mut events = store.subscribe_events();
    let docs = TreeNode::from(folder("docs", "Docs", &[]));

    let outcome = store.locate_to_selected_node(docs.clone()).await.unwrap();

    assert_eq!(outcome, LocateOutcome::NothingToReveal);
    assert!(service.calls().is_empty());
    assert_eq!(events.try_recv().map(|event| event.node), Some(docs));
}

#[tokio::test]
async fn delimiter_only_path_has_nothing_to_reveal() {
    let service = media_tree();
    let store = store_for(&service);
    let node = TreeNode::new("odd", "Odd").with_parent_path(",,");

    let outcome = store.locate_to_selected_node(node).await.unwrap();

    assert_eq!(outcome, LocateOutcome::NothingToReveal);
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn fetch_failure_ends_walk_after_selection_event() {
    let service = media_tree();
    service.fail_children(NodeKey::node("media"), ServiceError::status(404, "gone"));
    let store = store_for(&service);
    let mut events = store.subscribe_events().only([TreeEventKind::Selected]);

    let result = store.locate_to_selected_node(logo()).await;

    assert_eq!(
        result,
        Err(TreeStoreError::Service(ServiceError::status(404, "gone")))
    );
    assert!(events.try_recv().is_some());
    assert_eq!(store.selected_node().map(|node| node.id), Some(NodeKey::node("logo")));
    assert!(!store.is_cached(&NodeKey::node("images")));
}

#[tokio::test]
async fn failed_ancestor_fetch_is_published_on_its_channel() {
    let service = media_tree();
    service.fail_children(NodeKey::node("media"), ServiceError::status(404, "gone"));
    let store = store_for(&service);
    let mut media = store.subscribe_children(&NodeKey::node("media"));

    let result = store.locate_to_selected_node(logo()).await;

    assert!(matches!(result, Err(ref err) if err.is_remote()));
    assert_eq!(media.try_recv(), Some(Err(ServiceError::status(404, "gone"))));
    assert!(!store.is_cached(&NodeKey::node("media")));
}

#[tokio::test]
async fn custom_delimiter_is_honored() {
    let service = media_tree();
    let config = TreeStoreConfig {
        path_delimiter: '.',
        ..TreeStoreConfig::default()
    };
    let store = TreeStore::with_config(Arc::new(service.clone()), config).unwrap();
    let node = TreeNode::new("logo", "Logo")
        .with_parent(NodeKey::node("images"))
        .with_parent_path("media.images");

    let outcome = store.locate_to_selected_node(node).await.unwrap();

    assert_eq!(outcome, LocateOutcome::Revealed { last_index: 2 });
}

async fn overlapping_selections(cancel_superseded_walks: bool) -> (LocateOutcome, MockTreeService) {
    let service = media_tree();
    let config = TreeStoreConfig {
        cancel_superseded_walks,
        ..TreeStoreConfig::default()
    };
    let store = Arc::new(TreeStore::with_config(Arc::new(service.clone()), config).unwrap());
    store.load_nodes(&NodeKey::Root).await.unwrap();
    let mut media_gate = service.hold_children(NodeKey::node("media"));

    let walk = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.locate_to_selected_node(logo()).await }
    });
    media_gate.reached().await;

    let docs = TreeNode::from(folder("docs", "Docs", &[]));
    store.locate_to_selected_node(docs).await.unwrap();
    media_gate.release();

    let outcome = walk.await.unwrap().unwrap();
    assert_eq!(store.selected_node().map(|node| node.id), Some(NodeKey::node("docs")));
    (outcome, service)
}

#[tokio::test]
async fn superseded_walk_runs_to_completion_by_default() {
    let (outcome, service) = overlapping_selections(false).await;

    assert_eq!(outcome, LocateOutcome::Revealed { last_index: 2 });
    assert_eq!(service.children_request_count(&NodeKey::node("images")), 1);
}

#[tokio::test]
async fn superseded_walk_stops_when_cancellation_enabled() {
    let (outcome, service) = overlapping_selections(true).await;

    assert_eq!(outcome, LocateOutcome::Superseded { at: 2 });
    assert_eq!(service.children_request_count(&NodeKey::node("images")), 0);
}

#[tokio::test]
async fn direct_selection_supersedes_walk_when_cancellation_enabled() {
    let service = media_tree();
    let config = TreeStoreConfig {
        cancel_superseded_walks: true,
        ..TreeStoreConfig::default()
    };
    let store = Arc::new(TreeStore::with_config(Arc::new(service.clone()), config).unwrap());
    store.load_nodes(&NodeKey::Root).await.unwrap();
    let mut media_gate = service.hold_children(NodeKey::node("media"));

    let walk = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.locate_to_selected_node(logo()).await }
    });
    media_gate.reached().await;

    store.fire_node_selected(TreeNode::from(folder("docs", "Docs", &[])));
    media_gate.release();

    let outcome = walk.await.unwrap().unwrap();
    assert_eq!(outcome, LocateOutcome::Superseded { at: 2 });
    assert_eq!(store.selected_node().map(|node| node.id), Some(NodeKey::node("docs")));
    assert_eq!(service.children_request_count(&NodeKey::node("images")), 0);
}

#[tokio::test]
async fn direct_selection_leaves_walk_running_by_default() {
    let service = media_tree();
    let store = Arc::new(store_for(&service));
    store.load_nodes(&NodeKey::Root).await.unwrap();
    let mut media_gate = service.hold_children(NodeKey::node("media"));

    let walk = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.locate_to_selected_node(logo()).await }
    });
    media_gate.reached().await;

    store.fire_node_selected(TreeNode::from(folder("docs", "Docs", &[])));
    media_gate.release();

    let outcome = walk.await.unwrap().unwrap();
    assert_eq!(outcome, LocateOutcome::Revealed { last_index: 2 });
    assert_eq!(service.children_request_count(&NodeKey::node("images")), 1);
}
