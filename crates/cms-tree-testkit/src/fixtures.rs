//! DTO builders and seeded trees

use cms_tree_core::{NodeDto, NodeId, NodeKey};

use crate::mock_service::MockTreeService;

/// Backend-style parent path (`",a,b,"`) for the given ancestors.
///
/// Returns `None` for top-level nodes.
pub fn parent_path(ancestors: &[&str]) -> Option<String> {
    if ancestors.is_empty() {
        None
    } else {
        Some(format!(",{},", ancestors.join(",")))
    }
}

fn row(id: &str, name: &str, ancestors: &[&str], has_children: bool) -> NodeDto {
    NodeDto {
        id: NodeId::new(id),
        name: name.to_string(),
        has_children,
        parent_id: ancestors
            .last()
            .map_or(NodeKey::Root, |parent| NodeKey::node(*parent)),
        parent_path: parent_path(ancestors),
    }
}

/// Row for a node with children under the given ancestors.
pub fn folder(id: &str, name: &str, ancestors: &[&str]) -> NodeDto {
    row(id, name, ancestors, true)
}

/// Row for a childless node under the given ancestors.
pub fn leaf(id: &str, name: &str, ancestors: &[&str]) -> NodeDto {
    row(id, name, ancestors, false)
}

/// Mock service seeded with a small media library:
///
/// ```text
/// <root>
/// ├── media/
/// │   ├── images/
/// │   │   ├── logo
/// │   │   └── banner
/// │   └── readme
/// └── docs/      (has children, none stored)
/// ```
pub fn media_tree() -> MockTreeService {
    MockTreeService::new()
        .with_children(
            NodeKey::Root,
            vec![folder("media", "Media", &[]), folder("docs", "Docs", &[])],
        )
        .with_children(
            NodeKey::node("media"),
            vec![
                folder("images", "Images", &["media"]),
                leaf("readme", "Readme", &["media"]),
            ],
        )
        .with_children(
            NodeKey::node("images"),
            vec![
                leaf("logo", "Logo", &["media", "images"]),
                leaf("banner", "Banner", &["media", "images"]),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path_format() {
        assert_eq!(parent_path(&[]), None);
        assert_eq!(parent_path(&["a", "b"]).as_deref(), Some(",a,b,"));
    }

    #[test]
    fn test_rows_point_at_immediate_parent() {
        let logo = leaf("logo", "Logo", &["media", "images"]);
        assert_eq!(logo.parent_id, NodeKey::node("images"));
        assert!(!logo.has_children);

        let media = folder("media", "Media", &[]);
        assert!(media.parent_id.is_root());
        assert!(media.has_children);
    }
}
