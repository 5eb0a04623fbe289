//! Parent-path parsing
//!
//! The backend encodes a node's ancestors as a delimited string such as
//! `",media,images,"`. The ancestor chain walked when revealing a node is
//! the virtual root followed by each non-empty segment, in order.

use crate::identifiers::NodeKey;

/// Delimiter the backend uses between ancestor ids.
pub const DEFAULT_PATH_DELIMITER: char = ',';

/// Build the root-to-parent ancestor chain for a node.
///
/// Returns an empty chain when the path is absent or holds no ids;
/// otherwise the chain starts at [`NodeKey::Root`].
pub fn ancestor_chain(parent_path: Option<&str>, delimiter: char) -> Vec<NodeKey> {
    let Some(path) = parent_path else {
        return Vec::new();
    };

    // The root already heads the chain, so segments naming it are dropped.
    let mut ancestors = path
        .split(delimiter)
        .map(NodeKey::parse_wire)
        .filter(|key| !key.is_root())
        .peekable();

    if ancestors.peek().is_none() {
        return Vec::new();
    }

    std::iter::once(NodeKey::Root).chain(ancestors).collect()
}
