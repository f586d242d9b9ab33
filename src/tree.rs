//! Linearize a conversation's node tree into render order.

use crate::importer::{Conversation, MappingItem, ROOT_NODE_ID};
use std::collections::HashSet;

/// Flatten the conversation tree into a depth-first pre-order sequence of
/// message-bearing nodes, starting at the `"root"` sentinel.
///
/// - A visited-set guards against cycles and diamond reachability: a node is
///   emitted at most once no matter how many parents reference it.
/// - Child ids absent from the mapping are skipped silently.
/// - A mapping without a `"root"` entry flattens to an empty sequence.
///
/// Order is deterministic, fixed entirely by child-list order and the DFS
/// descent. When a conversation branches (edited or regenerated turns) this
/// is pre-order, not chronological order.
pub fn flatten(conv: &Conversation) -> Vec<&MappingItem> {
    let mut out = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![ROOT_NODE_ID];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = conv.mapping.get(id) else {
            continue;
        };
        if node.message.is_some() {
            out.push(node);
        }
        // Reverse push so the first child is popped first.
        for child in node.children.iter().rev() {
            stack.push(child);
        }
    }

    out
}
