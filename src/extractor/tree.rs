// Depth-first traversal of capture trees
//
// Uses an explicit worklist so arbitrarily deep captures never grow the call
// stack. Non-object entries in a `children` list are skipped.
use super::node::NodeExt;
use serde_json::Value;

/// Pre-order iterator over every object node, root included
pub struct PreOrder<'a> {
    stack: Vec<&'a Value>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if !node.is_object() {
                continue;
            }
            // Reversed so the first child is visited next
            self.stack.extend(node.children().iter().rev());
            return Some(node);
        }
        None
    }
}

/// Walk the tree rooted at `root` in pre-order
pub fn walk(root: &Value) -> PreOrder<'_> {
    PreOrder { stack: vec![root] }
}

/// Every node whose `class` equals `class_name`, in pre-order
pub fn find_nodes_by_class<'a>(root: &'a Value, class_name: &str) -> Vec<&'a Value> {
    walk(root).filter(|node| node.has_class(class_name)).collect()
}

/// First node in pre-order matching `predicate`
pub fn find_first<'a, P>(root: &'a Value, mut predicate: P) -> Option<&'a Value>
where
    P: FnMut(&Value) -> bool,
{
    walk(root).find(|node| predicate(node))
}
