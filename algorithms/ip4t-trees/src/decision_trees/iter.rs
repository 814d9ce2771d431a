use std::iter::Iterator;

use super::TreeNode;
use ip4t::{Float, Label};

/// Pre-order (DFS) iterator of nodes in a decision tree, left subtrees first
pub struct NodeIter<'a, F, L> {
    queue: Vec<&'a TreeNode<F, L>>,
}

impl<'a, F, L> NodeIter<'a, F, L> {
    pub fn new(queue: Vec<&'a TreeNode<F, L>>) -> Self {
        NodeIter { queue }
    }
}

impl<'a, F: Float, L: Label> Iterator for NodeIter<'a, F, L> {
    type Item = &'a TreeNode<F, L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop().map(|node| {
            // push right before left, so the left child is popped first
            node.children()
                .into_iter()
                .rev()
                .filter_map(|x| x.as_ref())
                .for_each(|child| self.queue.push(child));

            node
        })
    }
}
