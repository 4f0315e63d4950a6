use super::node::TreeNode;

/// Pre-order walk: the parent is visited before its children, children in
/// array order. The caller guarantees the input is a tree (no cycles).
pub fn traverse<'a, F>(node: &'a TreeNode, visit: &mut F)
where
    F: FnMut(&'a TreeNode),
{
    visit(node);
    for child in &node.children {
        traverse(child, visit);
    }
}

/// Mutable pre-order walk. `visit` may freely mutate a node's own fields;
/// replacing `children` of the node currently being descended into is
/// undefined behavior from the walk's perspective (not guarded).
pub fn traverse_mut<F>(node: &mut TreeNode, visit: &mut F)
where
    F: FnMut(&mut TreeNode),
{
    visit(node);
    for child in &mut node.children {
        traverse_mut(child, visit);
    }
}

/// Flat pre-order arena over a borrowed tree. Map aggregation addresses
/// nodes by their position here, and those positions are the stable halves
/// of transmission edge ids.
pub struct FlatTree<'a> {
    nodes: Vec<&'a TreeNode>,
    children: Vec<Vec<usize>>,
}

impl<'a> FlatTree<'a> {
    pub fn new(root: &'a TreeNode) -> Self {
        let mut flat = FlatTree { nodes: Vec::new(), children: Vec::new() };
        flat.push(root);
        flat
    }

    fn push(&mut self, node: &'a TreeNode) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.children.push(Vec::with_capacity(node.children.len()));
        for child in &node.children {
            let child_idx = self.push(child);
            self.children[idx].push(child_idx);
        }
        idx
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &'a TreeNode {
        self.nodes[idx]
    }

    #[inline]
    pub fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    #[inline]
    pub fn is_tip(&self, idx: usize) -> bool {
        self.children[idx].is_empty()
    }
}
