use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::errors::TaxonomyResult;
use crate::taxonomy::{Category, Taxonomy};

fn node_line(category: &Category) -> String {
    format!("{} ({})", category.id, category.label)
}

impl Taxonomy {
    /// Renders the subtree rooted at `id` for terminal display.
    #[instrument(level = "debug", skip(self))]
    pub fn to_tree_string(&self, id: &str) -> TaxonomyResult<Tree<String>> {
        let root_idx = self.index_of(id)?;
        let root = self.get(id)?;

        fn build(taxonomy: &Taxonomy, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = taxonomy.node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = taxonomy.node(child_idx) {
                        let mut child_tree = Tree::new(node_line(child));
                        build(taxonomy, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let mut tree = Tree::new(node_line(root));
        build(self, root_idx, &mut tree);
        Ok(tree)
    }
}
