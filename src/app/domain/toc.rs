//! Table of contents derived from ATX heading markers.
//!
//! Every line whose trimmed text starts with one to six `#` characters is a
//! heading. Headings form a forest: each one hangs under the nearest
//! preceding heading of strictly lower level, or becomes a root.

pub const MAX_HEADING_LEVEL: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 to 6.
    pub level: usize,
    /// Heading text without the markers.
    pub title: String,
    /// 0-based line index in the source text.
    pub source_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub heading: Heading,
    /// Index of the enclosing heading in the tree.
    pub parent: Option<usize>,
    /// Indices of directly nested headings, in document order.
    pub children: Vec<usize>,
}

/// Heading forest stored as an arena in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocTree {
    nodes: Vec<TocNode>,
    roots: Vec<usize>,
}

impl TocTree {
    /// Build the tree in a single pass over the lines of `text`.
    pub fn build(text: &str) -> Self {
        let mut tree = Self::default();
        // Open ancestors, strictly increasing in level from bottom to top.
        let mut stack: Vec<usize> = Vec::new();

        for (line_no, line) in text.split('\n').enumerate() {
            let Some(heading) = parse_heading(line, line_no) else {
                continue;
            };

            while let Some(&top) = stack.last() {
                if tree.nodes[top].heading.level < heading.level {
                    break;
                }
                stack.pop();
            }

            let index = tree.nodes.len();
            let parent = stack.last().copied();
            match parent {
                Some(p) => tree.nodes[p].children.push(index),
                None => tree.roots.push(index),
            }
            tree.nodes.push(TocNode {
                heading,
                parent,
                children: Vec::new(),
            });
            stack.push(index);
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TocNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&TocNode> {
        self.nodes.get(index)
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Number of ancestors above a node (0 for roots).
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.nodes.get(index).and_then(|n| n.parent);
        while let Some(p) = current {
            depth += 1;
            current = self.nodes[p].parent;
        }
        depth
    }
}

/// Parse a single line as a heading.
pub fn parse_heading(line: &str, source_line: usize) -> Option<Heading> {
    let trimmed = line.trim();
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    Some(Heading {
        level,
        title: trimmed[level..].trim().to_string(),
        source_line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(tree: &TocTree, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| tree.nodes()[i].heading.title.clone())
            .collect()
    }

    #[test]
    fn test_empty_text() {
        let tree = TocTree::build("");
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn test_parse_heading_levels() {
        assert_eq!(parse_heading("# One", 0).unwrap().level, 1);
        assert_eq!(parse_heading("###### Six", 0).unwrap().level, 6);
        assert!(parse_heading("####### Seven", 0).is_none());
        assert!(parse_heading("plain text", 0).is_none());
        assert!(parse_heading("", 0).is_none());
    }

    #[test]
    fn test_parse_heading_trims_markers_and_whitespace() {
        let h = parse_heading("   ##   Spaced Title  \r", 4).unwrap();
        assert_eq!(h.level, 2);
        assert_eq!(h.title, "Spaced Title");
        assert_eq!(h.source_line, 4);
    }

    #[test]
    fn test_marker_without_space_still_counts() {
        let h = parse_heading("#tag", 0).unwrap();
        assert_eq!(h.level, 1);
        assert_eq!(h.title, "tag");
    }

    #[test]
    fn test_nested_structure() {
        let text = "# Intro\ntext\n## Setup\n### Linux\n### macOS\n## Usage\n# Appendix";
        let tree = TocTree::build(text);
        assert_eq!(tree.len(), 6);
        assert_eq!(titles(&tree, tree.roots()), vec!["Intro", "Appendix"]);

        let intro = &tree.nodes()[tree.roots()[0]];
        assert_eq!(titles(&tree, &intro.children), vec!["Setup", "Usage"]);

        let setup = &tree.nodes()[intro.children[0]];
        assert_eq!(titles(&tree, &setup.children), vec!["Linux", "macOS"]);
        assert_eq!(tree.depth(setup.children[1]), 2);
    }

    #[test]
    fn test_source_lines() {
        let tree = TocTree::build("intro\n# A\n\n## B\n");
        let lines: Vec<usize> = tree.nodes().iter().map(|n| n.heading.source_line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_duplicate_headings_keep_their_own_lines() {
        let tree = TocTree::build("## Notes\nx\n## Notes\n");
        let lines: Vec<usize> = tree.nodes().iter().map(|n| n.heading.source_line).collect();
        assert_eq!(lines, vec![0, 2]);
    }

    #[test]
    fn test_skipped_level_attaches_to_nearest_lower() {
        let tree = TocTree::build("# A\n### C\n");
        let c = &tree.nodes()[1];
        assert_eq!(c.parent, Some(0));
    }

    #[test]
    fn test_leading_deep_heading_is_root() {
        let tree = TocTree::build("### Deep\n# Top\n## Sub");
        assert_eq!(titles(&tree, tree.roots()), vec!["Deep", "Top"]);
        assert_eq!(tree.nodes()[2].parent, Some(1));
    }

    #[test]
    fn test_no_stale_ancestor_after_sibling() {
        // "D" must hang under "C", not under the earlier "B".
        let tree = TocTree::build("# A\n## B\n# C\n### D");
        assert_eq!(tree.nodes()[3].parent, Some(2));
        assert_eq!(titles(&tree, &tree.nodes()[2].children), vec!["D"]);
        assert!(tree.nodes()[1].children.is_empty());
    }

    #[test]
    fn test_out_of_range_headers_ignored() {
        let tree = TocTree::build("# A\n####### Too deep\n## B");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.nodes()[1].parent, Some(0));
    }

    #[test]
    fn test_every_node_has_nearest_strictly_lower_parent() {
        let levels = [2, 1, 3, 3, 2, 6, 4, 1, 1, 5, 2, 3, 6, 6, 1];
        let text: String = levels
            .iter()
            .enumerate()
            .map(|(i, &l)| format!("{} H{i}\nbody\n", "#".repeat(l)))
            .collect();
        let tree = TocTree::build(&text);
        assert_eq!(tree.len(), levels.len());

        for (i, node) in tree.nodes().iter().enumerate() {
            let expected = (0..i).rev().find(|&j| levels[j] < levels[i]);
            assert_eq!(node.parent, expected, "node {i}");
            assert_eq!(node.heading.level, levels[i]);
            assert_eq!(node.heading.source_line, i * 2);
        }

        let child_count: usize = tree.nodes().iter().map(|n| n.children.len()).sum();
        assert_eq!(child_count + tree.roots().len(), tree.len());
    }
}
