use crate::application::dto::BuildTreeResponse;
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;
use crate::traceability::domain::{NodeMarker, TreeNode};
use owo_colors::OwoColorize;
use std::fmt::Write;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// TextFormatter adapter rendering the tree for a terminal
///
/// ```text
/// Shoe [shoe]
/// ├── Laces [laces]
/// └── Sole [sole] (external)
/// ```
///
/// Followed by the layout hint, build statistics and root candidates.
pub struct TextFormatter {
    color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn node_line(&self, node: &TreeNode, is_root: bool) -> String {
        let label = if self.color && is_root {
            node.label.bold().to_string()
        } else {
            node.label.clone()
        };
        let id = if self.color {
            format!("[{}]", node.source_id).dimmed().to_string()
        } else {
            format!("[{}]", node.source_id)
        };

        let mut line = format!("{} {}", label, id);
        if node.is_external {
            line.push(' ');
            line.push_str(&self.tag("(external)", Tag::External));
        }
        if node.marker == NodeMarker::BackReference {
            line.push(' ');
            line.push_str(&self.tag("(cycle)", Tag::Cycle));
        }
        line
    }

    fn tag(&self, text: &str, tag: Tag) -> String {
        if !self.color {
            return text.to_string();
        }
        match tag {
            Tag::External => text.yellow().to_string(),
            Tag::Cycle => text.magenta().to_string(),
        }
    }

    fn render_children(&self, out: &mut String, node: &TreeNode, prefix: &str) {
        let count = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            let last = index + 1 == count;
            let (branch, extension) = if last {
                (LAST_BRANCH, SPACE)
            } else {
                (BRANCH, PIPE)
            };
            let _ = writeln!(out, "{}{}{}", prefix, branch, self.node_line(child, false));
            self.render_children(out, child, &format!("{}{}", prefix, extension));
        }
    }

    fn render_summary(&self, out: &mut String, response: &BuildTreeResponse) {
        let layout = &response.layout;
        let stats = &response.stats;

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Layout: spacing {:.0}x{:.0}, zoom {:.2}, translate ({:.0}, {:.0})",
            layout.horizontal_spacing,
            layout.vertical_spacing,
            layout.zoom,
            layout.translate.x,
            layout.translate.y
        );
        let _ = writeln!(
            out,
            "Nodes: {}, depth: {}, unresolved: {}",
            stats.nodes_created,
            response.tree.depth(),
            stats.unresolved_neighbors
        );
        if stats.truncated {
            let warning = "Tree truncated: some branches are not shown";
            if self.color {
                let _ = writeln!(out, "{}", warning.yellow());
            } else {
                let _ = writeln!(out, "{}", warning);
            }
        }

        let candidates: Vec<&str> = response
            .root_candidates
            .iter()
            .map(|node| node.id.as_str())
            .collect();
        if candidates.is_empty() {
            let _ = writeln!(out, "Root candidates: none");
        } else {
            let _ = writeln!(out, "Root candidates: {}", candidates.join(", "));
        }
    }
}

enum Tag {
    External,
    Cycle,
}

impl TreeFormatter for TextFormatter {
    fn format(&self, response: &BuildTreeResponse) -> Result<String> {
        let mut out = String::new();

        if response.is_empty() {
            let _ = writeln!(out, "{}", response.tree.label);
        } else {
            let _ = writeln!(out, "{}", self.node_line(&response.tree, true));
            self.render_children(&mut out, &response.tree, "");
        }

        self.render_summary(&mut out, response);
        Ok(out)
    }
}
