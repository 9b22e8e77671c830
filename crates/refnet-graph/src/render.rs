//! Text rendering for terminals

use std::fmt::Write;

use refnet_types::MatrixLevel;

use crate::tree::TreeNode;

/// Render the tree as a box-drawing outline, one node per line
pub fn render_text(tree: &TreeNode) -> String {
    let mut out = String::new();
    out.push_str(&node_label(tree, true));
    out.push('\n');
    render_children(tree, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let _ = writeln!(out, "{}{}{}", prefix, branch, node_label(child, false));
        render_children(child, &format!("{}{}", prefix, indent), out);
    }
}

fn node_label(node: &TreeNode, is_root: bool) -> String {
    let mut label = format!("{} [{}]", node.name, node.attributes.referral_code);
    if !is_root {
        let _ = write!(label, " L{}", node.attributes.level);
    }
    if let Some(joined) = node.attributes.joined_at {
        let _ = write!(label, " joined {}", joined.format("%Y-%m-%d"));
    }
    label
}

/// One row per level: number, commission rate, declared and listed counts
pub fn render_level_table(levels: &[MatrixLevel]) -> String {
    let mut out = String::from("LEVEL  RATE      REFERRALS  LISTED\n");
    for level in levels {
        let _ = writeln!(
            out,
            "{:<6} {:<9} {:<10} {}",
            level.level,
            format!("{}%", level.rate),
            level.referrals_count,
            level.users.len()
        );
    }
    out
}
