//! Downline tree construction
//!
//! The backend reports the downline as flat per-level user lists, without
//! referrer edges below level 1. [`build_downline_tree`] turns that into a
//! single rooted tree for hierarchical display: level 1 hangs off the root,
//! and each later level is spread in order across the nodes of the level
//! above it. Edges below level 1 are therefore indicative only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use refnet_types::{AuthUser, LeveledUser, MatrixLevel};

// =============================================================================
// TYPES
// =============================================================================

/// The current user, placed at the root of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootUser {
    pub name: String,
    pub referral_code: String,
    pub level: u32,
}

impl RootUser {
    pub fn new(name: impl Into<String>, referral_code: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            referral_code: referral_code.into(),
            level,
        }
    }
}

impl From<&AuthUser> for RootUser {
    fn from(user: &AuthUser) -> Self {
        Self::new(user.name.clone(), user.referral_code.clone(), user.level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttributes {
    pub referral_code: String,
    /// Depth below the root (root carries its own platform level)
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

/// Display tree node, serialized as `{name, attributes, children}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub attributes: NodeAttributes,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn root(user: &RootUser) -> Self {
        Self {
            name: format!("{} (You)", user.name),
            attributes: NodeAttributes {
                referral_code: user.referral_code.clone(),
                level: user.level,
                joined_at: None,
            },
            children: Vec::new(),
        }
    }

    fn leveled(user: &LeveledUser, level: u32) -> Self {
        Self {
            name: user.name.clone(),
            attributes: NodeAttributes {
                referral_code: user.referral_code.clone(),
                level,
                joined_at: user.joined_at,
            },
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Nodes in this subtree, self included
    pub fn count_nodes(&self) -> usize {
        1 + self.descendant_count()
    }

    pub fn descendant_count(&self) -> usize {
        self.children.iter().map(TreeNode::count_nodes).sum()
    }

    /// Height of the subtree (a lone node is 0)
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Nodes exactly `target` edges below self
    pub fn nodes_at_depth(&self, target: usize) -> Vec<&TreeNode> {
        if target == 0 {
            return vec![self];
        }
        self.children
            .iter()
            .flat_map(|c| c.nodes_at_depth(target - 1))
            .collect()
    }

    /// Pre-order walk yielding each node with its depth below self
    pub fn nodes_with_depth(&self) -> Vec<(usize, &TreeNode)> {
        let mut out = Vec::with_capacity(self.count_nodes());
        self.collect_with_depth(0, &mut out);
        out
    }

    fn collect_with_depth<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a TreeNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.collect_with_depth(depth + 1, out);
        }
    }

    pub fn find_by_referral_code(&self, code: &str) -> Option<&TreeNode> {
        if self.attributes.referral_code == code {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|c| c.find_by_referral_code(code))
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Build the display tree for `root` from the per-level downline.
///
/// `levels[i]` is placed at depth `i + 1`. A level can only be placed when
/// the level above it produced at least one node; see [`unplaced_users`].
pub fn build_downline_tree(root: &RootUser, levels: &[MatrixLevel]) -> TreeNode {
    let mut tree = TreeNode::root(root);

    // Built bottom-up so each tier can take ownership of the tier below it.
    let mut below: Vec<TreeNode> = Vec::new();
    for (index, level) in levels[..placeable_levels(levels)].iter().enumerate().rev() {
        let depth = index as u32 + 1;
        let mut tier: Vec<TreeNode> = level
            .users
            .iter()
            .map(|u| TreeNode::leveled(u, depth))
            .collect();
        distribute(&mut tier, below);
        below = tier;
    }

    tree.children = below;
    tree
}

/// Hand `children` out to `parents` in contiguous runs of `ceil(n / p)`.
fn distribute(parents: &mut [TreeNode], children: Vec<TreeNode>) {
    if children.is_empty() || parents.is_empty() {
        return;
    }
    let per_parent = children.len().div_ceil(parents.len());
    let mut children = children.into_iter();
    for parent in parents.iter_mut() {
        parent.children.extend(children.by_ref().take(per_parent));
    }
}

/// Number of leading levels that have a parent tier to hang from.
///
/// Everything after the first empty level is unreachable.
fn placeable_levels(levels: &[MatrixLevel]) -> usize {
    levels
        .iter()
        .position(|l| l.users.is_empty())
        .map(|i| i + 1)
        .unwrap_or(levels.len())
}

/// Users listed across all levels
pub fn total_users(levels: &[MatrixLevel]) -> usize {
    levels.iter().map(|l| l.users.len()).sum()
}

/// Users that [`build_downline_tree`] cannot place because a level above
/// them is empty
pub fn unplaced_users(levels: &[MatrixLevel]) -> usize {
    total_users(&levels[placeable_levels(levels)..])
}
