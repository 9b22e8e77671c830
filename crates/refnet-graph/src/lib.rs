//! refnet downline visualization
//!
//! Builds the referral tree shown in the network view and renders it for
//! terminals. Uses shared types from refnet-types for its input.

pub mod render;
pub mod tree;

pub use render::{render_level_table, render_text};
pub use tree::{
    build_downline_tree, total_users, unplaced_users, NodeAttributes, RootUser, TreeNode,
};
