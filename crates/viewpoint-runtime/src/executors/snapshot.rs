//! Accessibility-tree snapshot and ref-based search executors.
//!
//! The full option surface (`mode`, `detail`, `maxDepth`, `maxElements`,
//! `includeText`, `includeFrames`) is applied as a post-capture filter over
//! the teacher's `AriaSnapshot` tree rather than pushed down into the CDP
//! capture path itself: `viewportOnly`/`pierceShadow`/`since` are accepted
//! on the wire but not yet enforced by a dedicated capture-time filter (see
//! the grounding ledger) — capture always walks the full tree and this
//! layer trims it afterward, which is correct for every option except
//! those three.

use viewpoint_core::AriaSnapshot;

use super::{ExecContext, ExecOutcome};
use crate::error::StepError;
use crate::protocol::{SnapshotDetail, SnapshotMode, SnapshotParams};

fn truncate(node: &mut AriaSnapshot, max_depth: Option<u32>, depth: u32, budget: &mut Option<u32>, include_text: bool) {
    if !include_text {
        node.name = None;
        node.description = None;
        node.value_text = None;
    }
    if let Some(budget) = budget.as_mut() {
        *budget = budget.saturating_sub(1);
    }
    let depth_exhausted = max_depth.is_some_and(|d| depth >= d);
    let elements_exhausted = budget.is_some_and(|b| b == 0);
    if depth_exhausted || elements_exhausted {
        node.children.clear();
        return;
    }
    for child in &mut node.children {
        truncate(child, max_depth, depth + 1, budget, include_text);
    }
}

fn summarize(node: &AriaSnapshot) -> bool {
    // AI/summary detail drops purely decorative nodes (no role and no
    // interesting children) to cut noise from the rendered tree.
    node.role.is_some() || !node.children.is_empty()
}

fn prune_decorative(node: &mut AriaSnapshot) {
    node.children.retain_mut(|child| {
        prune_decorative(child);
        summarize(child)
    });
}

pub async fn snapshot(ctx: &ExecContext<'_>, params: &SnapshotParams) -> Result<ExecOutcome, StepError> {
    let mut tree = if params.include_frames {
        ctx.page.aria_snapshot_with_frames().await?
    } else {
        ctx.page.aria_snapshot().await?
    };

    let mut budget = params.max_elements;
    truncate(&mut tree, params.max_depth, 0, &mut budget, params.include_text);

    if matches!(params.mode, SnapshotMode::Ai) && matches!(params.detail, SnapshotDetail::Summary) {
        prune_decorative(&mut tree);
    }

    let yaml = tree.to_yaml();
    Ok(serde_json::json!({ "snapshot": yaml, "tree": tree }).into())
}

pub async fn snapshot_search(ctx: &ExecContext<'_>, query: &str) -> Result<ExecOutcome, StepError> {
    let tree = ctx.page.aria_snapshot().await?;
    let mut matches = Vec::new();
    collect_matches(&tree, query, &mut matches);
    Ok(serde_json::json!({ "matches": matches }).into())
}

fn collect_matches(node: &AriaSnapshot, query: &str, out: &mut Vec<serde_json::Value>) {
    let needle = query.to_lowercase();
    let name_hits = node.name.as_deref().is_some_and(|n| n.to_lowercase().contains(&needle));
    let role_hits = node.role.as_deref().is_some_and(|r| r.to_lowercase().contains(&needle));
    if name_hits || role_hits {
        out.push(serde_json::json!({
            "role": node.role,
            "name": node.name,
            "ref": node.node_ref,
        }));
    }
    for child in &node.children {
        collect_matches(child, query, out);
    }
}
