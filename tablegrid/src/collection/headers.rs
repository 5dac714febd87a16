use std::collections::HashMap;

use crate::node::{GridNode, NodeKind};

use super::{NodeArena, NodeId};

/// Synthesize header rows for a set of leaf columns.
///
/// Each leaf contributes a track running from the leaf up through its
/// ancestors. Ancestors shared by several leaves are placed once, on the
/// track of their first leaf, and have their span widened instead. An
/// ancestor sits one depth above the deepest path below it, so a parent is
/// always in a higher row than every one of its descendants. Tracks are then
/// read back level by level into `headerrow` nodes, with `placeholder` nodes
/// filling the gaps so that every row covers all leaf columns.
///
/// Leaves get their leaf index assigned; columns get `level` and `col_index`.
pub(crate) fn build_header_rows(arena: &mut NodeArena, leaves: &[NodeId]) -> Vec<NodeId> {
    if leaves.is_empty() {
        return Vec::new();
    }

    // Ancestors in placement order, with the track of their first leaf.
    let mut placed: Vec<(NodeId, usize)> = Vec::new();
    let mut depths: HashMap<NodeId, usize> = HashMap::new();

    for (current, &leaf) in leaves.iter().enumerate() {
        let mut depth = 0;
        let mut parent_key = arena.node(leaf).parent_key.clone();

        while let Some(key) = parent_key {
            let Some(parent) = arena.id_of(&key) else {
                break;
            };

            if let Some(&placed_depth) = depths.get(&parent) {
                let span = arena.node(parent).col_span();
                arena.node_mut(parent).set_col_span(span + 1);
                depth = placed_depth.max(depth + 1);
            } else {
                arena.node_mut(parent).set_col_span(1);
                depth += 1;
                placed.push((parent, current));
            }
            depths.insert(parent, depth);

            parent_key = arena.node(parent).parent_key.clone();
        }

        arena.node_mut(leaf).index = current;
    }

    let mut tracks: Vec<Vec<Option<NodeId>>> =
        leaves.iter().map(|&leaf| vec![Some(leaf)]).collect();
    for (id, track) in placed {
        let depth = depths.get(&id).copied().unwrap_or(1);
        let slots = &mut tracks[track];
        if slots.len() <= depth {
            slots.resize(depth + 1, None);
        }
        slots[depth] = Some(id);
    }

    let depth_count = tracks.iter().map(Vec::len).max().unwrap_or(0);
    let column_count = leaves.len();
    let mut rows: Vec<Vec<NodeId>> = vec![Vec::new(); depth_count];

    for (col_index, track) in tracks.iter().enumerate() {
        for (depth, slot) in track.iter().enumerate() {
            let Some(id) = *slot else {
                continue;
            };
            let level = depth_count - 1 - depth;
            let row_length = span_of(arena, &rows[level]);
            if row_length < col_index {
                let base = format!("placeholder-{}", arena.node(id).key);
                let placeholder = placeholder(row_length, col_index - row_length, level);
                let placeholder = arena.insert_unique(base, placeholder);
                rows[level].push(placeholder);
            }

            let node = arena.node_mut(id);
            node.level = level;
            node.set_col_index(col_index);
            rows[level].push(id);
        }
    }

    for (level, row) in rows.iter_mut().enumerate() {
        let row_length = span_of(arena, row);
        if row_length < column_count {
            let base = match row.last() {
                Some(&last) => format!("placeholder-{}", arena.node(last).key),
                None => format!("placeholder-headerrow-{level}"),
            };
            let placeholder = placeholder(row_length, column_count - row_length, level);
            row.push(arena.insert_unique(base, placeholder));
        }
    }

    let header_rows: Vec<NodeId> = rows
        .into_iter()
        .enumerate()
        .map(|(index, children)| {
            let mut row = GridNode::new(String::new(), NodeKind::HeaderRow);
            row.index = index;
            row.child_keys = children.iter().map(|&id| arena.key(id)).collect();
            arena.insert_unique(format!("headerrow-{index}"), row)
        })
        .collect();

    log::debug!(
        "[headers] {} leaf columns stacked into {} header rows",
        column_count,
        header_rows.len()
    );
    header_rows
}

fn span_of(arena: &NodeArena, row: &[NodeId]) -> usize {
    row.iter().map(|&id| arena.node(id).col_span()).fold(0, usize::saturating_add)
}

fn placeholder(index: usize, col_span: usize, level: usize) -> GridNode {
    let mut node = GridNode::new(String::new(), NodeKind::Placeholder {
        col_span,
        col_index: index,
    });
    node.index = index;
    node.level = level;
    node
}
