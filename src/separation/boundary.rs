//! Boundary-trimmed vertex separators (Fischetti et al., "Thinning out
//! Steiner trees", Algorithm 1)

use crate::error::SeparationError;
use crate::graph::algorithms::membership_mask;
use crate::graph::CompressedGraph;
use std::collections::VecDeque;

/// Vertex separator between `component` and `anchor`.
///
/// The neighbor boundary of the component is computed first; a BFS from the
/// anchor then visits boundary vertices without expanding past them. The
/// visited part of the boundary is returned in ascending order. Removing it
/// disconnects the component from the anchor, but it is not yet minimal with
/// respect to any length bound.
pub fn boundary_separator(
    graph: &CompressedGraph,
    component: &[u32],
    anchor: u32,
) -> Result<Vec<u32>, SeparationError> {
    if component.is_empty() {
        return Err(SeparationError::EmptyComponent);
    }
    for &vertex in component.iter().chain(std::iter::once(&anchor)) {
        if !graph.contains(vertex) {
            return Err(SeparationError::VertexOutOfRange {
                vertex,
                node_count: graph.node_count,
            });
        }
    }

    let in_component = membership_mask(graph.node_count, component);
    if in_component[anchor as usize] {
        return Err(SeparationError::AnchorInComponent { anchor });
    }

    // Vertices outside the component adjacent to at least one member
    let mut on_boundary = vec![false; graph.node_count];
    for &member in component {
        for &neighbor in graph.neighbors(member as usize) {
            if !in_component[neighbor as usize] {
                on_boundary[neighbor as usize] = true;
            }
        }
    }

    let mut visited = vec![false; graph.node_count];
    visited[anchor as usize] = true;
    let mut queue = VecDeque::from([anchor]);
    while let Some(node) = queue.pop_front() {
        if on_boundary[node as usize] {
            continue;
        }
        for &neighbor in graph.neighbors(node as usize) {
            if !visited[neighbor as usize] {
                visited[neighbor as usize] = true;
                queue.push_back(neighbor);
            }
        }
    }

    let separator: Vec<u32> = (0..graph.node_count as u32)
        .filter(|&v| on_boundary[v as usize] && visited[v as usize])
        .collect();

    log::trace!(
        "Boundary separator of {} vertices between component of {} and anchor {}",
        separator.len(),
        component.len(),
        anchor
    );

    Ok(separator)
}
