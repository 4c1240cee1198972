//! Newman modularity of a partition.
//!
//! `Q = Σ_c [ l_c / m − (d_c / 2m)² ]`, where `l_c` counts edges inside
//! community `c`, `d_c` sums the degrees of its members and `m` is the
//! edge count. Runs in O(V + E + C).
//!
//! # References
//!
//! - Newman & Girvan (2004), "Finding and evaluating community structure in
//!   networks", *Phys. Rev. E* 69, 026113

use super::types::Phenotype;
use crate::error::{Error, Result};
use crate::graph::Graph;

/// Computes the modularity of `phenotype` on `graph`.
///
/// The result lies roughly in `[-0.5, 1]`; higher is better.
///
/// # Errors
/// - [`Error::InvalidGraph`] when the graph has no edges.
/// - [`Error::InvalidPartition`] when a community names an unknown node, a
///   node appears twice, or an edge endpoint is left uncovered.
///
/// # Examples
///
/// ```
/// use u_locus::{Graph, lga::{modularity, Phenotype}};
///
/// let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]);
/// let split = Phenotype::new(vec![vec![0, 1, 2], vec![3, 4, 5]]);
/// let q = modularity(&g, &split).unwrap();
/// assert!((q - 5.0 / 14.0).abs() < 1e-12);
/// ```
pub fn modularity(graph: &Graph, phenotype: &Phenotype) -> Result<f64> {
    let m = graph.edge_count();
    if m == 0 {
        return Err(Error::InvalidGraph("modularity is undefined without edges"));
    }

    // d_c and membership, O(V)
    let mut community_of: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut degree_sum = vec![0usize; phenotype.len()];
    for (c, community) in phenotype.communities().iter().enumerate() {
        for &node in community {
            let pos = graph.position(node).ok_or_else(|| {
                Error::InvalidPartition(format!("node {node} is not in the graph"))
            })?;
            if community_of[pos].replace(c).is_some() {
                return Err(Error::InvalidPartition(format!(
                    "node {node} appears in more than one community"
                )));
            }
            degree_sum[c] += graph.degree_at(pos);
        }
    }

    // l_c, O(E)
    let mut internal = vec![0usize; phenotype.len()];
    for &(a, b) in graph.edge_positions() {
        match (community_of[a], community_of[b]) {
            (Some(ca), Some(cb)) => {
                if ca == cb {
                    internal[ca] += 1;
                }
            }
            _ => {
                let missing = if community_of[a].is_none() { a } else { b };
                return Err(Error::InvalidPartition(format!(
                    "node {} is not assigned to any community",
                    graph.nodes()[missing]
                )));
            }
        }
    }

    // Q, O(C)
    let m = m as f64;
    let q = internal
        .iter()
        .zip(&degree_sum)
        .map(|(&ls, &ds)| {
            let expected = ds as f64 / (2.0 * m);
            ls as f64 / m - expected * expected
        })
        .sum();

    Ok(q)
}
