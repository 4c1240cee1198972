//! Locus-based genotype codec.
//!
//! Each locus corresponds to a node and stores the gene index of one of its
//! neighbors. Reading every locus as an edge `i — genotype[i]` and taking
//! connected components yields a partition; because every value is a real
//! neighbor, every community is connected in the graph.
//!
//! The codec is the per-graph context shared by all operators: it is built
//! once from a [`Graph`] and only read afterwards.
//!
//! # References
//!
//! - Park & Song (1989), "A Genetic Algorithm for Clustering Problems"
//! - Pizzuti (2008), "GA-Net: A Genetic Algorithm for Community Detection
//!   in Social Networks"

use super::types::{Genotype, Phenotype};
use crate::disjoint_set::DisjointSet;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use rand::seq::IndexedRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

/// Gene ↔ node mapping plus per-locus neighbor genes.
#[derive(Debug, Clone)]
pub struct GenotypeCodec {
    gene_to_node: Vec<NodeId>,
    node_to_gene: FxHashMap<NodeId, usize>,
    neighbor_genes: Vec<Vec<usize>>,
}

impl GenotypeCodec {
    /// Builds the codec for `graph`.
    ///
    /// Gene indices follow the graph's node order.
    ///
    /// # Errors
    /// [`Error::InvalidGraph`] if the graph has no nodes.
    pub fn build(graph: &Graph) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(Error::InvalidGraph("graph has no nodes"));
        }

        let gene_to_node = graph.nodes().to_vec();
        let node_to_gene: FxHashMap<NodeId, usize> = gene_to_node
            .iter()
            .enumerate()
            .map(|(gene, &node)| (node, gene))
            .collect();

        let neighbor_genes = gene_to_node
            .iter()
            .map(|&node| {
                graph
                    .neighbors(node)
                    .into_iter()
                    .flatten()
                    .map(|nb| node_to_gene[&nb])
                    .collect()
            })
            .collect();

        Ok(Self {
            gene_to_node,
            node_to_gene,
            neighbor_genes,
        })
    }

    /// Number of loci (nodes).
    pub fn len(&self) -> usize {
        self.gene_to_node.len()
    }

    /// Always `false`: a codec is never built for an empty graph.
    pub fn is_empty(&self) -> bool {
        self.gene_to_node.is_empty()
    }

    /// Node represented by a gene index.
    pub fn node_of(&self, gene: usize) -> Option<NodeId> {
        self.gene_to_node.get(gene).copied()
    }

    /// Gene index of a node.
    pub fn gene_of(&self, node: NodeId) -> Option<usize> {
        self.node_to_gene.get(&node).copied()
    }

    /// Neighbor genes of a locus.
    pub fn neighbors(&self, gene: usize) -> Option<&[usize]> {
        self.neighbor_genes.get(gene).map(Vec::as_slice)
    }

    /// Samples a neighbor gene of `gene` uniformly.
    ///
    /// # Errors
    /// [`Error::IsolatedNode`] when the locus has no neighbors,
    /// [`Error::IndexOutOfRange`] when `gene` is not a locus.
    pub fn random_gene<R: Rng>(&self, gene: usize, rng: &mut R) -> Result<usize> {
        let neighbors = self.neighbors(gene).ok_or(Error::IndexOutOfRange {
            index: gene,
            len: self.len(),
        })?;
        neighbors
            .choose(rng)
            .copied()
            .ok_or(Error::IsolatedNode(self.gene_to_node[gene]))
    }

    /// Generates a random valid genotype, one neighbor draw per locus.
    pub fn generate_genotype<R: Rng>(&self, rng: &mut R) -> Result<Genotype> {
        (0..self.len()).map(|gene| self.random_gene(gene, rng)).collect()
    }

    /// Decodes a genotype into its community partition.
    ///
    /// # Errors
    /// [`Error::GenotypeLength`] on a length mismatch,
    /// [`Error::IndexOutOfRange`] for a value outside `0..len`.
    pub fn decode(&self, genotype: &[usize]) -> Result<Phenotype> {
        let n = self.len();
        if genotype.len() != n {
            return Err(Error::GenotypeLength {
                expected: n,
                found: genotype.len(),
            });
        }

        let mut ds = DisjointSet::new(n);
        for (x, &y) in genotype.iter().enumerate() {
            ds.union(x, y)?;
        }

        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut communities: Vec<Vec<NodeId>> = Vec::with_capacity(ds.set_count());
        for gene in 0..n {
            let root = ds.find(gene)?;
            let slot = match slot_of_root[root] {
                Some(s) => s,
                None => {
                    communities.push(Vec::new());
                    let s = communities.len() - 1;
                    slot_of_root[root] = Some(s);
                    s
                }
            };
            communities[slot].push(self.gene_to_node[gene]);
        }

        Ok(Phenotype::new(communities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_triangles() -> Graph {
        Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)])
    }

    #[test]
    fn test_build_mapping() {
        let g = Graph::from_edges([(10, 20), (20, 30)]);
        let codec = GenotypeCodec::build(&g).unwrap();
        assert_eq!(codec.len(), 3);
        assert_eq!(codec.node_of(0), Some(10));
        assert_eq!(codec.gene_of(30), Some(2));
        assert_eq!(codec.neighbors(1), Some(&[0, 2][..]));
        assert!(codec.node_of(3).is_none());
    }

    #[test]
    fn test_build_empty_graph_fails() {
        assert_eq!(
            GenotypeCodec::build(&Graph::new()).unwrap_err(),
            Error::InvalidGraph("graph has no nodes")
        );
    }

    #[test]
    fn test_generated_genes_are_neighbors() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let genotype = codec.generate_genotype(&mut rng).unwrap();
            assert_eq!(genotype.len(), 6);
            for (i, &v) in genotype.iter().enumerate() {
                assert!(codec.neighbors(i).unwrap().contains(&v));
            }
        }
    }

    #[test]
    fn test_isolated_node_fails() {
        let mut g = Graph::from_edges([(0, 1)]);
        g.add_node(9);
        let codec = GenotypeCodec::build(&g).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            codec.generate_genotype(&mut rng).unwrap_err(),
            Error::IsolatedNode(9)
        );
    }

    #[test]
    fn test_decode_groups_by_component() {
        let g = two_triangles();
        let codec = GenotypeCodec::build(&g).unwrap();
        // 0->1, 1->2, 2->0 | 3->4, 4->5, 5->3
        let phenotype = codec.decode(&[1, 2, 0, 4, 5, 3]).unwrap();
        assert_eq!(phenotype.communities(), &[vec![0, 1, 2], vec![3, 4, 5]]);

        // bridge locus 2 -> 3 merges everything
        let phenotype = codec.decode(&[1, 2, 3, 4, 5, 3]).unwrap();
        assert_eq!(phenotype.len(), 1);
        assert_eq!(phenotype.node_count(), 6);
    }

    #[test]
    fn test_decode_translates_to_node_ids() {
        let g = Graph::from_edges([(7, 8), (9, 10)]);
        let codec = GenotypeCodec::build(&g).unwrap();
        let phenotype = codec.decode(&[1, 0, 3, 2]).unwrap();
        assert_eq!(phenotype.communities(), &[vec![7, 8], vec![9, 10]]);
    }

    #[test]
    fn test_decode_rejects_bad_genotypes() {
        let codec = GenotypeCodec::build(&two_triangles()).unwrap();
        assert_eq!(
            codec.decode(&[1, 2]).unwrap_err(),
            Error::GenotypeLength {
                expected: 6,
                found: 2
            }
        );
        assert_eq!(
            codec.decode(&[1, 2, 0, 4, 5, 99]).unwrap_err(),
            Error::IndexOutOfRange { index: 99, len: 6 }
        );
    }

    proptest! {
        #[test]
        fn prop_decode_covers_every_node_once(
            raw in proptest::collection::vec(0usize..1000, 1..60),
        ) {
            let n = raw.len();
            // Complete graph so every value is a legal neighbor or self.
            let mut g = Graph::new();
            for i in 0..n {
                g.add_node(i);
            }
            for i in 0..n {
                for j in (i + 1)..n {
                    g.add_edge(i, j);
                }
            }
            let codec = GenotypeCodec::build(&g).unwrap();
            let genotype: Vec<usize> = raw.iter().map(|v| v % n).collect();
            let phenotype = codec.decode(&genotype).unwrap();

            prop_assert_eq!(phenotype.node_count(), n);
            prop_assert!(phenotype.communities().iter().all(|c| !c.is_empty()));
            let mut seen: Vec<usize> = phenotype.communities().iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }
}
