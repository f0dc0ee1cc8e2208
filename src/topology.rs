//! Topology - directed connectivity graphs over simulated nodes.
//!
//! A topology is the edge list the engine wires its recurrent network from:
//! two parallel integer sequences `pre` and `post` of equal length, each
//! value a node index in `[0, N)`. Nodes have no attributes beyond their
//! index; their existence is implicit in the index range.
//!
//! Three connection policies are supported:
//!
//! - [`ConnectionPolicy::FullyConnected`] generates every ordered pair
//!   exactly once, optionally including the diagonal.
//! - [`ConnectionPolicy::FixedList`] carries a hand-specified edge list for
//!   small manually-curated graphs.
//! - [`ConnectionPolicy::Random`] keeps each ordered non-self pair with a
//!   seeded Bernoulli draw, for sparse topologies.
//!
//! Pair generation is row-major (first index ascending as the outer loop)
//! so fixtures are deterministic and reproducible; the engine must not
//! depend on edge order semantically.
//!
//! # Example
//!
//! ```
//! use relab::{ConnectionPolicy, Topology};
//!
//! let topo = Topology::fully_connected(5, false);
//! assert_eq!(topo.num_edges(), 20);
//! assert!(topo.edges().all(|(pre, post)| pre != post));
//! ```

use crate::{Dataset, RelabError, Result};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Container field name for the pre-synaptic index sequence.
pub const PRE_FIELD: &str = "pre";
/// Container field name for the post-synaptic index sequence.
pub const POST_FIELD: &str = "post";

/// How edges are generated for a given node count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConnectionPolicy {
    /// Every ordered pair `(i, j)` exactly once; `(i, i)` only when
    /// `self_connections` is set.
    FullyConnected {
        /// Include the diagonal of the adjacency matrix
        self_connections: bool,
    },

    /// A literal, hand-specified edge list. Duplicates are permitted;
    /// indices are validated against the node count.
    FixedList(Vec<(u32, u32)>),

    /// Each ordered non-self pair is kept independently with probability
    /// `1 - sparsity`, deterministically under `seed`.
    Random {
        /// Fraction of possible edges to drop, in `[0, 1)`
        sparsity: f64,
        /// RNG seed
        seed: u64,
    },
}

/// A directed graph over `num_nodes` nodes, stored as parallel `pre`/`post`
/// index sequences.
///
/// Invariants: `pre.len() == post.len()`, and every value in both sequences
/// lies in `[0, num_nodes)`. Topologies are immutable experiment inputs;
/// once built they are written to a container and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    num_nodes: usize,
    pre: Vec<u32>,
    post: Vec<u32>,
}

impl Topology {
    /// Build a topology for `num_nodes` nodes under the given policy.
    ///
    /// # Errors
    ///
    /// `NodeOutOfRange` if a fixed-list edge references an index `>=
    /// num_nodes`; `InvalidParameter` if a random policy's sparsity is
    /// outside `[0, 1)`.
    pub fn build(num_nodes: usize, policy: &ConnectionPolicy) -> Result<Self> {
        let topo = match policy {
            ConnectionPolicy::FullyConnected { self_connections } => {
                Ok(Self::fully_connected(num_nodes, *self_connections))
            }
            ConnectionPolicy::FixedList(edges) => Self::from_edges(num_nodes, edges),
            ConnectionPolicy::Random { sparsity, seed } => {
                Self::random(num_nodes, *sparsity, *seed)
            }
        }?;
        debug!(
            num_nodes,
            num_edges = topo.num_edges(),
            ?policy,
            "built topology"
        );
        Ok(topo)
    }

    /// Build the fully-connected topology: every ordered pair `(i, j)` with
    /// `i, j` in `[0, N)` exactly once, excluding `i == j` unless
    /// `self_connections` is set.
    ///
    /// `N = 0` and `N = 1` without self-connections yield an empty edge
    /// list.
    pub fn fully_connected(num_nodes: usize, self_connections: bool) -> Self {
        let (pre, post) = (0..num_nodes as u32)
            .cartesian_product(0..num_nodes as u32)
            .filter(|(i, j)| self_connections || i != j)
            .unzip();
        Self {
            num_nodes,
            pre,
            post,
        }
    }

    /// Build a topology from a literal edge list.
    ///
    /// Duplicate edges are kept as given (the builder does not deduplicate).
    ///
    /// # Errors
    ///
    /// `NodeOutOfRange` if any endpoint is `>= num_nodes`.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32)]) -> Result<Self> {
        for &(pre, post) in edges {
            for index in [pre, post] {
                if index as usize >= num_nodes {
                    return Err(RelabError::NodeOutOfRange { index, num_nodes });
                }
            }
        }
        let (pre, post) = edges.iter().copied().unzip();
        Ok(Self {
            num_nodes,
            pre,
            post,
        })
    }

    /// Build a sparse random topology. Each ordered non-self pair is kept
    /// with probability `1 - sparsity`; the draw order is row-major so the
    /// result is fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `sparsity` is outside `[0, 1)`.
    pub fn random(num_nodes: usize, sparsity: f64, seed: u64) -> Result<Self> {
        if !(0.0..1.0).contains(&sparsity) {
            return Err(RelabError::InvalidParameter(format!(
                "sparsity must be in [0, 1), got {}",
                sparsity
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let (pre, post) = (0..num_nodes as u32)
            .cartesian_product(0..num_nodes as u32)
            .filter(|(i, j)| i != j && rng.gen::<f64>() >= sparsity)
            .unzip();
        Ok(Self {
            num_nodes,
            pre,
            post,
        })
    }

    /// Number of nodes the topology spans.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.pre.len()
    }

    /// The pre-synaptic index sequence.
    pub fn pre(&self) -> &[u32] {
        &self.pre
    }

    /// The post-synaptic index sequence.
    pub fn post(&self) -> &[u32] {
        &self.post
    }

    /// Iterate over `(pre, post)` pairs in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pre.iter().copied().zip(self.post.iter().copied())
    }

    /// Package the edge list as a "network" container with `pre` and `post`
    /// integer fields.
    pub fn to_dataset(&self) -> Dataset {
        let mut ds = Dataset::new();
        ds.insert_ints(PRE_FIELD, self.pre.iter().map(|&v| v as i64).collect());
        ds.insert_ints(POST_FIELD, self.post.iter().map(|&v| v as i64).collect());
        ds
    }

    /// Reconstruct a topology from a "network" container.
    ///
    /// The node count is inferred as `max(index) + 1`, matching how the
    /// engine sizes its network from the same file.
    ///
    /// # Errors
    ///
    /// `MissingField` if `pre` or `post` is absent, `Shape` if the two
    /// sequences differ in length, `InvalidParameter` if an index is
    /// negative.
    pub fn from_dataset(ds: &Dataset) -> Result<Self> {
        let pre = ds.ints(PRE_FIELD)?;
        let post = ds.ints(POST_FIELD)?;
        if pre.len() != post.len() {
            return Err(RelabError::Shape(format!(
                "pre/post different sizes ({}/{})",
                pre.len(),
                post.len()
            )));
        }
        let narrow = |v: &[i64]| -> Result<Vec<u32>> {
            v.iter()
                .map(|&i| {
                    u32::try_from(i).map_err(|_| {
                        RelabError::InvalidParameter(format!("negative node index {}", i))
                    })
                })
                .collect()
        };
        let pre = narrow(pre)?;
        let post = narrow(post)?;
        let num_nodes = pre
            .iter()
            .chain(post.iter())
            .max()
            .map_or(0, |&m| m as usize + 1);
        Ok(Self {
            num_nodes,
            pre,
            post,
        })
    }
}
