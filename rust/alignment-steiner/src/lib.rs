#![deny(missing_docs)]

//! Candidate Steiner-tree solutions and their ranking.
//!
//! Aligning a table's source columns with a semantic model means searching
//! an ontology graph for a small connected subgraph (an approximate Steiner
//! tree) that covers every required column. The search grows many partial
//! solutions at once; this crate provides the value every one of them is
//! kept in, [`Candidate`], and the total order used to rank them.
//!
//! A candidate is grown one mapped edge at a time. Each growth step updates
//! three quality signals:
//!
//! - **Confidence**: the product of the confidence of every accepted edge,
//!   with out-of-range values floored to [`MIN_CONFIDENCE`].
//! - **Coherence**: how strongly the member nodes cluster around provenance
//!   tags shared with historical models (see [`coherence`]).
//! - **Compactness**: how far the node count stays below a bound.
//!
//! and folds them into one score using [`ScoreWeights`]. Candidates rank by
//! score, highest first (see [`compare`]).
//!
//! ```
//! use std::sync::Arc;
//! use alignment_steiner::{Candidate, ColumnNode, InternalNode};
//!
//! let person = Arc::new(InternalNode::new("http://example.org/Person1", "Person1")
//!     .with_provenance(["model-1"]));
//! let name = Arc::new(ColumnNode::new("HN2", "personName").with_provenance(["model-1"]));
//! let source = Arc::new(ColumnNode::new("HN1", "name"));
//!
//! let mut candidate = Candidate::new(5);
//! assert!(candidate.grow(source.clone(), person.clone(), name.clone(), 0.5));
//!
//! assert_eq!(candidate.node_count(), 2);
//! assert_eq!(candidate.frequency(), 2);
//! assert!((candidate.score() - 1.91).abs() < 1e-9);
//!
//! // Nothing new to add: both endpoints are already members.
//! assert!(!candidate.grow(source, person, name, 0.9));
//! ```
//!
//! Branching searches keep candidates independent by cloning them, or by
//! using [`Candidate::with_edge`], which returns a grown copy:
//!
//! ```
//! use std::sync::Arc;
//! use alignment_steiner::{Candidate, ColumnNode, InternalNode};
//!
//! let base = Candidate::new(4);
//! let grown = base
//!     .with_edge(
//!         Arc::new(ColumnNode::new("HN1", "name")),
//!         Arc::new(InternalNode::new("Person1", "Person1")),
//!         Arc::new(ColumnNode::new("HN2", "personName")),
//!         0.7,
//!     )
//!     .expect("the edge adds new nodes");
//!
//! assert_eq!(base.node_count(), 0);
//! assert_eq!(grown.node_count(), 2);
//!
//! // Without shared provenance, the two extra nodes cost more in compactness
//! // than the edge earns in confidence.
//! assert!(grown.rank(&base).is_gt());
//! ```

mod node;
pub use node::*;

mod pattern;
pub use pattern::*;

pub mod coherence;
pub use coherence::{Coherence, CoherenceItem};

mod confidence;
pub use confidence::*;

mod weights;
pub use weights::*;

mod error;
pub use error::*;

mod candidate;
pub use candidate::*;

mod rank;
pub use rank::*;

mod report;
pub use report::*;
