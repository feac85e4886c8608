//! Property-based tests for the spanning tree builders.
//!
//! Checks Borůvka and Prim against a dense reference tree computed over the
//! full mutual-reachability matrix, validates structural invariants
//! (edge count, connectivity, canonical endpoints) and confirms that results
//! do not depend on worker count or repeated execution. Union-find is
//! cross-checked against a breadth-first connectivity labelling.

mod determinism;
mod equivalence;
mod oracle;
mod strategies;
mod structural;
mod types;
mod union_find;
