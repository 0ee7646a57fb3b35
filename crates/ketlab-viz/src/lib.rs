//! Ketlab visualization.
//!
//! - [`draw`] renders a [`Circuit`](ketlab_ir::Circuit) as a box-drawing text
//!   diagram, one wire per qubit.
//! - [`array_to_latex`] renders amplitudes as a LaTeX `bmatrix`, with exact
//!   fractions and square roots where the value allows.
//!
//! ```rust
//! use ketlab_ir::Circuit;
//!
//! let circuit = Circuit::hadamard_cx().unwrap();
//! let diagram = ketlab_viz::draw(&circuit);
//! assert!(diagram.contains("q_0: ┤ H ├──■──"));
//! ```

pub mod latex;
pub mod text;

pub use latex::{LatexOptions, array_to_latex, matrix_to_latex, num_to_latex};
pub use text::{TextDiagram, draw};
