//! Mesh and result model shared by the FRD reader and the ParaView writers.
//!
//! The model is built once by the parser and only read afterwards:
//! - [`ElementType`] maps FRD element codes to VTK cells and node orderings
//! - [`Mesh`] holds the node table and element connectivity
//! - [`ResultBlock`] holds one field of one increment; [`Step`] groups them
//! - [`invariants`] derives Mises and principal values of tensor fields

mod element_type;
pub mod invariants;
mod mesh;
mod results;
mod summary;

pub use element_type::{ElementType, VtkCellType};
pub use mesh::{Element, Mesh, NodeTable};
pub use results::{
    AnalysisKind, Component, ComponentKind, EntityKind, ResultBlock, Step, assign_steps,
    group_steps,
};
pub use summary::{FieldSummary, ModelSummary, StepSummary};
