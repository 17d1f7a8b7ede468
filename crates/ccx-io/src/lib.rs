//! CalculiX result (.frd) reading and ParaView (.vtk/.vtu/.pvd) export.
//!
//! This crate provides:
//! - **FRD reader**: nodes, elements and result blocks, with recovery from
//!   truncated or partly malformed files ([`ParseWarning`])
//! - **Legacy VTK writer**: ASCII `.vtk`, one file per step
//! - **VTU writer**: XML `.vtu` with ascii, inline base64 or appended data
//! - **PVD writer**: ParaView collection for multi-step VTU output
//! - **Converter**: the per-step file naming and error policy of `ccx2paraview`

mod converter;
mod error;
pub mod frd_reader;
pub mod numeric;
mod output;
pub mod pvd_writer;
pub mod vtk_writer;
pub mod vtu_writer;

pub use converter::{
    ConversionReport, ConvertOptions, Converter, OutputFormat, StepFailure, step_file_name,
};
pub use error::{BlockKind, Error, ParseWarning, Result};
pub use frd_reader::{FrdFile, FrdHeader};
pub use pvd_writer::{PvdEntry, write_pvd};
pub use vtk_writer::VtkWriter;
pub use vtu_writer::{VtuEncoding, VtuWriter};
