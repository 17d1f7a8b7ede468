//! VTU (XML unstructured grid) writer
//!
//! Points are `Float64`, connectivity and offsets `Int32`, cell types `UInt8`.
//! Every result array carries `ComponentName{i}` attributes so ParaView shows
//! the FRD component names (and the appended tensor invariants).
//!
//! Three data encodings are supported:
//! - [`VtuEncoding::Ascii`]: inline text
//! - [`VtuEncoding::Binary`]: inline base64; the `UInt32` byte-count header
//!   and the payload are encoded as two separate base64 blocks
//! - [`VtuEncoding::Appended`]: the same blocks collected in a trailing
//!   `AppendedData` section, each array pointing at its `offset`

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use ccx_model::{EntityKind, Step};

use crate::error::{Error, Result};
use crate::frd_reader::FrdFile;
use crate::output::{FieldArray, cell_connectivity, escape_attr, gather, write_buffered};

/// How `DataArray` contents are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VtuEncoding {
    #[default]
    Ascii,
    Binary,
    Appended,
}

impl VtuEncoding {
    fn format_attr(self) -> &'static str {
        match self {
            VtuEncoding::Ascii => "ascii",
            VtuEncoding::Binary => "binary",
            VtuEncoding::Appended => "appended",
        }
    }
}

impl fmt::Display for VtuEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_attr())
    }
}

impl FromStr for VtuEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(VtuEncoding::Ascii),
            "binary" => Ok(VtuEncoding::Binary),
            "appended" => Ok(VtuEncoding::Appended),
            other => Err(Error::InvalidOption(format!(
                "unknown VTU encoding '{other}' (expected ascii, binary or appended)"
            ))),
        }
    }
}

enum ArrayData {
    Float64(Vec<f64>),
    Int32(Vec<i32>),
    UInt8(Vec<u8>),
}

impl ArrayData {
    fn type_name(&self) -> &'static str {
        match self {
            ArrayData::Float64(_) => "Float64",
            ArrayData::Int32(_) => "Int32",
            ArrayData::UInt8(_) => "UInt8",
        }
    }

    fn text_values(&self) -> Vec<String> {
        match self {
            ArrayData::Float64(v) => v.iter().map(|x| format!("{x:?}")).collect(),
            ArrayData::Int32(v) => v.iter().map(i32::to_string).collect(),
            ArrayData::UInt8(v) => v.iter().map(u8::to_string).collect(),
        }
    }

    fn le_bytes(&self) -> Vec<u8> {
        match self {
            ArrayData::Float64(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            ArrayData::Int32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            ArrayData::UInt8(v) => v.clone(),
        }
    }
}

struct DataArray {
    name: String,
    ncomps: usize,
    component_names: Vec<String>,
    data: ArrayData,
}

impl DataArray {
    fn new(name: &str, ncomps: usize, data: ArrayData) -> Self {
        Self {
            name: name.to_string(),
            ncomps,
            component_names: Vec::new(),
            data,
        }
    }

    fn from_field(field: FieldArray) -> Self {
        Self {
            ncomps: field.ncomps(),
            component_names: field.components,
            name: field.name,
            data: ArrayData::Float64(field.values),
        }
    }
}

/// Header block (payload byte count as little-endian `UInt32`) followed by
/// the payload, base64-encoded separately.
fn encode_block(payload: &[u8]) -> io::Result<String> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            "data array exceeds the UInt32 header limit",
        )
    })?;
    let mut encoded = BASE64.encode(len.to_le_bytes());
    encoded.push_str(&BASE64.encode(payload));
    Ok(encoded)
}

/// VTU writer for FRD data
pub struct VtuWriter<'a> {
    frd: &'a FrdFile,
    skip_error_fields: bool,
    encoding: VtuEncoding,
}

impl<'a> VtuWriter<'a> {
    pub fn new(frd: &'a FrdFile) -> Self {
        Self {
            frd,
            skip_error_fields: true,
            encoding: VtuEncoding::default(),
        }
    }

    pub fn skip_error_fields(mut self, skip: bool) -> Self {
        self.skip_error_fields = skip;
        self
    }

    pub fn encoding(mut self, encoding: VtuEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Write mesh and results of one step
    pub fn write_step<P: AsRef<Path>>(&self, path: P, step: &Step<'_>) -> Result<()> {
        write_buffered(path.as_ref(), |w| self.write_to(w, Some(step)))
    }

    /// Write the mesh alone
    pub fn write_mesh<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_buffered(path.as_ref(), |w| self.write_to(w, None))
    }

    pub fn write_to<W: Write>(&self, w: &mut W, step: Option<&Step<'_>>) -> io::Result<()> {
        let mesh = &self.frd.mesh;
        let mut appended = String::new();

        writeln!(w, r#"<?xml version="1.0"?>"#)?;
        writeln!(
            w,
            r#"<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian" header_type="UInt32">"#
        )?;
        writeln!(w, r#"  <UnstructuredGrid>"#)?;
        if let Some(step) = step {
            writeln!(w, r#"    <FieldData>"#)?;
            writeln!(
                w,
                r#"      <DataArray type="Float64" Name="TimeValue" NumberOfTuples="1" format="ascii">{:?}</DataArray>"#,
                step.time
            )?;
            writeln!(w, r#"    </FieldData>"#)?;
        }
        writeln!(
            w,
            r#"    <Piece NumberOfPoints="{}" NumberOfCells="{}">"#,
            mesh.nodes.len(),
            mesh.elements().len()
        )?;

        let points: Vec<f64> = mesh.nodes.coords().iter().flatten().copied().collect();
        writeln!(w, r#"      <Points>"#)?;
        self.write_array(
            w,
            &DataArray::new("Points", 3, ArrayData::Float64(points)),
            &mut appended,
        )?;
        writeln!(w, r#"      </Points>"#)?;

        writeln!(w, r#"      <Cells>"#)?;
        for array in cell_arrays(self.frd)? {
            self.write_array(w, &array, &mut appended)?;
        }
        writeln!(w, r#"      </Cells>"#)?;

        if let Some(step) = step {
            for (location, tag) in [(EntityKind::Nodal, "PointData"), (EntityKind::Elemental, "CellData")] {
                let fields = gather(mesh, step, location, self.skip_error_fields);
                if fields.is_empty() {
                    continue;
                }
                writeln!(w, "      <{tag}>")?;
                for field in fields {
                    self.write_array(w, &DataArray::from_field(field), &mut appended)?;
                }
                writeln!(w, "      </{tag}>")?;
            }
        }

        writeln!(w, r#"    </Piece>"#)?;
        writeln!(w, r#"  </UnstructuredGrid>"#)?;
        if self.encoding == VtuEncoding::Appended {
            writeln!(w, r#"  <AppendedData encoding="base64">"#)?;
            writeln!(w, "   _{appended}")?;
            writeln!(w, r#"  </AppendedData>"#)?;
        }
        writeln!(w, r#"</VTKFile>"#)?;
        Ok(())
    }

    fn write_array<W: Write>(
        &self,
        w: &mut W,
        array: &DataArray,
        appended: &mut String,
    ) -> io::Result<()> {
        write!(
            w,
            r#"        <DataArray type="{}" Name="{}" NumberOfComponents="{}""#,
            array.data.type_name(),
            escape_attr(&array.name),
            array.ncomps
        )?;
        for (i, name) in array.component_names.iter().enumerate() {
            write!(w, r#" ComponentName{i}="{}""#, escape_attr(name))?;
        }
        write!(w, r#" format="{}""#, self.encoding.format_attr())?;

        match self.encoding {
            VtuEncoding::Ascii => {
                writeln!(w, ">")?;
                let values = array.data.text_values();
                let per_line = if array.ncomps > 1 { array.ncomps } else { 6 };
                for line in values.chunks(per_line) {
                    writeln!(w, "          {}", line.join(" "))?;
                }
                writeln!(w, "        </DataArray>")?;
            }
            VtuEncoding::Binary => {
                let encoded = encode_block(&array.data.le_bytes())?;
                writeln!(w, ">")?;
                writeln!(w, "          {encoded}")?;
                writeln!(w, "        </DataArray>")?;
            }
            VtuEncoding::Appended => {
                writeln!(w, r#" offset="{}"/>"#, appended.len())?;
                appended.push_str(&encode_block(&array.data.le_bytes())?);
            }
        }
        Ok(())
    }
}

/// `connectivity`, `offsets` and `types` arrays of the `Cells` section.
fn cell_arrays(frd: &FrdFile) -> io::Result<[DataArray; 3]> {
    let cells = cell_connectivity(&frd.mesh)?;
    let to_i32 = |v: usize| {
        i32::try_from(v).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "mesh exceeds Int32 indexing")
        })
    };

    let mut connectivity = Vec::with_capacity(cells.iter().map(Vec::len).sum());
    let mut offsets = Vec::with_capacity(cells.len());
    for cell in &cells {
        for &index in cell {
            connectivity.push(to_i32(index)?);
        }
        offsets.push(to_i32(connectivity.len())?);
    }
    let types: Vec<u8> = frd
        .mesh
        .elements()
        .iter()
        .map(|e| e.kind.cell_type.code())
        .collect();

    Ok([
        DataArray::new("connectivity", 1, ArrayData::Int32(connectivity)),
        DataArray::new("offsets", 1, ArrayData::Int32(offsets)),
        DataArray::new("types", 1, ArrayData::UInt8(types)),
    ])
}
