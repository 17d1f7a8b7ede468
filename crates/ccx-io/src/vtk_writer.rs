//! Legacy VTK writer for ParaView visualization
//!
//! Writes one ASCII `.vtk` file (`DATASET UNSTRUCTURED_GRID`) per output step.
//! Result fields go into `FIELD FieldData` sections under `POINT_DATA` and
//! `CELL_DATA`, one array per FRD field with all its components, so tensor
//! fields keep their four appended invariants.
//!
//! Legacy arrays carry no component names. Tensor components are written in
//! this fixed order:
//!
//! | index | component |
//! |-------|-----------|
//! | 0..=5 | xx, yy, zz, xy, yz, zx |
//! | 6 | Mises |
//! | 7 | Min Principal |
//! | 8 | Mid Principal |
//! | 9 | Max Principal |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ccx_io::{FrdFile, VtkWriter};
//!
//! let frd = FrdFile::from_file("job.frd")?;
//! let writer = VtkWriter::new(&frd);
//! for step in frd.steps() {
//!     writer.write_step(format!("job.{}.vtk", step.index), &step)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Write};
use std::path::Path;

use ccx_model::{EntityKind, Step};

use crate::error::Result;
use crate::frd_reader::FrdFile;
use crate::output::{FieldArray, cell_connectivity, gather, write_buffered};

/// Legacy VTK writer for FRD data
pub struct VtkWriter<'a> {
    frd: &'a FrdFile,
    skip_error_fields: bool,
}

impl<'a> VtkWriter<'a> {
    /// Create a new VTK writer for the given FRD file. Error indicator fields
    /// are skipped unless [`VtkWriter::skip_error_fields`] says otherwise.
    pub fn new(frd: &'a FrdFile) -> Self {
        Self {
            frd,
            skip_error_fields: true,
        }
    }

    pub fn skip_error_fields(mut self, skip: bool) -> Self {
        self.skip_error_fields = skip;
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
        self.write_header(w, step)?;
        self.write_points(w)?;
        self.write_cells(w)?;

        if let Some(step) = step {
            let mesh = &self.frd.mesh;
            let point_fields = gather(mesh, step, EntityKind::Nodal, self.skip_error_fields);
            let cell_fields = gather(mesh, step, EntityKind::Elemental, self.skip_error_fields);
            if !point_fields.is_empty() {
                writeln!(w, "POINT_DATA {}", mesh.nodes.len())?;
                write_field_data(w, &point_fields, mesh.nodes.len())?;
            }
            if !cell_fields.is_empty() {
                writeln!(w, "CELL_DATA {}", mesh.elements().len())?;
                write_field_data(w, &cell_fields, mesh.elements().len())?;
            }
        }
        Ok(())
    }

    fn write_header<W: Write>(&self, w: &mut W, step: Option<&Step<'_>>) -> io::Result<()> {
        let job = match self.frd.header.job_name.as_str() {
            "" => "CalculiX results",
            name => name,
        };
        writeln!(w, "# vtk DataFile Version 3.0")?;
        // the title line is limited to 256 characters
        let title = match step {
            Some(step) => format!("{job} step {} time {:?}", step.index, step.time),
            None => format!("{job} mesh"),
        };
        writeln!(w, "{}", title.chars().take(255).collect::<String>())?;
        writeln!(w, "ASCII")?;
        writeln!(w, "DATASET UNSTRUCTURED_GRID")?;
        Ok(())
    }

    /// Write node coordinates (POINTS) in node id order
    fn write_points<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let nodes = &self.frd.mesh.nodes;
        writeln!(w, "POINTS {} double", nodes.len())?;
        for [x, y, z] in nodes.coords() {
            writeln!(w, "{x:?} {y:?} {z:?}")?;
        }
        Ok(())
    }

    /// Write element connectivity (CELLS) and CELL_TYPES
    fn write_cells<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mesh = &self.frd.mesh;
        let cells = cell_connectivity(mesh)?;
        let size: usize = cells.iter().map(|c| 1 + c.len()).sum();

        writeln!(w, "CELLS {} {}", cells.len(), size)?;
        for cell in &cells {
            write!(w, "{}", cell.len())?;
            for index in cell {
                write!(w, " {index}")?;
            }
            writeln!(w)?;
        }

        writeln!(w, "CELL_TYPES {}", cells.len())?;
        for element in mesh.elements() {
            writeln!(w, "{}", element.kind.cell_type.code())?;
        }
        Ok(())
    }
}

fn write_field_data<W: Write>(w: &mut W, fields: &[FieldArray], tuples: usize) -> io::Result<()> {
    writeln!(w, "FIELD FieldData {}", fields.len())?;
    for field in fields {
        writeln!(
            w,
            "{} {} {} double",
            legacy_name(&field.name),
            field.ncomps(),
            tuples
        )?;
        for tuple in field.tuples() {
            let line: Vec<String> = tuple.iter().map(|v| format!("{v:?}")).collect();
            writeln!(w, "{}", line.join(" "))?;
        }
    }
    Ok(())
}

/// Legacy array names end at the first blank.
fn legacy_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frd_with_stress() -> FrdFile {
        let text = concat!(
            "    1Cplate\n",
            "    2C                             4                                     1\n",
            " -1         1 0.00000E+00 0.00000E+00 0.00000E+00\n",
            " -1         2 1.00000E+00 0.00000E+00 0.00000E+00\n",
            " -1         3 0.00000E+00 1.00000E+00 0.00000E+00\n",
            " -1         4 0.00000E+00 0.00000E+00 1.00000E+00\n",
            " -3\n",
            "    3C                             1                                     1\n",
            " -1         1    3    0    1\n",
            " -2         1         2         3         4\n",
            " -3\n",
            "  100CL  101 1.00000E+00           4                     0    1           1\n",
            " -4  STRESS      6    1\n",
            " -5  SXX         1    4    1    1\n",
            " -5  SYY         1    4    2    2\n",
            " -5  SZZ         1    4    3    3\n",
            " -5  SXY         1    4    1    2\n",
            " -5  SYZ         1    4    2    3\n",
            " -5  SZX         1    4    3    1\n",
            " -1         2 3.00000E+02 2.00000E+02 1.00000E+02 0.00000E+00 0.00000E+00 0.00000E+00\n",
            " -3\n",
            "  100CL  101 1.00000E+00           1                     0    1           1\n",
            " -4  ERROR       1    1\n",
            " -5  STR(%)      1    1    0    0\n",
            " -1         2 5.00000E+00\n",
            " -3\n",
            " 9999\n",
        );
        FrdFile::parse_str(text).expect("valid FRD")
    }

    fn render(writer: &VtkWriter<'_>, step: Option<&Step<'_>>) -> String {
        let mut out = Vec::new();
        writer.write_to(&mut out, step).expect("write to memory");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn writes_mesh_sections() {
        let frd = frd_with_stress();
        let text = render(&VtkWriter::new(&frd), None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# vtk DataFile Version 3.0");
        assert_eq!(lines[1], "plate mesh");
        assert_eq!(lines[4], "POINTS 4 double");
        assert_eq!(lines[6], "1.0 0.0 0.0");
        assert_eq!(lines[9], "CELLS 1 5");
        assert_eq!(lines[10], "4 0 1 2 3");
        assert_eq!(lines[11], "CELL_TYPES 1");
        assert_eq!(lines[12], "10");
        assert!(!text.contains("POINT_DATA"));
    }

    #[test]
    fn tensor_field_carries_invariants_and_skips_error() {
        let frd = frd_with_stress();
        let steps = frd.steps();
        let text = render(&VtkWriter::new(&frd), Some(&steps[0]));

        assert!(text.contains("plate step 1 time 1.0"));
        assert!(text.contains("POINT_DATA 4\nFIELD FieldData 1\nSTRESS 10 4 double\n"));
        let node2 = text
            .lines()
            .skip_while(|l| !l.starts_with("STRESS"))
            .nth(2)
            .expect("row of node 2");
        let values: Vec<f64> = node2
            .split_whitespace()
            .map(|v| v.parse().expect("float"))
            .collect();
        assert_eq!(&values[..3], &[300.0, 200.0, 100.0]);
        assert!((values[6] - 30000.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(&values[7..], &[100.0, 200.0, 300.0]);
        assert!(!text.contains("ERROR"));

        let with_error = render(&VtkWriter::new(&frd).skip_error_fields(false), Some(&steps[0]));
        assert!(with_error.contains("FIELD FieldData 2\nSTRESS 10 4 double\n"));
        assert!(with_error.contains("ERROR 1 4 double\n0.0\n5.0\n0.0\n0.0\n"));
    }

    #[test]
    fn legacy_names_have_no_blanks() {
        assert_eq!(legacy_name("Max Principal"), "Max_Principal");
        assert_eq!(legacy_name("DISP"), "DISP");
    }
}
