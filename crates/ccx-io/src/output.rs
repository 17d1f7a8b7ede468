//! Output plumbing shared by the VTK, VTU and PVD writers.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ccx_model::{EntityKind, Mesh, ResultBlock, Step};
use tracing::debug;

use crate::error::{Error, Result};

/// One output array: a field scattered onto every point or cell of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldArray {
    pub name: String,
    pub components: Vec<String>,
    /// Row-major, `components.len()` values per tuple
    pub values: Vec<f64>,
}

impl FieldArray {
    pub fn ncomps(&self) -> usize {
        self.components.len()
    }

    pub fn tuples(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks(self.ncomps().max(1))
    }
}

/// Scatter the step's fields at `location` onto the mesh ordering
/// (node id order for points, element id order for cells). Entities without
/// a row get zeros.
pub(crate) fn gather(
    mesh: &Mesh,
    step: &Step<'_>,
    location: EntityKind,
    skip_error_fields: bool,
) -> Vec<FieldArray> {
    step.fields(location, skip_error_fields)
        .into_iter()
        .map(|block| scatter(mesh, block))
        .collect()
}

fn scatter(mesh: &Mesh, block: &ResultBlock) -> FieldArray {
    let n = block.ncomps();
    let tuples = match block.location {
        EntityKind::Nodal => mesh.nodes.len(),
        EntityKind::Elemental => mesh.elements().len(),
    };
    let mut values = vec![0.0; tuples * n];
    for (id, row) in block.rows() {
        let slot = match block.location {
            EntityKind::Nodal => mesh.nodes.index_of(id),
            EntityKind::Elemental => mesh.element_index_of(id),
        };
        if let Some(i) = slot {
            values[i * n..(i + 1) * n].copy_from_slice(row);
        }
    }
    FieldArray {
        name: block.name.clone(),
        components: block.components().iter().map(|c| c.name.clone()).collect(),
        values,
    }
}

/// 0-based point indices of every cell, in VTK node order.
pub(crate) fn cell_connectivity(mesh: &Mesh) -> io::Result<Vec<Vec<usize>>> {
    mesh.elements()
        .iter()
        .map(|element| {
            mesh.cell_connectivity(element).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("element {} references an unknown node", element.id),
                )
            })
        })
        .collect()
}

/// Create `path` (and its parent directory), run `write` on a buffered
/// handle and flush it.
pub(crate) fn write_buffered<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    ensure_parent_dir(path).map_err(|e| Error::io(path.display(), e))?;
    let file = File::create(path).map_err(|e| Error::io(path.display(), e))?;
    let mut w = BufWriter::new(file);
    write(&mut w)
        .and_then(|()| w.flush())
        .map_err(|e| Error::io(path.display(), e))?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Escape text for use inside a double-quoted XML attribute.
pub(crate) fn escape_attr(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccx_model::{
        AnalysisKind, Component, ComponentKind, Element, ElementType, NodeTable, assign_steps,
        group_steps,
    };

    #[test]
    fn missing_nodes_are_zero_filled() {
        let nodes: NodeTable = [(10, [0.0; 3]), (20, [1.0; 3]), (30, [2.0; 3]), (40, [3.0; 3])]
            .into_iter()
            .collect();
        let te4 = ElementType::from_frd_code(3).expect("te4");
        let mesh = Mesh::new(
            nodes,
            vec![Element::new(1, te4, vec![10, 20, 30, 40]).expect("te4")],
        );

        let mut temp = ResultBlock::new(
            "NDTEMP",
            EntityKind::Nodal,
            1,
            0.0,
            AnalysisKind::Static,
            vec![Component::new("T", ComponentKind::Scalar)],
        );
        temp.push_row(30, &[7.0]);
        temp.push_row(10, &[5.0]);
        let mut blocks = vec![temp];
        assign_steps(&mut blocks);
        let steps = group_steps(&blocks);

        let arrays = gather(&mesh, &steps[0], EntityKind::Nodal, true);
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].values, vec![5.0, 0.0, 7.0, 0.0]);
        assert_eq!(arrays[0].tuples().count(), 4);
        assert!(gather(&mesh, &steps[0], EntityKind::Elemental, true).is_empty());

        assert_eq!(cell_connectivity(&mesh).expect("known nodes"), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn attribute_escaping() {
        assert!(matches!(escape_attr("DISP"), Cow::Borrowed("DISP")));
        assert_eq!(escape_attr(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn buffered_write_creates_parent_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("out.txt");
        write_buffered(&path, |w| w.write_all(b"hello")).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "hello");
    }
}
