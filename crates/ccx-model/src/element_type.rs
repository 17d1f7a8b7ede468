//! FRD element type codes and their VTK cell equivalents.
//!
//! Type codes follow the cgx manual (§ 11, element block). CalculiX and VTK
//! agree on the corner ordering of every supported shape; they disagree on
//! where the mid-side nodes of the quadratic brick, wedge and beam go, which
//! is what the permutation column captures.

use serde::Serialize;

/// VTK cell type codes emitted by the writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum VtkCellType {
    Line = 3,
    Triangle = 5,
    Quad = 9,
    Tetra = 10,
    Hexahedron = 12,
    Wedge = 13,
    QuadraticEdge = 21,
    QuadraticTriangle = 22,
    QuadraticQuad = 23,
    QuadraticTetra = 24,
    QuadraticHexahedron = 25,
    QuadraticWedge = 26,
}

impl VtkCellType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One row of the element type table.
#[derive(Debug, PartialEq, Eq)]
pub struct ElementType {
    /// Type code as written in the FRD element block
    pub frd_code: i32,
    /// cgx shape name (he8, te10, ...)
    pub name: &'static str,
    /// Target VTK cell
    pub cell_type: VtkCellType,
    /// Number of nodes in the connectivity record
    pub node_count: usize,
    /// `permutation[k]` is the FRD position of the node that goes into VTK slot `k`
    permutation: &'static [usize],
}

static ELEMENT_TYPES: [ElementType; 12] = [
    ElementType {
        frd_code: 1,
        name: "he8",
        cell_type: VtkCellType::Hexahedron,
        node_count: 8,
        permutation: &[0, 1, 2, 3, 4, 5, 6, 7],
    },
    ElementType {
        frd_code: 2,
        name: "pe6",
        cell_type: VtkCellType::Wedge,
        node_count: 6,
        permutation: &[0, 1, 2, 3, 4, 5],
    },
    ElementType {
        frd_code: 3,
        name: "te4",
        cell_type: VtkCellType::Tetra,
        node_count: 4,
        permutation: &[0, 1, 2, 3],
    },
    // FRD lists the vertical mid-side nodes before the top ones
    ElementType {
        frd_code: 4,
        name: "he20",
        cell_type: VtkCellType::QuadraticHexahedron,
        node_count: 20,
        permutation: &[
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 16, 17, 18, 19, 12, 13, 14, 15,
        ],
    },
    ElementType {
        frd_code: 5,
        name: "pe15",
        cell_type: VtkCellType::QuadraticWedge,
        node_count: 15,
        permutation: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 12, 13, 14, 9, 10, 11],
    },
    ElementType {
        frd_code: 6,
        name: "te10",
        cell_type: VtkCellType::QuadraticTetra,
        node_count: 10,
        permutation: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    },
    ElementType {
        frd_code: 7,
        name: "tr3",
        cell_type: VtkCellType::Triangle,
        node_count: 3,
        permutation: &[0, 1, 2],
    },
    ElementType {
        frd_code: 8,
        name: "tr6",
        cell_type: VtkCellType::QuadraticTriangle,
        node_count: 6,
        permutation: &[0, 1, 2, 3, 4, 5],
    },
    ElementType {
        frd_code: 9,
        name: "qu4",
        cell_type: VtkCellType::Quad,
        node_count: 4,
        permutation: &[0, 1, 2, 3],
    },
    ElementType {
        frd_code: 10,
        name: "qu8",
        cell_type: VtkCellType::QuadraticQuad,
        node_count: 8,
        permutation: &[0, 1, 2, 3, 4, 5, 6, 7],
    },
    ElementType {
        frd_code: 11,
        name: "be2",
        cell_type: VtkCellType::Line,
        node_count: 2,
        permutation: &[0, 1],
    },
    // Beam mid node sits between the end nodes in FRD, last in VTK
    ElementType {
        frd_code: 12,
        name: "be3",
        cell_type: VtkCellType::QuadraticEdge,
        node_count: 3,
        permutation: &[0, 2, 1],
    },
];

impl ElementType {
    /// Look up a FRD element type code.
    pub fn from_frd_code(code: i32) -> Option<&'static ElementType> {
        ELEMENT_TYPES.iter().find(|t| t.frd_code == code)
    }

    /// Every supported element type, ordered by FRD code.
    pub fn all() -> &'static [ElementType] {
        &ELEMENT_TYPES
    }

    pub fn permutation(&self) -> &'static [usize] {
        self.permutation
    }

    /// Reorder a connectivity list from FRD order into VTK order.
    ///
    /// `nodes` must hold exactly `node_count` entries.
    pub fn to_vtk_order<T: Copy>(&self, nodes: &[T]) -> Vec<T> {
        debug_assert_eq!(nodes.len(), self.node_count);
        self.permutation.iter().map(|&i| nodes[i]).collect()
    }

    /// Inverse of [`ElementType::to_vtk_order`].
    pub fn to_frd_order<T: Copy + Default>(&self, nodes: &[T]) -> Vec<T> {
        debug_assert_eq!(nodes.len(), self.node_count);
        let mut out = vec![T::default(); nodes.len()];
        for (slot, &source) in self.permutation.iter().enumerate() {
            out[source] = nodes[slot];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutations_are_bijections() {
        for ty in ElementType::all() {
            assert_eq!(ty.permutation().len(), ty.node_count, "{}", ty.name);
            let mut seen = vec![false; ty.node_count];
            for &i in ty.permutation() {
                assert!(i < ty.node_count, "{}: index {i} out of range", ty.name);
                assert!(!seen[i], "{}: index {i} repeated", ty.name);
                seen[i] = true;
            }
        }
    }

    #[test]
    fn reorder_round_trips() {
        for ty in ElementType::all() {
            let native: Vec<i32> = (1..=ty.node_count as i32).collect();
            let vtk = ty.to_vtk_order(&native);
            assert_eq!(ty.to_frd_order(&vtk), native, "{}", ty.name);
        }
    }

    #[test]
    fn quadratic_hex_moves_vertical_edges_last() {
        let he20 = ElementType::from_frd_code(4).expect("he20 is supported");
        let native: Vec<i32> = (1..=20).collect();
        let vtk = he20.to_vtk_order(&native);
        assert_eq!(&vtk[..12], &native[..12]);
        assert_eq!(&vtk[12..16], &[17, 18, 19, 20]);
        assert_eq!(&vtk[16..], &[13, 14, 15, 16]);
    }

    #[test]
    fn codes_map_to_vtk_cells() {
        let expected = [
            (1, 12),
            (2, 13),
            (3, 10),
            (4, 25),
            (5, 26),
            (6, 24),
            (7, 5),
            (8, 22),
            (9, 9),
            (10, 23),
            (11, 3),
            (12, 21),
        ];
        for (code, vtk) in expected {
            let ty = ElementType::from_frd_code(code).expect("known code");
            assert_eq!(ty.cell_type.code(), vtk, "FRD code {code}");
        }
        assert!(ElementType::from_frd_code(0).is_none());
        assert!(ElementType::from_frd_code(13).is_none());
    }
}
