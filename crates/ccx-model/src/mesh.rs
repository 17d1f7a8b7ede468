//! Node and element tables.

use std::collections::HashMap;

use crate::element_type::ElementType;

/// Node coordinates stored column-wise, sorted by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTable {
    ids: Vec<i32>,
    coords: Vec<[f64; 3]>,
    index: HashMap<i32, usize>,
}

impl NodeTable {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node ids in output (ascending) order
    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn coords(&self) -> &[[f64; 3]] {
        &self.coords
    }

    /// Position of a node id in the point list
    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Option<[f64; 3]> {
        self.index_of(id).map(|i| self.coords[i])
    }
}

/// Builds a sorted table; when an id repeats, the last occurrence wins.
impl FromIterator<(i32, [f64; 3])> for NodeTable {
    fn from_iter<I: IntoIterator<Item = (i32, [f64; 3])>>(iter: I) -> Self {
        let mut rows: Vec<(i32, [f64; 3])> = iter.into_iter().collect();
        rows.reverse();
        rows.sort_by_key(|(id, _)| *id);
        rows.dedup_by_key(|(id, _)| *id);

        let mut table = NodeTable {
            ids: Vec::with_capacity(rows.len()),
            coords: Vec::with_capacity(rows.len()),
            index: HashMap::with_capacity(rows.len()),
        };
        for (i, (id, xyz)) in rows.into_iter().enumerate() {
            table.ids.push(id);
            table.coords.push(xyz);
            table.index.insert(id, i);
        }
        table
    }
}

/// Element connectivity in CalculiX node order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: i32,
    pub kind: &'static ElementType,
    pub nodes: Vec<i32>,
}

impl Element {
    /// Returns `None` when the node count does not match the element type.
    pub fn new(id: i32, kind: &'static ElementType, nodes: Vec<i32>) -> Option<Self> {
        (nodes.len() == kind.node_count).then_some(Self { id, kind, nodes })
    }

    /// Node ids reordered for VTK
    pub fn vtk_nodes(&self) -> Vec<i32> {
        self.kind.to_vtk_order(&self.nodes)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub nodes: NodeTable,
    elements: Vec<Element>,
    element_index: HashMap<i32, usize>,
}

impl Mesh {
    /// Elements are sorted by id. Callers are expected to have removed
    /// elements that reference unknown nodes.
    pub fn new(nodes: NodeTable, mut elements: Vec<Element>) -> Self {
        elements.sort_by_key(|e| e.id);
        let element_index = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();
        Self {
            nodes,
            elements,
            element_index,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element_ids(&self) -> Vec<i32> {
        self.elements.iter().map(|e| e.id).collect()
    }

    pub fn element_index_of(&self, id: i32) -> Option<usize> {
        self.element_index.get(&id).copied()
    }

    /// 0-based point indices of an element in VTK node order.
    pub fn cell_connectivity(&self, element: &Element) -> Option<Vec<usize>> {
        element
            .vtk_nodes()
            .into_iter()
            .map(|id| self.nodes.index_of(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn te4() -> &'static ElementType {
        ElementType::from_frd_code(3).expect("te4")
    }

    #[test]
    fn node_table_sorts_and_indexes_sparse_ids() {
        let table: NodeTable = vec![
            (30, [3.0, 0.0, 0.0]),
            (10, [1.0, 0.0, 0.0]),
            (20, [2.0, 0.0, 0.0]),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.ids(), &[10, 20, 30]);
        assert_eq!(table.index_of(30), Some(2));
        assert_eq!(table.get(20), Some([2.0, 0.0, 0.0]));
        assert_eq!(table.index_of(15), None);
    }

    #[test]
    fn node_table_keeps_last_duplicate() {
        let table: NodeTable = vec![(1, [0.0; 3]), (1, [5.0, 5.0, 5.0])]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1), Some([5.0, 5.0, 5.0]));
    }

    #[test]
    fn element_rejects_wrong_node_count() {
        assert!(Element::new(1, te4(), vec![1, 2, 3]).is_none());
        assert!(Element::new(1, te4(), vec![1, 2, 3, 4]).is_some());
    }

    #[test]
    fn connectivity_uses_point_indices() {
        let nodes: NodeTable = [(100, [0.0; 3]), (7, [0.0; 3]), (50, [0.0; 3]), (8, [0.0; 3])]
            .into_iter()
            .collect();
        let element = Element::new(1, te4(), vec![100, 7, 50, 8]).expect("valid te4");
        let mesh = Mesh::new(nodes, vec![element]);
        let cell = &mesh.elements()[0];
        assert_eq!(mesh.cell_connectivity(cell), Some(vec![3, 0, 2, 1]));
    }
}
