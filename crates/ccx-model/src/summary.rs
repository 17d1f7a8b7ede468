//! Serializable overview of a parsed result file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::mesh::Mesh;
use crate::results::{EntityKind, ResultBlock, group_steps};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub nodes: usize,
    pub elements: usize,
    /// Element count per cgx shape name
    pub element_types: BTreeMap<String, usize>,
    pub steps: Vec<StepSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub index: usize,
    pub increment: i32,
    pub time: f64,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub location: EntityKind,
    pub components: Vec<String>,
    pub entities: usize,
    pub error_indicator: bool,
}

impl ModelSummary {
    pub fn new(mesh: &Mesh, blocks: &[ResultBlock]) -> Self {
        let mut element_types = BTreeMap::<String, usize>::new();
        for element in mesh.elements() {
            *element_types.entry(element.kind.name.to_string()).or_insert(0) += 1;
        }

        let steps = group_steps(blocks)
            .into_iter()
            .map(|step| StepSummary {
                index: step.index,
                increment: step.increment,
                time: step.time,
                fields: step
                    .blocks
                    .iter()
                    .map(|b| FieldSummary {
                        name: b.name.clone(),
                        location: b.location,
                        components: b.components().iter().map(|c| c.name.clone()).collect(),
                        entities: b.len(),
                        error_indicator: b.is_error_indicator(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            nodes: mesh.nodes.len(),
            elements: mesh.elements().len(),
            element_types,
            steps,
        }
    }
}
