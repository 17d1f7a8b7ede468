//! Result blocks and their grouping into output steps.

use std::collections::HashMap;

use serde::Serialize;

use crate::invariants::{self, INVARIANT_NAMES, TensorMeasure};

/// Entity a result row is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Nodal,
    Elemental,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Nodal => f.write_str("node"),
            EntityKind::Elemental => f.write_str("element"),
        }
    }
}

/// Analysis type from the result block header (ICTYPE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisKind {
    Static,
    TimeStep,
    Frequency,
    LoadStep,
    UserNamed,
    Other(i32),
}

impl AnalysisKind {
    pub fn from_frd(code: i32) -> Self {
        match code {
            0 => AnalysisKind::Static,
            1 => AnalysisKind::TimeStep,
            2 => AnalysisKind::Frequency,
            3 => AnalysisKind::LoadStep,
            4 => AnalysisKind::UserNamed,
            other => AnalysisKind::Other(other),
        }
    }
}

/// Component type from the `-5` record (ICTYPE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    Scalar,
    Vector,
    Tensor,
    /// Amplitude/phase pairs (ICTYPE 12 and 14)
    Complex,
    /// Appended by this crate, not read from the file
    Derived,
    Other(i32),
}

impl ComponentKind {
    pub fn from_frd(code: i32) -> Self {
        match code {
            1 => ComponentKind::Scalar,
            2 => ComponentKind::Vector,
            4 => ComponentKind::Tensor,
            12 | 14 => ComponentKind::Complex,
            other => ComponentKind::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One field (DISP, STRESS, ...) of one output increment.
///
/// Values are stored row-major: one row of `ncomps()` values per entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBlock {
    /// 1-based output step, assigned by [`assign_steps`]
    pub step: usize,
    /// Increment counter as written in the file (NUMSTP)
    pub increment: i32,
    /// Time, frequency or load factor of the increment
    pub time: f64,
    pub analysis: AnalysisKind,
    pub name: String,
    pub location: EntityKind,
    components: Vec<Component>,
    entity_ids: Vec<i32>,
    values: Vec<f64>,
}

impl ResultBlock {
    pub fn new(
        name: impl Into<String>,
        location: EntityKind,
        increment: i32,
        time: f64,
        analysis: AnalysisKind,
        components: Vec<Component>,
    ) -> Self {
        Self {
            step: 0,
            increment,
            time,
            analysis,
            name: name.into(),
            location,
            components,
            entity_ids: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn ncomps(&self) -> usize {
        self.components.len()
    }

    /// Number of entity rows
    pub fn len(&self) -> usize {
        self.entity_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty()
    }

    pub fn entity_ids(&self) -> &[i32] {
        &self.entity_ids
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.ncomps();
        &self.values[i * n..(i + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = (i32, &[f64])> + '_ {
        self.entity_ids
            .iter()
            .copied()
            .zip(self.values.chunks(self.ncomps().max(1)))
    }

    /// Append one entity row. Returns `false` (and stores nothing) when the
    /// row length does not match the component count.
    pub fn push_row(&mut self, id: i32, row: &[f64]) -> bool {
        if row.len() != self.ncomps() {
            return false;
        }
        self.entity_ids.push(id);
        self.values.extend_from_slice(row);
        true
    }

    /// Map from entity id to row position
    pub fn row_index(&self) -> HashMap<i32, usize> {
        self.entity_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect()
    }

    /// Drop rows whose entity fails `keep`; returns the number dropped.
    pub fn retain_entities(&mut self, keep: impl Fn(i32) -> bool) -> usize {
        let n = self.ncomps();
        let before = self.entity_ids.len();
        let mut ids = Vec::with_capacity(before);
        let mut values = Vec::with_capacity(self.values.len());
        for (i, &id) in self.entity_ids.iter().enumerate() {
            if keep(id) {
                ids.push(id);
                values.extend_from_slice(&self.values[i * n..(i + 1) * n]);
            }
        }
        self.entity_ids = ids;
        self.values = values;
        before - self.entity_ids.len()
    }

    /// ERROR / HERROR blocks carry CalculiX's error estimator, not a result.
    pub fn is_error_indicator(&self) -> bool {
        self.name.to_ascii_uppercase().contains("ERROR")
    }

    /// Six tensor components as read from the file, nothing appended yet.
    pub fn is_symmetric_tensor(&self) -> bool {
        self.ncomps() == 6 && self.components.iter().all(|c| c.kind == ComponentKind::Tensor)
    }

    /// Append Mises and principal values to every row of a symmetric tensor
    /// field. Other fields are left untouched.
    pub fn append_invariants(&mut self) {
        if !self.is_symmetric_tensor() {
            return;
        }
        let measure = TensorMeasure::for_field(&self.name);
        let mut values = Vec::with_capacity(self.len() * 10);
        for row in self.values.chunks(6) {
            values.extend_from_slice(row);
            values.extend_from_slice(&invariants::invariants(row, measure));
        }
        self.values = values;
        self.components
            .extend(INVARIANT_NAMES.iter().map(|name| Component::new(*name, ComponentKind::Derived)));
    }
}

/// A view over the blocks of one output step.
#[derive(Debug, Clone)]
pub struct Step<'a> {
    pub index: usize,
    pub increment: i32,
    pub time: f64,
    pub blocks: Vec<&'a ResultBlock>,
}

impl<'a> Step<'a> {
    /// Fields attached to `location`, optionally without error indicators.
    pub fn fields(&self, location: EntityKind, skip_error_fields: bool) -> Vec<&'a ResultBlock> {
        self.blocks
            .iter()
            .copied()
            .filter(|b| b.location == location)
            .filter(|b| !(skip_error_fields && b.is_error_indicator()))
            .collect()
    }
}

/// Number the steps 1, 2, ... in order of first appearance of each
/// increment counter. Returns the number of steps.
pub fn assign_steps(blocks: &mut [ResultBlock]) -> usize {
    let mut seen: HashMap<i32, usize> = HashMap::new();
    for block in blocks.iter_mut() {
        let next = seen.len() + 1;
        block.step = *seen.entry(block.increment).or_insert(next);
    }
    seen.len()
}

/// Group blocks by their assigned step, in step order.
pub fn group_steps(blocks: &[ResultBlock]) -> Vec<Step<'_>> {
    let mut steps: Vec<Step<'_>> = Vec::new();
    for block in blocks {
        match steps.iter_mut().find(|s| s.index == block.step) {
            Some(step) => step.blocks.push(block),
            None => steps.push(Step {
                index: block.step,
                increment: block.increment,
                time: block.time,
                blocks: vec![block],
            }),
        }
    }
    steps.sort_by_key(|s| s.index);
    steps
}
