//! CalculiX FRD (result) file reader
//!
//! Reads CalculiX .frd result files into a [`FrdFile`]: node table, element
//! connectivity and one [`ResultBlock`] per field and increment.
//! Based on the FRD format description of the cgx manual, § 11.
//!
//! ## Format Overview
//!
//! Every record starts with a key code:
//! - `1C`, `1U`, `1P`: model header, user header and step parameter lines
//! - `2C`: node block, followed by `-1` records (id, three `E12.5` coordinates)
//! - `3C`: element block, `-1` records (id, type, group, material) each followed
//!   by `-2` records holding the connectivity
//! - `100C`: result block, a `-4` dataset record, one `-5` record per component
//!   and `-1`/`-2` value records
//! - `-3` closes a block, `9999` ends the file
//!
//! Block headers carry a format flag: 0 for short records (`I5` ids), 1 for
//! long records (`I10` ids). Binary blocks (flag 2) are rejected.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ccx_io::FrdFile;
//!
//! let frd = FrdFile::from_file("job.frd")?;
//! println!("Nodes: {}, Elements: {}", frd.mesh.nodes.len(), frd.mesh.elements().len());
//! println!("Steps: {}", frd.steps().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use ccx_model::{
    AnalysisKind, Component, ComponentKind, Element, ElementType, EntityKind, Mesh,
    ModelSummary, NodeTable, ResultBlock, Step, assign_steps, group_steps,
};
use tracing::{debug, info, warn};

use crate::error::{BlockKind, Error, ParseWarning, Result};
use crate::numeric::{column, columns, parse_frd_float, parse_frd_int};

/// Width of an `E12.5` value field
const FLOAT_WIDTH: usize = 12;

/// Parsed FRD file: the mesh/field model handed to the writers.
#[derive(Debug, Clone)]
pub struct FrdFile {
    /// Header information
    pub header: FrdHeader,
    /// Nodes and elements
    pub mesh: Mesh,
    /// Result blocks in file order, with step indices assigned
    pub result_blocks: Vec<ResultBlock>,
    /// Problems recovered from while parsing
    pub warnings: Vec<ParseWarning>,
}

/// FRD file header
#[derive(Debug, Clone, Default)]
pub struct FrdHeader {
    /// Model name from the `1C` record
    pub job_name: String,
    /// `1U` and `1P` records, verbatim
    pub info: Vec<String>,
}

impl FrdFile {
    /// Read FRD file from path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path.display(), e))?;
        info!("parsing {}", path.display());
        FrdParser::new(BufReader::new(file), path.display().to_string()).run()
    }

    /// Read FRD data from a buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        FrdParser::new(reader, "<input>".to_string()).run()
    }

    pub fn parse_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Result blocks grouped by output step
    pub fn steps(&self) -> Vec<Step<'_>> {
        group_steps(&self.result_blocks)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary::new(&self.mesh, &self.result_blocks)
    }
}

/// Leading key of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
    Header,
    NodeBlock,
    ElementBlock,
    ResultBlock,
    /// `-1`
    First,
    /// `-2`
    Continuation,
    /// `-3`
    BlockEnd,
    /// `-4`
    Dataset,
    /// `-5`
    Component,
    EndOfData,
    Blank,
    Unknown,
}

impl Record {
    fn classify(line: &str) -> Self {
        let t = line.trim_start();
        if t.is_empty() {
            return Record::Blank;
        }
        if let Some(rest) = t.strip_prefix('-') {
            return match rest.as_bytes().first() {
                Some(b'1') => Record::First,
                Some(b'2') => Record::Continuation,
                Some(b'3') => Record::BlockEnd,
                Some(b'4') => Record::Dataset,
                Some(b'5') => Record::Component,
                _ => Record::Unknown,
            };
        }
        if t.starts_with("100C") {
            Record::ResultBlock
        } else if t.starts_with("9999") {
            Record::EndOfData
        } else if t.starts_with("2C") {
            Record::NodeBlock
        } else if t.starts_with("3C") {
            Record::ElementBlock
        } else if t.starts_with("1C") || t.starts_with("1U") || t.starts_with("1P") {
            Record::Header
        } else {
            Record::Unknown
        }
    }
}

/// Text after the two-character key of a `-n` record.
fn record_body(line: &str) -> &str {
    let key_start = line.len() - line.trim_start().len();
    line.get(key_start + 2..).unwrap_or("")
}

/// Record layout selected by a block header's format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordFormat {
    Short,
    Long,
}

impl RecordFormat {
    /// Width of the entity id field, and of each connectivity field
    fn id_width(self) -> usize {
        match self {
            RecordFormat::Short => 5,
            RecordFormat::Long => 10,
        }
    }
}

/// Fields of the `100C` record, located relative to the `C`.
#[derive(Debug, Clone, PartialEq)]
struct ResultHeader {
    time: f64,
    analysis: i32,
    increment: Option<i32>,
    format: Option<i32>,
}

impl ResultHeader {
    fn parse(line: &str) -> Option<Self> {
        let c = line.find("100C")? + 3;
        let field = |offset: usize, width: usize| column(line, c + offset, width).unwrap_or("");
        let time = parse_frd_float(field(7, FLOAT_WIDTH))
            .or_else(|| line.split_whitespace().nth(2).and_then(parse_frd_float))?;
        Some(Self {
            time,
            analysis: parse_frd_int(field(51, 2)).unwrap_or(0),
            increment: parse_frd_int(field(53, 5)),
            format: parse_frd_int(field(68, 2)),
        })
    }
}

enum Connectivity {
    Complete(Vec<i32>),
    Mismatch(usize),
    Truncated,
}

struct PendingRow {
    id: i32,
    values: Vec<f64>,
    line: usize,
}

/// Line source with one line of push-back, counting physical lines.
struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line_no: usize,
    pushed: Option<String>,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            line_no: 0,
            pushed: None,
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pushed.take() {
            self.line_no += 1;
            return Ok(Some(line));
        }
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let text = String::from_utf8_lossy(&self.buf);
        Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn push_back(&mut self, line: String) {
        self.line_no -= 1;
        self.pushed = Some(line);
    }
}

/// Block-by-block state machine over the record stream.
struct FrdParser<R> {
    lines: LineReader<R>,
    source: String,
    header: FrdHeader,
    nodes: HashMap<i32, [f64; 3]>,
    elements: HashMap<i32, Element>,
    result_blocks: Vec<ResultBlock>,
    warnings: Vec<ParseWarning>,
}

impl<R: BufRead> FrdParser<R> {
    fn new(reader: R, source: String) -> Self {
        Self {
            lines: LineReader::new(reader),
            source,
            header: FrdHeader::default(),
            nodes: HashMap::new(),
            elements: HashMap::new(),
            result_blocks: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn run(mut self) -> Result<FrdFile> {
        while let Some(line) = self.next()? {
            match Record::classify(&line) {
                Record::Header => self.read_header_record(&line),
                Record::NodeBlock => self.read_node_block(&line)?,
                Record::ElementBlock => self.read_element_block(&line)?,
                Record::ResultBlock => self.read_result_block(&line)?,
                Record::EndOfData => break,
                Record::Blank => {}
                other => debug!(
                    file = %self.source,
                    line = self.lines.line_no,
                    record = ?other,
                    "skipping unrecognized record"
                ),
            }
        }
        self.finish()
    }

    fn next(&mut self) -> Result<Option<String>> {
        self.lines
            .next_line()
            .map_err(|e| Error::io(&self.source, e))
    }

    fn record_warning(&mut self, warning: ParseWarning) {
        warn!(file = %self.source, "{warning}");
        self.warnings.push(warning);
    }

    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::MalformedFrd {
            path: self.source.clone(),
            line: self.lines.line_no,
            reason: reason.into(),
        }
    }

    fn record_format(&self, flag: Option<i32>, block: BlockKind) -> Result<RecordFormat> {
        match flag {
            Some(0) => Ok(RecordFormat::Short),
            Some(2) => Err(self.malformed(format!("binary {block} blocks are not supported"))),
            _ => Ok(RecordFormat::Long),
        }
    }

    /// A data block was interrupted by a record of another block.
    fn end_unterminated(&mut self, line: String, block: BlockKind) {
        debug!(
            file = %self.source,
            line = self.lines.line_no,
            "{block} block ends without -3"
        );
        self.lines.push_back(line);
    }

    fn read_header_record(&mut self, line: &str) {
        let t = line.trim();
        match t.strip_prefix("1C") {
            Some(name) if self.header.job_name.is_empty() => {
                self.header.job_name = name.trim().to_string();
            }
            Some(_) => {}
            None => self.header.info.push(t.to_string()),
        }
    }

    /// Read node coordinate block (record type 2)
    fn read_node_block(&mut self, header: &str) -> Result<()> {
        let flag = header.split_whitespace().nth(2).and_then(parse_frd_int);
        let format = self.record_format(flag, BlockKind::Nodes)?;

        loop {
            let Some(line) = self.next()? else {
                let detail = format!("keeping the {} nodes read so far", self.nodes.len());
                self.record_warning(ParseWarning::Truncated {
                    line: self.lines.line_no,
                    block: BlockKind::Nodes,
                    detail,
                });
                return Ok(());
            };
            let line_no = self.lines.line_no;

            match Record::classify(&line) {
                Record::BlockEnd => return Ok(()),
                Record::Blank => {}
                Record::First => match parse_node_record(&line, format) {
                    Some((id, xyz)) => {
                        if self.nodes.insert(id, xyz).is_some() {
                            self.record_warning(ParseWarning::DuplicateId {
                                line: line_no,
                                entity: EntityKind::Nodal,
                                id,
                            });
                        }
                    }
                    None => self.record_warning(ParseWarning::SkippedRecord {
                        line: line_no,
                        block: BlockKind::Nodes,
                        reason: "unreadable node record".to_string(),
                    }),
                },
                _ => {
                    self.end_unterminated(line, BlockKind::Nodes);
                    return Ok(());
                }
            }
        }
    }

    /// Read element connectivity block (record type 3)
    fn read_element_block(&mut self, header: &str) -> Result<()> {
        let flag = header.split_whitespace().nth(2).and_then(parse_frd_int);
        let format = self.record_format(flag, BlockKind::Elements)?;

        loop {
            let Some(line) = self.next()? else {
                let detail = format!("keeping the {} elements read so far", self.elements.len());
                self.record_warning(ParseWarning::Truncated {
                    line: self.lines.line_no,
                    block: BlockKind::Elements,
                    detail,
                });
                return Ok(());
            };
            let line_no = self.lines.line_no;

            match Record::classify(&line) {
                Record::BlockEnd => return Ok(()),
                Record::Blank => {}
                Record::First => {
                    let Some((id, code)) = parse_element_record(&line, format) else {
                        self.record_warning(ParseWarning::SkippedRecord {
                            line: line_no,
                            block: BlockKind::Elements,
                            reason: "unreadable element record".to_string(),
                        });
                        continue;
                    };
                    let Some(kind) = ElementType::from_frd_code(code) else {
                        return Err(Error::UnsupportedElementType {
                            path: self.source.clone(),
                            line: line_no,
                            element: id,
                            code,
                        });
                    };

                    match self.read_element_nodes(kind, format)? {
                        Connectivity::Complete(nodes) => {
                            let Some(element) = Element::new(id, kind, nodes) else {
                                continue;
                            };
                            if self.elements.insert(id, element).is_some() {
                                self.record_warning(ParseWarning::DuplicateId {
                                    line: line_no,
                                    entity: EntityKind::Elemental,
                                    id,
                                });
                            }
                        }
                        Connectivity::Mismatch(found) => {
                            self.record_warning(ParseWarning::SkippedRecord {
                                line: line_no,
                                block: BlockKind::Elements,
                                reason: format!(
                                    "element {id} ({}) lists {found} of {} nodes",
                                    kind.name, kind.node_count
                                ),
                            });
                        }
                        Connectivity::Truncated => {
                            let detail = format!(
                                "element {id} is incomplete; keeping the {} elements read so far",
                                self.elements.len()
                            );
                            self.record_warning(ParseWarning::Truncated {
                                line: self.lines.line_no,
                                block: BlockKind::Elements,
                                detail,
                            });
                            return Ok(());
                        }
                    }
                }
                Record::Continuation => self.record_warning(ParseWarning::SkippedRecord {
                    line: line_no,
                    block: BlockKind::Elements,
                    reason: "connectivity record without an element record".to_string(),
                }),
                _ => {
                    self.end_unterminated(line, BlockKind::Elements);
                    return Ok(());
                }
            }
        }
    }

    /// Collect `-2` connectivity records until the element has all its nodes.
    fn read_element_nodes(
        &mut self,
        kind: &'static ElementType,
        format: RecordFormat,
    ) -> Result<Connectivity> {
        let mut nodes = Vec::with_capacity(kind.node_count);
        while nodes.len() < kind.node_count {
            let Some(line) = self.next()? else {
                return Ok(Connectivity::Truncated);
            };
            if Record::classify(&line) != Record::Continuation {
                self.lines.push_back(line);
                return Ok(Connectivity::Mismatch(nodes.len()));
            }
            match parse_ids(record_body(&line), format.id_width()) {
                Some(ids) => nodes.extend(ids),
                None => return Ok(Connectivity::Mismatch(nodes.len())),
            }
        }
        if nodes.len() != kind.node_count {
            return Ok(Connectivity::Mismatch(nodes.len()));
        }
        Ok(Connectivity::Complete(nodes))
    }

    /// Read result data block (record type 100)
    fn read_result_block(&mut self, header: &str) -> Result<()> {
        let header_line = self.lines.line_no;
        let Some(head) = ResultHeader::parse(header) else {
            self.record_warning(ParseWarning::SkippedRecord {
                line: header_line,
                block: BlockKind::Results,
                reason: "unreadable result header; block skipped".to_string(),
            });
            return self.skip_block();
        };
        let format = self.record_format(head.format, BlockKind::Results)?;
        let increment = head.increment.unwrap_or_else(|| {
            self.result_blocks.last().map_or(1, |b| {
                if b.time == head.time {
                    b.increment
                } else {
                    b.increment + 1
                }
            })
        });

        // -4: field name, component count, result type
        let (name, location) = loop {
            let Some(line) = self.next()? else {
                let detail = "result header without a field record discarded".to_string();
                return self.truncated_result(detail);
            };
            match Record::classify(&line) {
                Record::Blank => {}
                Record::Dataset => {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    let Some(name) = tokens.get(1) else {
                        break (String::new(), EntityKind::Nodal);
                    };
                    let location = match tokens.get(3).and_then(|t| parse_frd_int(t)) {
                        Some(3) => EntityKind::Elemental,
                        _ => EntityKind::Nodal,
                    };
                    break (name.to_string(), location);
                }
                _ => {
                    self.lines.push_back(line);
                    break (String::new(), EntityKind::Nodal);
                }
            }
        };
        if name.is_empty() {
            self.record_warning(ParseWarning::SkippedRecord {
                line: header_line,
                block: BlockKind::Results,
                reason: "result block without a -4 field record; block skipped".to_string(),
            });
            return self.skip_block();
        }

        // -5: one record per component
        let mut components = Vec::new();
        loop {
            let Some(line) = self.next()? else {
                return self.truncated_result(format!("incomplete {name} block discarded"));
            };
            match Record::classify(&line) {
                Record::Blank => {}
                Record::Component => {
                    if let Some(component) = parse_component_record(&line) {
                        components.extend(component);
                    }
                }
                _ => {
                    self.lines.push_back(line);
                    break;
                }
            }
        }
        if components.is_empty() {
            self.record_warning(ParseWarning::SkippedRecord {
                line: header_line,
                block: BlockKind::Results,
                reason: format!("field {name} has no stored components; block skipped"),
            });
            return self.skip_block();
        }

        let mut block = ResultBlock::new(
            name,
            location,
            increment,
            head.time,
            AnalysisKind::from_frd(head.analysis),
            components,
        );
        let mut pending: Option<PendingRow> = None;

        loop {
            let Some(line) = self.next()? else {
                let detail = format!("incomplete {} block discarded", block.name);
                return self.truncated_result(detail);
            };
            let line_no = self.lines.line_no;

            match Record::classify(&line) {
                Record::BlockEnd => {
                    self.flush_row(&mut block, pending.take());
                    break;
                }
                Record::Blank => {}
                Record::First => {
                    self.flush_row(&mut block, pending.take());
                    match split_record(record_body(&line), format.id_width(), true) {
                        Some((Some(id), values)) => {
                            pending = Some(PendingRow {
                                id,
                                values,
                                line: line_no,
                            })
                        }
                        _ => self.record_warning(ParseWarning::SkippedRecord {
                            line: line_no,
                            block: BlockKind::Results,
                            reason: format!("unreadable {} record", block.name),
                        }),
                    }
                }
                Record::Continuation => {
                    let values = split_record(record_body(&line), format.id_width(), false);
                    match (pending.as_mut(), values) {
                        (Some(row), Some((_, values))) => row.values.extend(values),
                        _ => self.record_warning(ParseWarning::SkippedRecord {
                            line: line_no,
                            block: BlockKind::Results,
                            reason: format!("orphan {} continuation record", block.name),
                        }),
                    }
                }
                _ => {
                    self.flush_row(&mut block, pending.take());
                    self.end_unterminated(line, BlockKind::Results);
                    break;
                }
            }
        }

        debug!(
            file = %self.source,
            field = %block.name,
            increment = block.increment,
            rows = block.len(),
            "read result block"
        );
        self.result_blocks.push(block);
        Ok(())
    }

    fn flush_row(&mut self, block: &mut ResultBlock, row: Option<PendingRow>) {
        let Some(row) = row else { return };
        if !block.push_row(row.id, &row.values) {
            self.record_warning(ParseWarning::SkippedRecord {
                line: row.line,
                block: BlockKind::Results,
                reason: format!(
                    "{} row for entity {} has {} values, expected {}",
                    block.name,
                    row.id,
                    row.values.len(),
                    block.ncomps()
                ),
            });
        }
    }

    /// The file ended inside a result block; the partial block is dropped.
    fn truncated_result(&mut self, detail: String) -> Result<()> {
        self.record_warning(ParseWarning::Truncated {
            line: self.lines.line_no,
            block: BlockKind::Results,
            detail,
        });
        Ok(())
    }

    /// Consume records up to and including the next `-3`.
    fn skip_block(&mut self) -> Result<()> {
        while let Some(line) = self.next()? {
            match Record::classify(&line) {
                Record::BlockEnd => return Ok(()),
                Record::NodeBlock
                | Record::ElementBlock
                | Record::ResultBlock
                | Record::EndOfData => {
                    self.lines.push_back(line);
                    return Ok(());
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Bulk validation once every block is read.
    fn finish(mut self) -> Result<FrdFile> {
        if self.nodes.is_empty() {
            return Err(self.malformed("no node block found"));
        }
        if self.elements.is_empty() {
            return Err(self.malformed("no element block found"));
        }

        let nodes: NodeTable = self.nodes.drain().collect();
        let mut candidates: Vec<Element> = self.elements.drain().map(|(_, e)| e).collect();
        candidates.sort_by_key(|e| e.id);

        let mut elements = Vec::with_capacity(candidates.len());
        for element in candidates {
            match element.nodes.iter().find(|&&n| !nodes.contains(n)) {
                Some(&node) => self.record_warning(ParseWarning::DanglingElement {
                    element: element.id,
                    node,
                }),
                None => elements.push(element),
            }
        }
        if elements.is_empty() {
            return Err(self.malformed("no element references known nodes"));
        }
        let mesh = Mesh::new(nodes, elements);

        let mut blocks = std::mem::take(&mut self.result_blocks);
        for block in &mut blocks {
            let dropped = match block.location {
                EntityKind::Nodal => block.retain_entities(|id| mesh.nodes.contains(id)),
                EntityKind::Elemental => {
                    block.retain_entities(|id| mesh.element_index_of(id).is_some())
                }
            };
            if dropped > 0 {
                self.record_warning(ParseWarning::UnknownEntities {
                    field: block.name.clone(),
                    increment: block.increment,
                    count: dropped,
                    entity: block.location,
                });
            }
            block.append_invariants();
        }
        let steps = assign_steps(&mut blocks);

        info!(
            file = %self.source,
            nodes = mesh.nodes.len(),
            elements = mesh.elements().len(),
            steps,
            warnings = self.warnings.len(),
            "parsed FRD file"
        );

        Ok(FrdFile {
            header: self.header,
            mesh,
            result_blocks: blocks,
            warnings: self.warnings,
        })
    }
}

/// Split a data record body into its entity id and float values.
///
/// Fields are cut by column first; whitespace splitting is the fallback for
/// hand-written files whose columns do not line up.
fn split_record(body: &str, id_width: usize, has_id: bool) -> Option<(Option<i32>, Vec<f64>)> {
    let fixed = || -> Option<(Option<i32>, Vec<f64>)> {
        let id = if has_id {
            Some(parse_frd_int(column(body, 0, id_width)?)?)
        } else {
            None
        };
        let values = columns(body, id_width, FLOAT_WIDTH)
            .into_iter()
            .map(parse_frd_float)
            .collect::<Option<Vec<_>>>()?;
        Some((id, values))
    };

    fixed().or_else(|| {
        let mut tokens = body.split_whitespace();
        let id = if has_id {
            Some(parse_frd_int(tokens.next()?)?)
        } else {
            None
        };
        let values = tokens.map(parse_frd_float).collect::<Option<Vec<_>>>()?;
        Some((id, values))
    })
}

fn parse_node_record(line: &str, format: RecordFormat) -> Option<(i32, [f64; 3])> {
    match split_record(record_body(line), format.id_width(), true)? {
        (Some(id), values) if values.len() == 3 => Some((id, [values[0], values[1], values[2]])),
        _ => None,
    }
}

/// `-1` element record: id, then type code in an `I5` field.
fn parse_element_record(line: &str, format: RecordFormat) -> Option<(i32, i32)> {
    let body = record_body(line);
    let w = format.id_width();
    let fixed = || -> Option<(i32, i32)> {
        Some((
            parse_frd_int(column(body, 0, w)?)?,
            parse_frd_int(column(body, w, 5)?)?,
        ))
    };
    fixed().or_else(|| {
        let mut tokens = body.split_whitespace();
        Some((parse_frd_int(tokens.next()?)?, parse_frd_int(tokens.next()?)?))
    })
}

/// Node ids of a `-2` connectivity record.
fn parse_ids(body: &str, width: usize) -> Option<Vec<i32>> {
    let fixed: Option<Vec<i32>> = columns(body, 0, width)
        .into_iter()
        .filter(|f| !f.trim().is_empty())
        .map(parse_frd_int)
        .collect();
    fixed.or_else(|| body.split_whitespace().map(parse_frd_int).collect())
}

/// `-5` record. The inner `None` marks a component the viewer computes itself
/// (IEXIST = 1); such components have no stored values.
fn parse_component_record(line: &str) -> Option<Option<Component>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let name = tokens.get(1)?;
    let kind = tokens.get(3).and_then(|t| parse_frd_int(t)).unwrap_or(1);
    // IEXIST may run into the predefined-function name ("1ALL")
    let exists = tokens
        .get(6)
        .map(|t| t.chars().take_while(|c| c.is_ascii_digit()).collect::<String>())
        .and_then(|digits| digits.parse::<i32>().ok())
        .unwrap_or(0);
    if exists == 1 {
        return Some(None);
    }
    Some(Some(Component::new(*name, ComponentKind::from_frd(kind))))
}
