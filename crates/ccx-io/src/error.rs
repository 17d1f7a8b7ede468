//! Error types for ccx-io

use std::fmt;

use ccx_model::EntityKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conversion errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{path}: line {line}: malformed FRD file: {reason}")]
    MalformedFrd {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("{path}: line {line}: element {element} has unsupported FRD type code {code}")]
    UnsupportedElementType {
        path: String,
        line: usize,
        element: i32,
        code: i32,
    },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    pub(crate) fn io(path: impl fmt::Display, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_string(),
            source,
        }
    }
}

/// FRD block kinds, used to locate warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Nodes,
    Elements,
    Results,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Nodes => f.write_str("node"),
            BlockKind::Elements => f.write_str("element"),
            BlockKind::Results => f.write_str("result"),
        }
    }
}

/// Problems the parser recovered from. Collected on the parsed file and
/// logged as they occur.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseWarning {
    #[error("line {line}: file ends inside a {block} block; {detail}")]
    Truncated {
        line: usize,
        block: BlockKind,
        detail: String,
    },

    #[error("line {line}: skipped {block} record: {reason}")]
    SkippedRecord {
        line: usize,
        block: BlockKind,
        reason: String,
    },

    #[error("result block {field} (increment {increment}): dropped {count} rows for unknown {entity} ids")]
    UnknownEntities {
        field: String,
        increment: i32,
        count: usize,
        entity: EntityKind,
    },

    #[error("element {element} references unknown node {node}; element dropped")]
    DanglingElement { element: i32, node: i32 },

    #[error("line {line}: duplicate {entity} id {id}; keeping the last definition")]
    DuplicateId {
        line: usize,
        entity: EntityKind,
        id: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_file_and_line() {
        let err = Error::UnsupportedElementType {
            path: "beam.frd".to_string(),
            line: 42,
            element: 7,
            code: 99,
        };
        assert_eq!(
            err.to_string(),
            "beam.frd: line 42: element 7 has unsupported FRD type code 99"
        );

        let warning = ParseWarning::Truncated {
            line: 10,
            block: BlockKind::Results,
            detail: "DISP discarded".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "line 10: file ends inside a result block; DISP discarded"
        );
    }
}
