//! Error taxonomy for termenu.
//!
//! Three layers, each wrapping the one below:
//! - `CellError`: binding, parsing and toggling a single variable
//! - `MenuError`: structural access and interactive selection
//! - `ConfigError`: loading and assembling a menu definition file

use std::io;

use thiserror::Error;

use crate::cell::Kind;

/// Failure while operating on a [`VariableCell`](crate::cell::VariableCell).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// Kind name or storage outside the supported set.
    #[error("unsupported variable type: {kind}")]
    InvalidType { kind: String },

    /// Text could not be parsed as the bound kind. Storage is untouched.
    #[error("invalid {kind} value: {input:?}")]
    Parse { kind: Kind, input: String },

    /// Operation not defined for this kind (e.g. toggling an integer).
    #[error("cannot {operation} a {kind} variable")]
    UnsupportedOperation { kind: Kind, operation: &'static str },
}

/// Failure while navigating or selecting within a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// `Layout::get` called past the end of the label list.
    #[error("label index {index} out of range (layout has {len} labels)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A `LayoutId` that does not belong to this menu.
    #[error("no layout with id {0}")]
    UnknownLayout(usize),

    #[error(transparent)]
    Cell(#[from] CellError),

    /// Input stream failure (EOF while prompting, broken terminal).
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure while loading or assembling a menu definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read menu file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid menu file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("menu defines no layouts")]
    EmptyMenu,

    #[error("layout {0:?} is defined more than once")]
    DuplicateLayout(String),

    #[error("variable {0:?} is defined more than once")]
    DuplicateVariable(String),

    #[error("reference to undefined layout {0:?}")]
    UnknownLayout(String),

    #[error("reference to undefined variable {0:?}")]
    UnknownVariable(String),

    #[error("variable {name:?}: {source}")]
    Variable {
        name: String,
        #[source]
        source: CellError,
    },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_kind_and_input() {
        let err = CellError::Parse {
            kind: Kind::U8,
            input: "abc".into(),
        };
        assert_eq!(err.to_string(), "invalid u8 value: \"abc\"");
    }

    #[test]
    fn cell_error_converts_into_menu_error() {
        let err: MenuError = CellError::InvalidType { kind: "str".into() }.into();
        assert!(matches!(err, MenuError::Cell(CellError::InvalidType { .. })));
    }

    #[test]
    fn unsupported_operation_reads_naturally() {
        let err = CellError::UnsupportedOperation {
            kind: Kind::F64,
            operation: "toggle",
        };
        assert_eq!(err.to_string(), "cannot toggle a f64 variable");
    }
}
