use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong before the animation starts running
#[derive(Debug)]
pub enum HeartError {
    /// The phase table has no phases
    EmptyPhaseTable,
    /// A phase has no scale values to step through
    EmptyScaleSequence { phase: String },
    /// A tunable constant is out of range
    InvalidConfig(String),
    /// A file could not be read
    Io { path: PathBuf, source: io::Error },
    /// A configuration file could not be parsed
    Config { path: PathBuf, message: String },
    /// A model file is malformed
    Obj { line: usize, kind: ObjErrorKind },
    /// The model produced nothing to draw
    NoActors { path: PathBuf },
    /// No adapter, device or surface could be had
    Graphics(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjErrorKind {
    BadNumber(String),
    BadIndex(String),
    IndexOutOfRange { index: i64, count: usize },
    DegenerateFace { corners: usize },
    MissingArguments(&'static str),
}

impl fmt::Display for ObjErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjErrorKind::BadNumber(text) => write!(f, "not a number: {text:?}"),
            ObjErrorKind::BadIndex(text) => write!(f, "bad face corner: {text:?}"),
            ObjErrorKind::IndexOutOfRange { index, count } => {
                write!(f, "index {index} out of range for {count} elements")
            }
            ObjErrorKind::DegenerateFace { corners } => {
                write!(f, "face needs at least 3 corners, got {corners}")
            }
            ObjErrorKind::MissingArguments(statement) => {
                write!(f, "missing arguments for '{statement}'")
            }
        }
    }
}

impl fmt::Display for HeartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeartError::EmptyPhaseTable => write!(f, "Phase table is empty"),
            HeartError::EmptyScaleSequence { phase } => {
                write!(f, "Phase {phase} has no scale values")
            }
            HeartError::InvalidConfig(message) => write!(f, "Invalid configuration: {message}"),
            HeartError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            HeartError::Config { path, message } => {
                write!(f, "Config {}: {message}", path.display())
            }
            HeartError::Obj { line, kind } => write!(f, "OBJ line {line}: {kind}"),
            HeartError::NoActors { path } => {
                write!(f, "No actors loaded from {}", path.display())
            }
            HeartError::Graphics(message) => write!(f, "Graphics: {message}"),
        }
    }
}

impl std::error::Error for HeartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeartError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl HeartError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HeartError::Io {
            path: path.into(),
            source,
        }
    }
}
