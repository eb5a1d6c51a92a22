use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// What was happening when a missing function was noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Adding,
    Resolving,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Adding => write!(f, "adding"),
            Stage::Resolving => write!(f, "resolving"),
        }
    }
}

/// Coarse classification of every error the engine can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SchemeNotFound,
    DuplicateScheme,
    ColourNotFound,
    InvalidColourValue,
    FunctionNotFound,
    DangerousKeyword,
    CyclicReference,
    CyclicInheritance,
    InvalidArgument,
    Validation,
    Parse,
    Io,
}

/// Main error type for chroma operations
#[derive(Error, Diagnostic, Debug)]
pub enum ChromaError {
    #[error("The colour scheme \"{scheme}\" was not found.")]
    #[diagnostic(code(chroma::scheme_not_found))]
    SchemeNotFound { scheme: String },

    #[error("Cannot set the parent of scheme \"{scheme}\" to \"{parent}\" because the colour scheme \"{parent}\" was not found.")]
    #[diagnostic(
        code(chroma::scheme_not_found),
        help("Define the parent scheme before its children")
    )]
    ParentNotFound { scheme: String, parent: String },

    #[error("The colour scheme \"{scheme}\" is already defined.")]
    #[diagnostic(code(chroma::duplicate_scheme))]
    DuplicateScheme {
        scheme: String,
        #[help]
        help: Option<String>,
    },

    #[error("The colour \"{colour}\" was not found.")]
    #[diagnostic(code(chroma::colour_not_found))]
    ColourNotFound { colour: String },

    #[error("The colour \"{colour}\" was not found when adding the colour \"{adding}\".")]
    #[diagnostic(code(chroma::colour_not_found))]
    UndefinedReference { colour: String, adding: String },

    /// Raised at lookup time. `add_colours` checks every reference target
    /// when it is added and definitions are never removed, so this guards a
    /// reference whose target has since gone missing.
    #[error("The colour \"{colour}\" referenced by \"{referenced_by}\" was not found.")]
    #[diagnostic(code(chroma::colour_not_found))]
    DanglingReference {
        colour: String,
        referenced_by: String,
    },

    #[error("Unexpected value, \"{value}\", given for colour \"{colour}\".")]
    #[diagnostic(
        code(chroma::invalid_value),
        help("Colour values must be a colour, a colour keyword or the name of another colour")
    )]
    InvalidColourValue { value: String, colour: String },

    #[error("The function \"{function}\" was not found when {stage} the colour \"{colour}\".")]
    #[diagnostic(code(chroma::function_not_found))]
    FunctionNotFound {
        function: String,
        colour: String,
        stage: Stage,
    },

    #[error("Compressed output will convert {keyword} into the hexadecimal value {hex} and it will not be possible to determine if the original name was {keyword} or {twin}. To prevent this error, quote the keyword like this: '{keyword}'.")]
    #[diagnostic(code(chroma::dangerous_keyword))]
    DangerousKeyword {
        keyword: String,
        twin: String,
        hex: String,
    },

    #[error("Compressed output has converted a colour keyword into the hexadecimal value, {hex}, and it is not possible to determine if the original name was {first} or {second}. To prevent this error, use quotes around the keyword.")]
    #[diagnostic(code(chroma::dangerous_keyword))]
    CompressedKeyword {
        hex: String,
        first: String,
        second: String,
    },

    #[error("Circular colour reference: {chain}")]
    #[diagnostic(
        code(chroma::cyclic_reference),
        help("Check your colour definitions for circular references")
    )]
    CyclicReference { chain: String },

    #[error("Circular scheme inheritance: {chain}")]
    #[diagnostic(code(chroma::cyclic_inheritance))]
    CyclicInheritance { chain: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(chroma::argument))]
    InvalidArgument {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation failed: {errors} error(s), {warnings} warning(s)")]
    #[diagnostic(
        code(chroma::validate),
        help("Fix the errors above and run `chroma check` again")
    )]
    Validation { errors: usize, warnings: usize },

    #[error("Parse error: {message}")]
    #[diagnostic(code(chroma::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(chroma::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },
}

impl ChromaError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChromaError::SchemeNotFound { .. } | ChromaError::ParentNotFound { .. } => {
                ErrorKind::SchemeNotFound
            }
            ChromaError::DuplicateScheme { .. } => ErrorKind::DuplicateScheme,
            ChromaError::ColourNotFound { .. }
            | ChromaError::UndefinedReference { .. }
            | ChromaError::DanglingReference { .. } => ErrorKind::ColourNotFound,
            ChromaError::InvalidColourValue { .. } => ErrorKind::InvalidColourValue,
            ChromaError::FunctionNotFound { .. } => ErrorKind::FunctionNotFound,
            ChromaError::DangerousKeyword { .. } | ChromaError::CompressedKeyword { .. } => {
                ErrorKind::DangerousKeyword
            }
            ChromaError::CyclicReference { .. } => ErrorKind::CyclicReference,
            ChromaError::CyclicInheritance { .. } => ErrorKind::CyclicInheritance,
            ChromaError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ChromaError::Validation { .. } => ErrorKind::Validation,
            ChromaError::Parse { .. } => ErrorKind::Parse,
            ChromaError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn argument(message: impl Into<String>, help: Option<String>) -> Self {
        ChromaError::InvalidArgument {
            message: message.into(),
            help,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChromaError>;
