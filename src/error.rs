use crate::parser::Rule;
use thiserror::Error;

/// Failures while scanning contract source for private function signatures.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error in contract source: {0}")]
    Syntax(Box<pest::error::Error<Rule>>),

    #[error("malformed parameter `{text}` in fn `{function}`: expected `name: Type`")]
    MalformedParameter { function: String, text: String },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("expected import statement `use {0}` to contain '::'")]
    MissingPathSeparator(String),

    #[error("malformed import statement `use {statement}`: {reason}")]
    Malformed { statement: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("fn `{0}` already has a selector assigned; were selectors resolved twice?")]
    SelectorAlreadyAssigned(String),
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("fn `{0}` has no selector; is it missing from the contract ABI?")]
    MissingSelector(String),

    #[error("no serialisation methods known for type `{type_name}` (parameter of fn `{function}`)")]
    UnknownType { type_name: String, function: String },
}

/// Any failure of the end-to-end interface generation pipeline.
#[derive(Debug, Error)]
pub enum InterfaceGenError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}
