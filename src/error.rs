//! Error type shared by every stage of the conversion pipeline.

use crate::ast::{Position, Span};
use crate::diag::{Diag, SourceFile, convert_diag_to_report};
use miette::Report;
use smol_str::SmolStr;
use thiserror::Error;

/// Message used when an edge operator does not match the graph keyword.
pub const EDGE_OPERATOR_MISMATCH: &str = "edge operator mismatch with graph directedness";

/// Message used when a relationship type resolves to nothing.
pub const INVALID_RELATIONSHIP_TYPE: &str = "invalid relationship type";

/// A fatal conversion failure. No partial output accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Malformed character sequence in the source text.
    #[error("lex error at {position}: {message}")]
    Lex {
        message: String,
        /// The offending character, when one character is to blame.
        unexpected: Option<char>,
        span: Span,
        position: Position,
        code: &'static str,
    },

    /// Grammar violation, including edge operator/directedness mismatches.
    #[error("parse error at {position}: {message}")]
    Parse {
        message: String,
        span: Span,
        position: Position,
        code: &'static str,
        /// Earlier construct the failure depends on, such as the graph
        /// keyword that fixed the edge operator.
        context: Option<Span>,
    },

    /// Internal consistency violation while building the graph model.
    #[error("build error for `{identifier}`: {reason}")]
    Build { identifier: SmolStr, reason: String },

    /// A reserved attribute carried a value that cannot be resolved.
    #[error("resolution error for {value:?}: {reason}")]
    Resolution {
        value: String,
        reason: String,
        span: Option<Span>,
        position: Option<Position>,
    },

    /// A configured resource limit was exceeded.
    #[error("{limit} limit exceeded: {actual} > {max}")]
    Limit {
        limit: &'static str,
        actual: usize,
        max: usize,
    },
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

impl ConvertError {
    pub(crate) fn lex(
        source: &str,
        span: Span,
        message: impl Into<String>,
        unexpected: Option<char>,
        code: &'static str,
    ) -> Self {
        ConvertError::Lex {
            message: message.into(),
            unexpected,
            position: Position::of_offset(source, span.start),
            span,
            code,
        }
    }

    pub(crate) fn parse(
        source: &str,
        span: Span,
        message: impl Into<String>,
        code: &'static str,
    ) -> Self {
        ConvertError::Parse {
            message: message.into(),
            position: Position::of_offset(source, span.start),
            span,
            code,
            context: None,
        }
    }

    /// Attaches the span of the construct a parse error depends on.
    pub(crate) fn with_context(self, context: Span) -> Self {
        match self {
            ConvertError::Parse {
                message,
                span,
                position,
                code,
                ..
            } => ConvertError::Parse {
                message,
                span,
                position,
                code,
                context: Some(context),
            },
            other => other,
        }
    }

    /// Fills in the line/column of a spanned resolution error.
    pub(crate) fn locate(self, source: &str) -> Self {
        match self {
            ConvertError::Resolution {
                value,
                reason,
                span: Some(span),
                position: None,
            } => ConvertError::Resolution {
                value,
                reason,
                position: Some(Position::of_offset(source, span.start)),
                span: Some(span),
            },
            other => other,
        }
    }

    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Lex { code, .. } | ConvertError::Parse { code, .. } => code,
            ConvertError::Build { .. } => "B001",
            ConvertError::Resolution { .. } => "R001",
            ConvertError::Limit { .. } => "X001",
        }
    }

    /// Source span of the failure, when it can be attributed to one.
    pub fn span(&self) -> Option<&Span> {
        match self {
            ConvertError::Lex { span, .. } | ConvertError::Parse { span, .. } => Some(span),
            ConvertError::Resolution { span, .. } => span.as_ref(),
            ConvertError::Build { .. } | ConvertError::Limit { .. } => None,
        }
    }

    /// Line/column of the failure, when known.
    pub fn position(&self) -> Option<Position> {
        match self {
            ConvertError::Lex { position, .. } | ConvertError::Parse { position, .. } => {
                Some(*position)
            }
            ConvertError::Resolution { position, .. } => *position,
            ConvertError::Build { .. } | ConvertError::Limit { .. } => None,
        }
    }

    /// Lowers the error into the diagnostic model.
    pub fn to_diag(&self) -> Diag {
        let diag = match self {
            ConvertError::Lex { message, span, .. } => {
                Diag::error(message.clone()).with_primary_label(span.clone(), "here")
            }
            ConvertError::Parse {
                message,
                span,
                code,
                context,
                ..
            } => {
                let mut diag = Diag::error(message.clone()).with_primary_label(span.clone(), "here");
                if let Some(context) = context {
                    diag = diag.with_secondary_label(context.clone(), "graph kind declared here");
                }
                match *code {
                    "P002" => diag.with_help(
                        "use `->` inside `digraph` and `--` inside `graph`",
                    ),
                    "P003" => diag.with_note("subgraphs and node ports are outside the supported DOT subset"),
                    _ => diag,
                }
            }
            ConvertError::Build { identifier, reason } => {
                Diag::error(format!("{reason} (node `{identifier}`)"))
            }
            ConvertError::Resolution {
                value, reason, span, ..
            } => {
                let diag = Diag::error(format!("{reason}: {value:?}"))
                    .with_help("give the edge a non-empty `label` or drop the attribute");
                match span {
                    Some(span) => diag.with_primary_label(span.clone(), "declared here"),
                    None => diag,
                }
            }
            ConvertError::Limit { .. } => Diag::error(self.to_string()),
        };
        diag.with_code(self.code())
    }

    /// Renders the error as a miette report against `source`.
    pub fn to_report(&self, source: &SourceFile) -> Report {
        convert_diag_to_report(&self.to_diag(), source)
    }
}
