//! Virtual locations of ephemeral documents.
//!
//! Every parse unit lives at `memory://<namespace>/<id>.evml`. The id comes
//! from the pipeline's [`IdSequence`](crate::IdSequence) and is never reused,
//! so two live documents can never share a location.

use std::{fmt, str::FromStr};

use thiserror::Error;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{preceded, terminated},
    error::{ContextError, ErrMode},
    token::take_while,
};

/// URI scheme of in-memory documents.
pub const SCHEME: &str = "memory";

/// File extension of diagram sources.
pub const EXTENSION: &str = "evml";

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "evml";

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Location of an ephemeral document in a language service's registry.
///
/// # Example
///
/// ```
/// # use evml_document::DocumentUri;
/// let uri = DocumentUri::new("evml", 7);
/// assert_eq!(uri.to_string(), "memory://evml/7.evml");
///
/// let parsed: DocumentUri = "memory://evml/7.evml".parse().unwrap();
/// assert_eq!(parsed, uri);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentUri {
    namespace: String,
    id: u64,
}

impl DocumentUri {
    /// Creates the location of document `id` within `namespace`.
    pub fn new(namespace: impl Into<String>, id: u64) -> Self {
        Self {
            namespace: namespace.into(),
            id,
        }
    }

    /// Returns the namespace segment.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the numeric document id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` if this document belongs to `namespace`.
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.namespace == namespace
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME}://{}/{}.{EXTENSION}",
            self.namespace, self.id
        )
    }
}

/// Error returned when a string is not a valid document location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid document URI `{0}`, expected `{SCHEME}://<namespace>/<id>.{EXTENSION}`")]
pub struct UriError(String);

impl FromStr for DocumentUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input = s;
        let (namespace, id) = document_uri(&mut input).map_err(|_| UriError(s.to_string()))?;

        if !input.is_empty() {
            return Err(UriError(s.to_string()));
        }

        Ok(Self::new(namespace, id))
    }
}

fn document_uri<'s>(input: &mut &'s str) -> IResult<(&'s str, u64)> {
    (
        preceded((SCHEME, "://"), namespace),
        preceded('/', terminated(document_id, ('.', EXTENSION))),
    )
        .parse_next(input)
}

fn namespace<'s>(input: &mut &'s str) -> IResult<&'s str> {
    take_while(1.., |c: char| c != '/' && !c.is_whitespace()).parse_next(input)
}

fn document_id(input: &mut &str) -> IResult<u64> {
    digit1.try_map(str::parse::<u64>).parse_next(input)
}
