//! # Line Protocol
//!
//! Requests and responses are single ASCII lines of space-separated tokens.
//!
//! ```text
//! Query  <n> <core_1> .. <core_n>
//! Commit <n> <core_1> .. <core_n> <key_1> <token_1> .. <key_m> <token_m>
//! OK <field> <field>
//! <ERROR_TOKEN> [detail ..]
//! ```
//!
//! `n` counts only the core fields. Every core, key and token field is
//! base64; error details are passed through untouched.

use crate::encoding::{b64decode, b64encode};
use crate::errors::{EncodingError, WireError};

const QUERY: &str = "Query";
const COMMIT: &str = "Commit";
const OK: &str = "OK";

/// Base64 fields describing a transaction and its proof material.
///
/// The first field is always the canonical transaction encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxCore(Vec<String>);

impl TxCore {
    /// Wrap already-encoded fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// Encode raw fields.
    pub fn from_raw<B: AsRef<[u8]>>(fields: &[B]) -> Self {
        Self(fields.iter().map(|f| b64encode(f.as_ref())).collect())
    }

    /// Parse a whitespace-separated list of base64 fields.
    pub fn parse_line(line: &str) -> Result<Self, WireError> {
        let fields: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        if fields.is_empty() {
            return Err(WireError::Empty);
        }
        for field in &fields {
            b64decode(field)?;
        }
        Ok(Self(fields))
    }

    /// Encoded fields.
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decoded transaction bytes (first field).
    pub fn tx_bytes(&self) -> Result<Vec<u8>, WireError> {
        let first = self.0.first().ok_or(WireError::Empty)?;
        Ok(b64decode(first)?)
    }

    /// Space-joined form, as stored in replay files.
    pub fn to_line(&self) -> String {
        self.0.join(" ")
    }
}

/// Per-input release material returned by a Query acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseToken {
    /// Authority release key.
    pub key: Vec<u8>,
    /// Release token.
    pub token: Vec<u8>,
}

/// A client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireMessage {
    /// Validate and lock inputs.
    Query(TxCore),
    /// Finalize a transaction.
    Commit {
        /// Transaction and proof material.
        core: TxCore,
        /// Tokens gathered during Query (empty for issuance).
        release: Vec<ReleaseToken>,
    },
}

impl WireMessage {
    /// Encode as a single line (without terminator).
    pub fn encode(&self) -> String {
        let (verb, core, release) = match self {
            Self::Query(core) => (QUERY, core, &[][..]),
            Self::Commit { core, release } => (COMMIT, core, release.as_slice()),
        };
        let mut tokens = Vec::with_capacity(2 + core.len() + 2 * release.len());
        tokens.push(verb.to_string());
        tokens.push(core.len().to_string());
        tokens.extend(core.fields().iter().cloned());
        for rt in release {
            tokens.push(b64encode(&rt.key));
            tokens.push(b64encode(&rt.token));
        }
        tokens.join(" ")
    }

    /// Parse a request line.
    pub fn parse(line: &str) -> Result<Self, WireError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(WireError::Empty)?;
        let declared = tokens.next().unwrap_or_default();
        let rest: Vec<&str> = tokens.collect();
        let count: usize = declared.parse().map_err(|_| WireError::BadFieldCount {
            declared: declared.to_string(),
            found: rest.len(),
        })?;
        if count > rest.len() {
            return Err(WireError::BadFieldCount {
                declared: declared.to_string(),
                found: rest.len(),
            });
        }
        let core = TxCore::new(rest[..count].iter().map(|s| s.to_string()).collect());
        for field in core.fields() {
            b64decode(field)?;
        }

        match verb {
            QUERY if count == rest.len() => Ok(Self::Query(core)),
            QUERY => Err(WireError::BadFieldCount {
                declared: declared.to_string(),
                found: rest.len(),
            }),
            COMMIT => {
                let tail = &rest[count..];
                if tail.len() % 2 != 0 {
                    return Err(WireError::UnpairedReleaseToken);
                }
                let release = tail
                    .chunks(2)
                    .map(|pair| {
                        Ok(ReleaseToken {
                            key: b64decode(pair[0])?,
                            token: b64decode(pair[1])?,
                        })
                    })
                    .collect::<Result<Vec<_>, EncodingError>>()?;
                Ok(Self::Commit { core, release })
            }
            other => Err(WireError::UnknownVerb(other.to_string())),
        }
    }
}

/// A mintette response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `OK` followed by decoded fields.
    Ok(Vec<Vec<u8>>),
    /// Any other status token.
    Rejected {
        /// Status token.
        status: String,
        /// Remaining tokens, undecoded.
        detail: Vec<String>,
    },
}

impl Response {
    /// Parse a response line.
    pub fn parse(line: &str) -> Result<Self, WireError> {
        let mut tokens = line.split_whitespace();
        let status = tokens.next().ok_or(WireError::Empty)?;
        if status == OK {
            let fields = tokens
                .map(b64decode)
                .collect::<Result<Vec<_>, EncodingError>>()?;
            Ok(Self::Ok(fields))
        } else {
            Ok(Self::Rejected {
                status: status.to_string(),
                detail: tokens.map(str::to_owned).collect(),
            })
        }
    }

    /// Encode as a single line.
    pub fn encode(&self) -> String {
        match self {
            Self::Ok(fields) => std::iter::once(OK.to_string())
                .chain(fields.iter().map(|f| b64encode(f)))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Rejected { status, detail } => std::iter::once(status.clone())
                .chain(detail.iter().cloned())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Whether the status token is `OK`.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Status token.
    pub fn status(&self) -> &str {
        match self {
            Self::Ok(_) => OK,
            Self::Rejected { status, .. } => status,
        }
    }

    /// The two fields of an `OK` acknowledgment, if this is one.
    pub fn ok_pair(&self) -> Result<Option<(&[u8], &[u8])>, WireError> {
        match self {
            Self::Ok(fields) if fields.len() == 2 => Ok(Some((&fields[0], &fields[1]))),
            Self::Ok(fields) => Err(WireError::AckArity {
                expected: 2,
                got: fields.len(),
            }),
            Self::Rejected { .. } => Ok(None),
        }
    }
}
