//! IOB conversion
//!
//! Some taggers emit entities as CoNLL-style (token, POS, IOB) rows instead
//! of a chunk tree. These helpers move between the two shapes.

use crate::errors::{Result, TagFreqError};
use crate::types::{NeChunk, TaggedToken};

/// A parsed IOB tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iob {
    Outside,
    Begin(String),
    Inside(String),
}

impl Iob {
    /// Parse `O`, `B-<label>` or `I-<label>`
    pub fn parse(tag: &str) -> Result<Self> {
        if tag == "O" {
            return Ok(Iob::Outside);
        }
        match tag.split_once('-') {
            Some(("B", label)) if !label.is_empty() => Ok(Iob::Begin(label.to_string())),
            Some(("I", label)) if !label.is_empty() => Ok(Iob::Inside(label.to_string())),
            _ => Err(TagFreqError::MalformedIob(tag.to_string())),
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Iob::Outside => "O".to_string(),
            Iob::Begin(label) => format!("B-{label}"),
            Iob::Inside(label) => format!("I-{label}"),
        }
    }
}

/// One CoNLL row: token, POS tag, IOB tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConllRow {
    pub token: TaggedToken,
    pub iob: Iob,
}

impl ConllRow {
    pub fn new(text: &str, tag: &str, iob: &str) -> Result<Self> {
        Ok(Self {
            token: TaggedToken::new(text, tag),
            iob: Iob::parse(iob)?,
        })
    }
}

/// Group IOB rows into chunks.
///
/// An `I-X` that does not continue an open `X` span starts a new span, the
/// same leniency CoNLL evaluation applies.
pub fn chunks_from_iob(rows: &[ConllRow]) -> Vec<NeChunk> {
    let mut chunks = Vec::with_capacity(rows.len());
    let mut open: Option<(Vec<TaggedToken>, String)> = None;

    for row in rows {
        match &row.iob {
            Iob::Outside => {
                if let Some((tokens, label)) = open.take() {
                    chunks.push(NeChunk::Entity { tokens, label });
                }
                chunks.push(NeChunk::Plain(row.token.clone()));
            }
            Iob::Inside(label) if open.as_ref().is_some_and(|(_, l)| l == label) => {
                if let Some((tokens, _)) = open.as_mut() {
                    tokens.push(row.token.clone());
                }
            }
            Iob::Begin(label) | Iob::Inside(label) => {
                if let Some((tokens, label)) = open.take() {
                    chunks.push(NeChunk::Entity { tokens, label });
                }
                open = Some((vec![row.token.clone()], label.clone()));
            }
        }
    }
    if let Some((tokens, label)) = open {
        chunks.push(NeChunk::Entity { tokens, label });
    }

    chunks
}

/// Flatten chunks back into IOB rows.
pub fn chunks_to_iob(chunks: &[NeChunk]) -> Vec<ConllRow> {
    let mut rows = Vec::new();
    for chunk in chunks {
        match chunk {
            NeChunk::Plain(token) => rows.push(ConllRow {
                token: token.clone(),
                iob: Iob::Outside,
            }),
            NeChunk::Entity { tokens, label } => {
                for (i, token) in tokens.iter().enumerate() {
                    let iob = if i == 0 {
                        Iob::Begin(label.clone())
                    } else {
                        Iob::Inside(label.clone())
                    };
                    rows.push(ConllRow {
                        token: token.clone(),
                        iob,
                    });
                }
            }
        }
    }
    rows
}
