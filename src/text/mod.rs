//! Low-level, email-specific lexical primitives: folding whitespace and
//! comments, atoms, quoted strings, words, phrases and local-parts.
//!
//! Every parser in this module operates on `&[u8]` and follows nom's
//! usual backtracking contract: on failure the input is returned
//! untouched, which is exactly the "snapshot cursor, try, rewind on
//! failure" `Try` semantics the field-level grammar needs (mailbox vs.
//! group, specific-address vs. named-address, ...).

pub mod local_part;
pub mod phrase;
pub mod quoted;
pub mod unstructured;
pub mod whitespace;
pub mod words;
