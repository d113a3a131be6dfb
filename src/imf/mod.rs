//! Typed representations for IMF (Internet Message Format, RFC 5322)
//! header field values, plus the supporting lexical types (addresses,
//! message-ids, date-times, trace tokens) they are built from.

pub mod address;
pub mod datetime;
pub mod field;
pub mod identification;
pub mod trace;
