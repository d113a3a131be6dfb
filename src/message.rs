//! The top-level [`Message`] type: an ordered header plus an opaque body.

use crate::imf::field::Field;

/// An IMF message: an ordered sequence of header fields plus the body
/// bytes that followed the header-terminating empty line (empty if the
/// message had no body, or no separator was ever seen).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Vec<Field>,
    pub body: Vec<u8>,
}

impl Message {
    /// The first field whose name matches `name`, case-insensitively.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.header
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// All fields whose name matches `name`, case-insensitively, in the
    /// order they appeared (a message may legally repeat `Received`,
    /// `Comments`, `Keywords`, ...).
    pub fn fields_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Field> {
        self.header
            .iter()
            .filter(move |f| f.name.eq_ignore_ascii_case(name))
    }

    /// Every field whose decode recorded an error, in stream order.
    pub fn errors(&self) -> impl Iterator<Item = &Field> {
        self.header.iter().filter(|f| f.error.is_some())
    }
}
