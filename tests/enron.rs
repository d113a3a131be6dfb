//! Resilience tests against the kinds of malformed headers that turn up
//! routinely in large real-world mail corpora (the Enron maildir corpus
//! being the classic example): truncated addresses, stray trailing
//! dots, and multiple competing Date fields. The crate doesn't ship the
//! corpus itself, but these cases are drawn directly from it -- the
//! point is that a single bad field never takes the rest of the header
//! down with it (spec invariant: error isolation).

use imf_codec::framing::{DecoderOptions, MessageDecoder};
use imf_codec::imf::field::FieldValue;

fn decode(input: &[u8]) -> imf_codec::message::Message {
    MessageDecoder::decode_all(
        DecoderOptions {
            mixed_eol: true,
            ..Default::default()
        },
        input,
    )
    .unwrap()
}

/// `To: east <7..>` -- a mailbox whose angle-address has no "@", seen
/// in `white-s/calendar/113.` of the Enron corpus. The field fails to
/// decode but the surrounding fields are untouched.
#[test]
fn test_truncated_angle_address_is_isolated() {
    let msg = decode(b"From: a@b\nTo: east <7..>\nSubject: meeting\n\nBody\n");
    assert!(msg.field("To").unwrap().error.is_some());
    assert!(msg.field("From").unwrap().error.is_none());
    assert!(msg.field("Subject").unwrap().error.is_none());
}

/// `To: <"tibor.vizkelety":@enron.com>` -- a quoted local-part
/// immediately followed by a bare `:`, from `jones-t/all_documents/9806.`.
#[test]
fn test_quoted_localpart_with_stray_colon_is_isolated() {
    let msg = decode(b"From: a@b\nTo: <\"tibor.vizkelety\":@enron.com>\n\n");
    assert!(msg.field("To").unwrap().error.is_some());
    assert!(msg.field("From").unwrap().error.is_none());
}

/// `From: pep <performance.>` -- a domain that is just a bare dot, from
/// `skilling-j/inbox/223.`.
#[test]
fn test_domain_ending_in_bare_dot_is_isolated() {
    let msg = decode(b"From: pep <performance.>\nTo: b@c\n\n");
    assert!(msg.field("From").unwrap().error.is_some());
    assert!(msg.field("To").unwrap().error.is_none());
}

/// `Date: Monday, March 12` -- a second, informal Date entry seen
/// embedded in a calendar export (`lokey-t/calendar/33.`); it fails to
/// parse as RFC 5322 date-time but does not disturb the first Date.
#[test]
fn test_second_informal_date_field_is_isolated() {
    let msg = decode(b"Date: Tue, 13 Jun 2023 10:01:10 +0200\nDate: Monday, March 12\nFrom: a@b\n\n");
    let dates: Vec<_> = msg.fields_named("Date").collect();
    assert_eq!(dates.len(), 2);
    assert!(dates[0].error.is_none());
    assert!(dates[1].error.is_some());
    assert!(msg.field("From").unwrap().error.is_none());
}

/// A To with several comma-joined mailboxes, where a trailing one is
/// truncated (`leaders <breaktkhrough.>`, `kaminski-v/discussion_threads/8068.`):
/// the whole list fails as one field, per address-list grammar, rather
/// than silently dropping just the bad entry.
#[test]
fn test_partially_truncated_list_fails_whole_field() {
    let msg = decode(
        b"From: a@b\nTo: cats <breaktkhrough.>, risk <breakthrough.>, leaders <breaktkhrough.>\n\n",
    );
    assert!(msg.field("To").unwrap().error.is_some());
    match &msg.field("To").unwrap().value {
        FieldValue::To(v) => assert!(v.is_empty()),
        v => panic!("unexpected {v:?}"),
    }
}

/// Messages frequently carry headers this crate doesn't special-case
/// (`X-Origin`, `X-FileName`, ...) interleaved with the recognized
/// ones; they round-trip as `Optional` without affecting decode of
/// their neighbors.
#[test]
fn test_unrecognized_header_interleaved() {
    let msg = decode(
        b"Message-ID: <1.JavaMail.evans@thyme>\nDate: Tue, 13 Jun 2023 10:01:10 +0200\nX-Origin: Lokey-T\nFrom: a@b\nX-FileName: tlokey.nsf\n\n",
    );
    assert_eq!(msg.header.len(), 5);
    assert!(msg.errors().next().is_none());
    assert_eq!(
        msg.field("X-Origin").unwrap().value,
        FieldValue::Optional("X-Origin".to_string(), "Lokey-T".to_string())
    );
}

/// A folded `To:` spanning a continuation line under bare-`LF` mixed
/// EOL (as produced by some Unix mail stores) decodes the same as its
/// `CRLF`-folded equivalent.
#[test]
fn test_bare_lf_fold_matches_crlf_fold() {
    let crlf = decode(b"To: a@b,\r\n b@c\r\n\r\n");
    let lf = decode(b"To: a@b,\n b@c\n\n");
    assert_eq!(
        crlf.field("To").unwrap().value,
        lf.field("To").unwrap().value
    );
}
