//! PEM framing for the key documents.
//!
//! Decoding accepts exactly one PEM document per input. Whitespace around the
//! document is fine, any other text before the pre-encapsulation boundary or
//! after the post-encapsulation boundary is rejected. The base64 body may use
//! any line width, including a single unwrapped line.
//!
//! Encoding always wraps the body at 64 columns.

use alloc::{format, string::String, vec, vec::Vec};

pub use pem_rfc7468::LineEnding;
use zeroize::Zeroizing;

use crate::{EncodingError, FormatError};

/// The label of a SEC 1 `ECPrivateKey` document.
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

/// The label of an X.509 `SubjectPublicKeyInfo` document.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// The line ending used for all produced documents.
pub const LINE_ENDING: LineEnding = LineEnding::LF;

const PRE_ENCAPSULATION_BOUNDARY: &str = "-----BEGIN ";

/// A decoded PEM document.
pub(crate) struct Document {
    label: String,
    der: Zeroizing<Vec<u8>>,
}

impl Document {
    /// Decodes the single PEM document in `input`.
    pub(crate) fn decode(input: &str) -> Result<Self, FormatError> {
        let input = input.trim();

        let documents = ::pem::parse_many(input).map_err(|e| {
            tracing::debug!(error = %e, "malformed PEM document");
            FormatError::Pem(e)
        })?;

        // the parser skips any text between documents, so the boundaries of
        // the one document must be the boundaries of the input
        let [document]: [::pem::Pem; 1] = documents.try_into().map_err(|documents: Vec<_>| {
            tracing::debug!(count = documents.len(), "expected exactly one PEM document");
            match documents.len() {
                0 => FormatError::MissingDocument,
                n => FormatError::MultipleDocuments(n),
            }
        })?;

        if !input.starts_with(PRE_ENCAPSULATION_BOUNDARY) {
            tracing::debug!("found data before the PEM document");
            return Err(FormatError::LeadingData);
        }

        let label = String::from(document.tag());
        if !input.ends_with(&format!("-----END {label}-----")) {
            tracing::debug!(%label, "found data after the PEM document");
            return Err(FormatError::TrailingData);
        }

        Ok(Self {
            label,
            der: Zeroizing::new(document.into_contents()),
        })
    }

    /// The label of the pre- and post-encapsulation boundary.
    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// The decoded DER content.
    pub(crate) fn der(&self) -> &[u8] {
        &self.der
    }

    /// Fails with [`FormatError::UnexpectedLabel`] unless this document has
    /// the `expected` label.
    pub(crate) fn expect_label(&self, expected: &'static str) -> Result<(), FormatError> {
        if self.label == expected {
            return Ok(());
        }

        tracing::debug!(expected, found = %self.label, "unexpected PEM label");
        Err(FormatError::UnexpectedLabel {
            expected,
            found: self.label.clone(),
        })
    }
}

/// Encodes `der` as a PEM document with the given label.
pub(crate) fn encode(label: &str, der: &[u8]) -> Result<String, EncodingError> {
    pem_rfc7468::encode_string(label, LINE_ENDING, der).map_err(EncodingError::Pem)
}

/// Like [`encode`], but every buffer holding the result is wiped on drop.
pub(crate) fn encode_secret(label: &str, der: &[u8]) -> Result<Zeroizing<String>, EncodingError> {
    let len = pem_rfc7468::encoded_len(label, LINE_ENDING, der).map_err(EncodingError::Pem)?;
    let mut buf = Zeroizing::new(vec![0u8; len]);
    let encoded = pem_rfc7468::encode(label, LINE_ENDING, der, &mut buf).map_err(EncodingError::Pem)?;

    Ok(Zeroizing::new(String::from(encoded)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "-----BEGIN TEST-----\nAQID\n-----END TEST-----\n";

    #[test]
    fn decode_single_document() {
        let document = Document::decode(DOCUMENT).unwrap();

        assert_eq!(document.label(), "TEST");
        assert_eq!(document.der(), &[1, 2, 3]);
    }

    #[test]
    fn surrounding_whitespace_is_fine() {
        let input = format!("\n\n  {DOCUMENT}\n\t\n");
        let document = Document::decode(&input).unwrap();

        assert_eq!(document.der(), &[1, 2, 3]);
    }

    #[test]
    fn body_line_width_is_not_enforced() {
        let der = [0x5a; 100];
        let pem = encode(PUBLIC_KEY_LABEL, &der).unwrap();
        let body: String = pem.lines().filter(|line| !line.starts_with("-----")).collect();
        assert!(body.len() > 64);

        // all on one line
        let input = format!("-----BEGIN PUBLIC KEY-----\n{body}\n-----END PUBLIC KEY-----\n");
        let document = Document::decode(&input).unwrap();
        assert_eq!(document.der(), &der);

        // wrapped at 76 columns
        let (head, tail) = body.split_at(76);
        let input =
            format!("-----BEGIN PUBLIC KEY-----\n{head}\n{tail}\n-----END PUBLIC KEY-----");
        let document = Document::decode(&input).unwrap();
        assert_eq!(document.der(), &der);
    }

    #[test]
    fn reject_leading_text() {
        let input = format!("some explanatory text\n{DOCUMENT}");

        assert!(matches!(
            Document::decode(&input),
            Err(FormatError::LeadingData)
        ));
    }

    #[test]
    fn reject_trailing_data() {
        let input = format!("{DOCUMENT}garbage");
        assert!(matches!(
            Document::decode(&input),
            Err(FormatError::TrailingData)
        ));

        let input = format!("{DOCUMENT}{DOCUMENT}");
        assert!(matches!(
            Document::decode(&input),
            Err(FormatError::MultipleDocuments(2))
        ));
    }

    #[test]
    fn reject_empty_and_garbage() {
        assert!(matches!(
            Document::decode(""),
            Err(FormatError::MissingDocument)
        ));
        assert!(matches!(
            Document::decode("definitely not PEM"),
            Err(FormatError::MissingDocument)
        ));
        assert!(matches!(
            Document::decode("-----BEGIN TEST-----\n!!!!\n-----END TEST-----\n"),
            Err(FormatError::Pem(_))
        ));
        assert!(matches!(
            Document::decode("-----BEGIN TEST-----\nAQID\n-----END OTHER-----\n"),
            Err(FormatError::Pem(_))
        ));
    }

    #[test]
    fn expect_label() {
        let document = Document::decode(DOCUMENT).unwrap();

        assert!(document.expect_label("TEST").is_ok());
        match document.expect_label(EC_PRIVATE_KEY_LABEL) {
            Err(FormatError::UnexpectedLabel { expected, found }) => {
                assert_eq!(expected, EC_PRIVATE_KEY_LABEL);
                assert_eq!(found, "TEST");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn encode_roundtrip() {
        let der = [0x5a; 100];
        let pem = encode(PUBLIC_KEY_LABEL, &der).unwrap();

        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert!(pem.ends_with("-----END PUBLIC KEY-----\n"));
        assert!(pem.lines().all(|line| line.len() <= 64));

        let secret = encode_secret(PUBLIC_KEY_LABEL, &der).unwrap();
        assert_eq!(*secret, pem);

        let document = Document::decode(&pem).unwrap();
        assert_eq!(document.label(), PUBLIC_KEY_LABEL);
        assert_eq!(document.der(), &der);
    }
}
