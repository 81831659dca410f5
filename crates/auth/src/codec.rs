//! Token segment codec
//!
//! Every segment of a token is base64url (RFC 4648 §5) without padding.
//! Decoding tolerates padding if a client re-adds it, but rejects the
//! standard `+`/`/` alphabet and non-canonical trailing bits so that every
//! accepted segment has exactly one spelling.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::TokenRejection;

const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode raw bytes as an unpadded base64url segment.
pub fn encode_segment(bytes: &[u8]) -> String {
    SEGMENT_ENGINE.encode(bytes)
}

/// Decode a base64url segment back into bytes.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenRejection> {
    SEGMENT_ENGINE
        .decode(segment)
        .map_err(|_| TokenRejection::MalformedSegment)
}

/// Serialize a value as JSON and encode it as a segment.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(encode_segment(&json))
}

/// Decode a segment and parse its bytes as JSON of the expected shape.
pub fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T, TokenRejection> {
    let bytes = decode_segment(segment)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenRejection::MalformedPayload)
}
