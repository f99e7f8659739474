//! Request/response payloads.
//!
//! A request is the single-line JSON array `[requestId, sourceText]`. A reply
//! is `[requestId, encodedLines]`, or `[requestId, {"error": message}]` when
//! the source could not be colorized. Replies carry no trailing delimiter.

use colorize::Lines;
use serde_json::{json, Value};

/// Error decoding a complete request line.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Not a `[id, source]` JSON array
    #[error("invalid request payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The request id was `null`
    #[error("request id is null")]
    NullId,
}

/// A decoded colorize request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Client-chosen id, echoed back verbatim
    pub id: Value,
    /// Source text to colorize
    pub source: String,
}

/// Decode one request line (without its newline).
pub fn decode_request(line: &[u8]) -> Result<Request, DecodeError> {
    let (id, source): (Value, String) = serde_json::from_slice(line)?;
    if id.is_null() {
        return Err(DecodeError::NullId);
    }
    Ok(Request { id, source })
}

/// Encode a successful reply.
pub fn encode_reply(id: &Value, lines: &Lines) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&(id, lines))
}

/// Encode a request-level failure reply.
pub fn encode_error(id: &Value, message: &str) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&(id, json!({ "error": message })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorize::{Color, Run};

    #[test]
    fn test_decode_request() {
        let request = decode_request(br#"[7, "let x\n= 1;"]"#).unwrap();
        assert_eq!(request.id, json!(7));
        assert_eq!(request.source, "let x\n= 1;");
    }

    #[test]
    fn test_decode_keeps_opaque_id() {
        let request = decode_request(br#"[{"buf": 3, "tick": 12}, ""]"#).unwrap();
        assert_eq!(request.id, json!({"buf": 3, "tick": 12}));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode_request(b"not json"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_request(b"[1]"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_request(b"[1, 2]"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_request(b""), Err(DecodeError::Json(_))));
        assert!(matches!(
            decode_request(br#"[null, "x"]"#),
            Err(DecodeError::NullId)
        ));
    }

    #[test]
    fn test_decode_tolerates_carriage_return() {
        let request = decode_request(b"[1, \"x\"]\r").unwrap();
        assert_eq!(request.source, "x");
    }

    #[test]
    fn test_encode_reply() {
        let lines = vec![
            vec![Run::new(Color::Keyword, 3), Run::eol(Color::Plain)],
            vec![Run::eol(Color::Comment)],
        ];
        let reply = encode_reply(&json!("abc"), &lines).unwrap();
        assert_eq!(reply, br#"["abc",[[[3,3],[1,0]],[[9,0]]]]"#.to_vec());
    }

    #[test]
    fn test_encode_error() {
        let reply = encode_error(&json!(4), "boom").unwrap();
        let value: Value = serde_json::from_slice(&reply).unwrap();
        assert_eq!(value, json!([4, {"error": "boom"}]));
    }
}
