use base64::Engine;
use bytes::Bytes;
use url::Url;

use crate::client::{ClientError, HttpTransport};

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("malformed data URI: missing ','")]
    MalformedDataUri,
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported download reference: {0}")]
    Unsupported(String),
    #[error("fetch failed: {0}")]
    Fetch(#[from] ClientError),
}

/// Encode bytes as a `data:` URI with a base64 payload.
pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Decode a `data:` URI.
///
/// Payloads without `;base64` are returned byte for byte; percent escapes
/// are not interpreted.
pub fn decode_data_uri(value: &str) -> Result<Bytes, ReferenceError> {
    let rest = value
        .strip_prefix("data:")
        .ok_or_else(|| ReferenceError::Unsupported(value.to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(ReferenceError::MalformedDataUri)?;

    if header.ends_with(";base64") {
        let decoded = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Bytes::from(decoded))
    } else {
        Ok(Bytes::copy_from_slice(payload.as_bytes()))
    }
}

/// Load the bytes a stored reference points at: inline for `data:` URIs,
/// a GET for `http(s)` URLs.
pub async fn resolve(value: &str, client: &HttpTransport) -> Result<Bytes, ReferenceError> {
    if value.starts_with("data:") {
        return decode_data_uri(value);
    }

    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            tracing::info!("fetching stored file from {}", url);
            Ok(client.get_bytes(&url).await?)
        }
        _ => Err(ReferenceError::Unsupported(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_base64() {
        let uri = to_data_uri("text/plain", b"ATTACK AT DAWN");
        assert!(uri.starts_with("data:text/plain;base64,"));
        assert_eq!(decode_data_uri(&uri).unwrap(), Bytes::from_static(b"ATTACK AT DAWN"));
    }

    #[test]
    fn test_data_uri_plain_payload() {
        assert_eq!(
            decode_data_uri("data:,HELLO").unwrap(),
            Bytes::from_static(b"HELLO")
        );
        assert_eq!(
            decode_data_uri("data:text/plain;charset=utf-8,a,b").unwrap(),
            Bytes::from_static(b"a,b")
        );
    }

    #[test]
    fn test_data_uri_errors() {
        assert!(matches!(
            decode_data_uri("data:text/plain;base64"),
            Err(ReferenceError::MalformedDataUri)
        ));
        assert!(matches!(
            decode_data_uri("data:;base64,***"),
            Err(ReferenceError::Base64(_))
        ));
        assert!(matches!(
            decode_data_uri("file:///etc/passwd"),
            Err(ReferenceError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_schemes() {
        let client = HttpTransport::new().unwrap();
        for value in ["blob:filecipher/1234", "ftp://host/file", "not a url"] {
            assert!(matches!(
                resolve(value, &client).await,
                Err(ReferenceError::Unsupported(_))
            ));
        }
        assert_eq!(
            resolve("data:,inline", &client).await.unwrap(),
            Bytes::from_static(b"inline")
        );
    }
}
