use anyhow::{anyhow, bail, Result};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Requests with a bigger head than this are rejected.
pub const MAX_HEAD_LEN: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Decoded `query` parameter, if present.
    pub query: Option<String>,
}

impl Request {
    /// Parse the request line out of a request head.
    pub fn parse(head: &str) -> Result<Self> {
        let line = head.lines().next().ok_or_else(|| anyhow!("empty request"))?;
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
        else {
            bail!("malformed request line: {:?}", line);
        };
        if !version.starts_with("HTTP/") {
            bail!("unsupported protocol: {}", version);
        }

        // Relative targets need a base before `url` will parse them.
        let url = url::Url::parse("http://localhost")?.join(target)?;
        let query = url
            .query_pairs()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v.into_owned());

        Ok(Self {
            method: method.to_string(),
            path: url.path().to_string(),
            query,
        })
    }
}

/// Read up to the blank line ending the head. Returns None if the peer
/// closed before sending anything.
pub async fn read_head<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(None);
            }
            bail!("connection closed mid-request");
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_head_end(&buf) {
            buf.truncate(end);
            return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
        }
        if buf.len() > MAX_HEAD_LEN {
            bail!("request head exceeds {} bytes", MAX_HEAD_LEN);
        }
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body.as_ref().map(Value::to_string).unwrap_or_default();
        let mut out = format!("HTTP/1.1 {} {}\r\n", self.status, reason(self.status));
        out.push_str("Access-Control-Allow-Origin: *\r\n");
        if self.status == 204 {
            out.push_str("Access-Control-Allow-Methods: GET, OPTIONS\r\n");
            out.push_str("Access-Control-Allow-Headers: *\r\n");
        }
        if self.status == 405 {
            out.push_str("Allow: GET, OPTIONS\r\n");
        }
        if self.body.is_some() {
            out.push_str("Content-Type: application/json; charset=utf-8\r\n");
        }
        out.push_str(&format!("Content-Length: {}\r\n", body.len()));
        out.push_str("Connection: close\r\n\r\n");
        out.push_str(&body);
        out.into_bytes()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_query() {
        let req = Request::parse("GET /suggestions?query=Bosnia%20and+Herz HTTP/1.1\r\nHost: x").unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/suggestions");
        assert_eq!(req.query.as_deref(), Some("Bosnia and Herz"));
    }

    #[test]
    fn test_parse_without_query() {
        let req = Request::parse("GET /countries HTTP/1.1").unwrap();
        assert_eq!(req.path, "/countries");
        assert_eq!(req.query, None);

        let req = Request::parse("GET /countries?query= HTTP/1.1").unwrap();
        assert_eq!(req.query.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Request::parse("").is_err());
        assert!(Request::parse("GET /").is_err());
        assert!(Request::parse("GET / SMTP").is_err());
    }

    #[tokio::test]
    async fn test_read_head_stops_at_blank_line() {
        let raw: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\n\r\nbody";
        let mut reader = raw;
        let head = read_head(&mut reader).await.unwrap().unwrap();
        assert_eq!(head, "GET / HTTP/1.1\r\nHost: a");
    }

    #[tokio::test]
    async fn test_read_head_eof() {
        let mut empty: &[u8] = b"";
        assert!(read_head(&mut empty).await.unwrap().is_none());
        let mut partial: &[u8] = b"GET / HTTP/1.1\r\n";
        assert!(read_head(&mut partial).await.is_err());
    }

    #[test]
    fn test_response_headers() {
        let bytes = Response::json(200, serde_json::json!({"suggestions": []})).to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(text.contains("Content-Length: 18\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"suggestions\":[]}"));

        let text = String::from_utf8(Response::empty(204).to_bytes()).unwrap();
        assert!(text.contains("Content-Length: 0\r\n"));
        assert!(!text.contains("Content-Type"));
    }
}
