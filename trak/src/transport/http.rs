/*!
 * HTTP transport for the trak.io API.
 *
 * Uses `ureq` — a pure-Rust blocking HTTP client with no async runtime.
 * Every SDK call is synchronous, so the calling thread simply blocks until
 * the response arrives.
 *
 * Design decisions:
 * - **No status branching** — `http_status_as_error(false)` makes 4xx/5xx
 *   responses come back as normal bodies; trak.io reports API errors in the
 *   JSON body and the caller gets that body verbatim.
 * - **Single attempt** — no retries, no backoff.
 * - **Agent defaults** — timeouts are whatever `ureq` ships with.
 */

use tracing::{debug, warn};
use ureq::Agent;

use super::Transport;
use crate::error::{Error, Result};
use crate::protocol::constants::CLIENT_VERSION;

/**
 * Thin wrapper around `ureq::Agent` bound to one API base URL.
 *
 * Created by `TrakClient::new()`; the base URL is fixed for the lifetime of
 * the transport.
 */
pub struct HttpTransport {
    agent: Agent,

    /// Scheme + host (+ optional port), without a trailing slash.
    base_url: String,
}

impl HttpTransport {
    /**
     * Creates a transport that POSTs to `base_url` + path.
     *
     * `base_url` must include the scheme, e.g. `https://api.trak.io`.
     * See `protocol::credential::base_url` for normalizing a bare host.
     */
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn post(&self, path: &str, body: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("User-Agent", CLIENT_VERSION)
            .send(body)
            .map_err(|err| {
                warn!(%url, error = %err, "trak.io request failed");
                Error::from(err)
            })?;

        let status = response.status().as_u16();
        debug!(%url, status, "trak.io responded");

        response.into_body().read_to_vec().map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /**
     * Accepts exactly one connection, answers it with `status_line` and
     * `body`, and returns the raw request (head + body) it received.
     */
    fn one_shot_server(status_line: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                head.push_str(&line);
            }

            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response_head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(response_head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();

            format!("{head}\r\n{}", String::from_utf8(request_body).unwrap())
        });

        (base_url, handle)
    }

    #[test]
    fn posts_json_to_path_and_returns_body() {
        let (base_url, server) = one_shot_server("200 OK", br#"{"status":"success"}"#);
        let transport = HttpTransport::new(base_url);

        let body = transport
            .post("/v1/track", r#"{"token":"key","data":{}}"#)
            .unwrap();
        assert_eq!(body, br#"{"status":"success"}"#);

        let request = server.join().unwrap();
        let lowered = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /v1/track HTTP/1.1"));
        assert!(lowered.contains("content-type: application/json"));
        assert!(lowered.contains("user-agent: trak-rust/"));
        assert!(request.ends_with(r#"{"token":"key","data":{}}"#));
    }

    #[test]
    fn error_statuses_still_return_the_body() {
        let (base_url, server) = one_shot_server("401 Unauthorized", br#"{"status":"error"}"#);
        let transport = HttpTransport::new(base_url);

        let body = transport.post("/v1/identify", "{}").unwrap();
        assert_eq!(body, br#"{"status":"error"}"#);
        server.join().unwrap();
    }

    #[test]
    fn non_utf8_body_is_returned_as_bytes() {
        let (base_url, server) = one_shot_server("200 OK", b"\xff\xfe");
        let transport = HttpTransport::new(base_url);

        let body = transport.post("/v1/track", "{}").unwrap();
        assert_eq!(body, vec![0xff, 0xfe]);
        server.join().unwrap();
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = HttpTransport::new(base_url).post("/v1/track", "{}").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
