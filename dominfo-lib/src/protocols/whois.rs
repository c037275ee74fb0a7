//! WHOIS protocol transport.
//!
//! WHOIS (RFC 3912) is a bare text protocol: connect to TCP port 43, send one
//! CRLF-terminated query line, then read until the server closes the
//! connection. There is no length prefix and no status code, so the only
//! framing is the connection itself.

use crate::error::DominfoError;
use crate::types::{DEFAULT_TIMEOUT, WHOIS_PORT};
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, warn};

const READ_CHUNK_SIZE: usize = 4096;

/// Blocking WHOIS client.
///
/// Every call to [`WhoisClient::query`] opens its own socket and closes it
/// before returning, whether the query succeeded or not.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    /// Connect, read, and write timeout for each socket
    timeout: Duration,
    /// Port queried on every host
    port: u16,
}

impl WhoisClient {
    /// Create a new WHOIS client with default settings.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            port: WHOIS_PORT,
        }
    }

    /// Create a new WHOIS client with custom timeout.
    ///
    /// std sockets reject a zero timeout, so it is raised to one millisecond.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: timeout.max(Duration::from_millis(1)),
            port: WHOIS_PORT,
        }
    }

    /// Query servers on a port other than 43.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `query` to `host` and return the decoded response.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname or IP address of the WHOIS server
    /// * `query` - A single query line, without the trailing CRLF
    ///
    /// # Errors
    ///
    /// Returns `DominfoError::ConnectionError` naming `host` if the address
    /// cannot be resolved, the connection or send fails, or the read times
    /// out before any data arrives. An empty response is not an error.
    pub fn query(&self, host: &str, query: &str) -> Result<String, DominfoError> {
        let mut stream = self.connect(host)?;

        stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.timeout)))
            .map_err(|e| DominfoError::connection(host, format!("Failed to set timeout: {}", e)))?;

        stream
            .write_all(format!("{}\r\n", query).as_bytes())
            .and_then(|_| stream.flush())
            .map_err(|e| DominfoError::connection(host, format!("Failed to send query: {}", e)))?;

        let response = self.read_to_close(host, &mut stream)?;
        debug!(host = %host, bytes = response.len(), "Received WHOIS response");

        Ok(decode_response(response))
    }

    /// Connect to the first reachable address `host` resolves to.
    fn connect(&self, host: &str) -> Result<TcpStream, DominfoError> {
        let addrs = (host, self.port)
            .to_socket_addrs()
            .map_err(|e| DominfoError::connection(host, format!("Failed to resolve: {}", e)))?;

        let mut last_error = None;
        for addr in addrs {
            debug!(host = %host, addr = %addr, "Connecting to WHOIS server");
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_error = Some(e),
            }
        }

        Err(match last_error {
            Some(e) => DominfoError::connection(host, e.to_string()),
            None => DominfoError::connection(host, "No addresses resolved"),
        })
    }

    /// Read until the peer closes the connection.
    ///
    /// A read timeout after data has arrived is treated as the end of the
    /// response; one before any data is a connection error.
    fn read_to_close(&self, host: &str, stream: &mut TcpStream) -> Result<Vec<u8>, DominfoError> {
        let mut response = Vec::new();
        let mut buf = [0u8; READ_CHUNK_SIZE];

        loop {
            match stream.read(&mut buf) {
                Ok(0) => break, // EOF
                Ok(n) => response.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    if response.is_empty() {
                        return Err(DominfoError::connection(
                            host,
                            format!("Read timed out after {:?}", self.timeout),
                        ));
                    }
                    warn!(host = %host, bytes = response.len(), "Read timed out, using partial response");
                    break;
                }
                Err(e) => {
                    return Err(DominfoError::connection(host, format!("Read error: {}", e)));
                }
            }
        }

        Ok(response)
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Query the authoritative server for `domain` and return the raw text.
pub fn fetch_raw(
    client: &WhoisClient,
    authoritative_server: &str,
    domain: &str,
) -> Result<String, DominfoError> {
    client.query(authoritative_server, domain)
}

/// Decode response bytes as UTF-8, dropping any invalid sequences.
pub fn decode_response(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            debug!(bytes = bytes.len(), "Response is not valid UTF-8, dropping invalid sequences");
            bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
        }
    }
}
