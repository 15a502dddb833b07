//! Mock JSON-RPC node for testing
//!
//! A small HTTP server that answers `eth_getBalance` requests the way a real
//! Ethereum node would, so the ledger client can be exercised without a
//! network or an access key.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Mock RPC node for testing
pub struct MockRpcServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for the mock node's behavior
#[derive(Debug, Clone)]
pub struct MockRpcConfig {
    /// Balance returned for every queried address, in wei
    pub balance_wei: u128,
    /// Respond with a JSON-RPC error instead of a result
    pub rpc_error: Option<(i64, &'static str)>,
    /// Respond with this HTTP status instead of 200
    pub http_status: Option<u16>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockRpcConfig {
    fn default() -> Self {
        Self {
            // 1.2345 ETH
            balance_wei: 1_234_500_000_000_000_000,
            rpc_error: None,
            http_status: None,
            delay_ms: 0,
        }
    }
}

impl MockRpcServer {
    /// Start a new mock node on a random available port
    pub fn start(config: MockRpcConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Non-blocking accept loop so stop() can take effect
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    /// The endpoint URL clients should point at
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the mock node
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockRpcServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockRpcConfig) {
    let mut buffer = [0; 4096];

    if let Ok(n) = stream.read(&mut buffer) {
        let request = String::from_utf8_lossy(&buffer[..n]);

        if config.delay_ms > 0 {
            thread::sleep(std::time::Duration::from_millis(config.delay_ms));
        }

        if let Some(status) = config.http_status {
            send_response(&mut stream, status, r#"{"error": "unavailable"}"#);
            return;
        }

        let first_line = request.lines().next().unwrap_or("");
        if !first_line.starts_with("POST") {
            send_response(&mut stream, 405, r#"{"error": "method not allowed"}"#);
            return;
        }

        let body = if let Some((code, message)) = config.rpc_error {
            format!(
                r#"{{"jsonrpc":"2.0","id":1,"error":{{"code":{},"message":"{}"}}}}"#,
                code, message
            )
        } else {
            format!(
                r#"{{"jsonrpc":"2.0","id":1,"result":"0x{:x}"}}"#,
                config.balance_wei
            )
        };

        send_response(&mut stream, 200, &body);
    }
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        405 => "Method Not Allowed",
        429 => "Too Many Requests",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonRpcLedger;
    use crate::domain::result::Error;
    use crate::domain::Address;
    use crate::ports::LedgerClient;
    use rust_decimal::Decimal;

    fn test_address() -> Address {
        Address::parse("0xdadb0d80178819f2319190d340ce9a924f783711").unwrap()
    }

    #[test]
    fn test_mock_server_starts() {
        let server = MockRpcServer::start(MockRpcConfig::default()).unwrap();
        assert!(server.endpoint().starts_with("http://127.0.0.1:"));
    }

    #[tokio::test]
    async fn test_get_balance_round_trip() {
        let server = MockRpcServer::start(MockRpcConfig::default()).unwrap();
        let ledger = JsonRpcLedger::with_endpoint(&server.endpoint()).unwrap();

        let balance = ledger.get_balance(&test_address()).await.unwrap();
        assert_eq!(balance.to_string(), "1.2345");
    }

    #[tokio::test]
    async fn test_zero_balance() {
        let server = MockRpcServer::start(MockRpcConfig {
            balance_wei: 0,
            ..Default::default()
        })
        .unwrap();
        let ledger = JsonRpcLedger::with_endpoint(&server.endpoint()).unwrap();

        let balance = ledger.get_balance(&test_address()).await.unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_rpc_error_maps_to_network() {
        let server = MockRpcServer::start(MockRpcConfig {
            rpc_error: Some((-32000, "header not found")),
            ..Default::default()
        })
        .unwrap();
        let ledger = JsonRpcLedger::with_endpoint(&server.endpoint()).unwrap();

        let result = ledger.get_balance(&test_address()).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn test_invalid_params_maps_to_invalid_address() {
        let server = MockRpcServer::start(MockRpcConfig {
            rpc_error: Some((-32602, "invalid argument 0")),
            ..Default::default()
        })
        .unwrap();
        let ledger = JsonRpcLedger::with_endpoint(&server.endpoint()).unwrap();

        let result = ledger.get_balance(&test_address()).await;
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_http_failure_maps_to_network() {
        let server = MockRpcServer::start(MockRpcConfig {
            http_status: Some(429),
            ..Default::default()
        })
        .unwrap();
        let ledger = JsonRpcLedger::with_endpoint(&server.endpoint()).unwrap();

        let result = ledger.get_balance(&test_address()).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
