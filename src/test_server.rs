//!
//! src/test_server.rs
//!
//! Throwaway HTTP/1.1 server on a loopback port for exercising the
//! lookup client without touching the real api
//!

use std::sync::{Arc, Mutex, atomic::{AtomicUsize, Ordering}};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

const LOOKUP_PATH: &str = "/v1-alpha.1/links";

pub(crate) struct TestServer {
    addr: std::net::SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

fn reason(code: u16) -> &'static str {
    match code {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status"
    }
}

async fn read_request_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0_u8; 1024];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&head).to_string()
}

impl TestServer {
    /// Serves `responses` in order, repeating the last one once exhausted
    pub(crate) async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (task_hits, task_requests) = (hits.clone(), requests.clone());
        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else { break };
                let head = read_request_head(&mut stream).await;
                let line = head.lines().next().unwrap_or_default().to_string();
                task_requests.lock().unwrap().push(line);

                let n = task_hits.fetch_add(1, Ordering::SeqCst);
                let (code, body) = responses[n.min(responses.len() - 1)];
                let reply = format!(
                    "HTTP/1.1 {code} {}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(code),
                    body.len()
                );
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { addr, hits, requests, handle }
    }

    /// Accepts connections and never answers
    pub(crate) async fn silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task_hits = hits.clone();
        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let Ok((stream, _)) = listener.accept().await else { break };
                task_hits.fetch_add(1, Ordering::SeqCst);
                held.push(stream);
            }
        });

        Self { addr, hits, requests, handle }
    }

    /// Base url of a port nothing listens on
    pub(crate) async fn unreachable_base() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}{LOOKUP_PATH}")).unwrap()
    }

    pub(crate) fn base(&self) -> Url {
        Url::parse(&format!("http://{}{LOOKUP_PATH}", self.addr)).unwrap()
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
