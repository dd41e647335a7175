//! Shared test helpers: a scripted HTTP server on a loopback port

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use testra::{ClientConfig, HttpTransport};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target including any query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serves the scripted responses in order, one connection each, then stops.
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let (stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let mut reader = BufReader::new(stream);
                let request = read_request(&mut reader);
                recorded.lock().unwrap().push(request);

                let mut stream = reader.into_inner();
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            url,
            requests,
            handle: Some(handle),
        }
    }

    /// Wait for every scripted response to be served and return the requests.
    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("stub server panicked");
        }
        self.requests.lock().unwrap().clone()
    }

    pub fn transport(&self) -> HttpTransport {
        HttpTransport::new(&self.config()).expect("Failed to create transport")
    }

    /// Write a `testra.toml` for this server into `dir`, with the exec file
    /// placed next to it. Returns the config path.
    pub fn write_config(&self, dir: &Path) -> PathBuf {
        let path = dir.join("testra.toml");
        let content = format!(
            "api_url = '{}'\nproject = 'acme'\nexec_file = '{}'\nconnect_timeout_secs = 5\nrequest_timeout_secs = 5\n",
            self.url,
            exec_file(dir).display()
        );
        fs::write(&path, content).expect("Failed to write testra.toml");
        path
    }

    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.url.clone(), "acme");
        config.connect_timeout_secs = 5;
        config.request_timeout_secs = 5;
        config
    }
}

/// Route command logging through the test harness's captured output.
pub fn capture_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("testra=debug")
        .with_test_writer()
        .try_init();
}

pub fn exec_file(dir: &Path) -> PathBuf {
    dir.join("testra.exec")
}

/// "METHOD target" for each request, in order.
pub fn targets(requests: &[RecordedRequest]) -> Vec<String> {
    requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.target))
        .collect()
}

fn read_request(reader: &mut BufReader<std::net::TcpStream>) -> RecordedRequest {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
