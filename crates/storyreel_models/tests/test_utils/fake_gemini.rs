//! Minimal HTTP/1.1 stand-in for the Gemini endpoints.
//!
//! Each route is keyed by method and path (query excluded) and answers with a
//! queue of canned responses; the last response repeats once the queue drains.
//! The literal `{base}` in a response body is replaced by the server's root URL
//! so operations can point back at the fake download endpoint.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Reply {
    pub fn json(value: serde_json::Value) -> Self {
        Self::status_json(200, value)
    }

    pub fn status_json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_vec(),
        }
    }

    /// Provider error envelope with the given code and message.
    pub fn api_error(status: u16, message: &str, code_name: &str) -> Self {
        Self::status_json(
            status,
            serde_json::json!({
                "error": { "code": status, "message": message, "status": code_name }
            }),
        )
    }
}

/// One request as received by the fake.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string
    pub target: String,
    pub api_key_header: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

type Routes = HashMap<(String, String), VecDeque<Reply>>;

/// Running fake server; stops with the test runtime.
#[derive(Debug, Clone)]
pub struct FakeGemini {
    root: String,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeGemini {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let root = format!("http://{}", listener.local_addr()?);
        let server = Self {
            root,
            routes: Arc::default(),
            requests: Arc::default(),
        };

        let accepting = server.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let connection = accepting.clone();
                tokio::spawn(async move {
                    let _ = connection.serve(stream).await;
                });
            }
        });
        Ok(server)
    }

    /// Server root, e.g. `http://127.0.0.1:41234`.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Value for `GeminiSettings::base_url`.
    pub fn base_url(&self) -> String {
        format!("{}/v1beta", self.root)
    }

    /// Queue `reply` for `method path`.
    pub fn route(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose path (query excluded) equals `path`.
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.target.split('?').next() == Some(path))
            .collect()
    }

    fn reply_for(&self, method: &str, path: &str) -> Reply {
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&(method.to_string(), path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Reply::text(404, "no route"),
        }
    }

    async fn serve(&self, mut stream: TcpStream) -> std::io::Result<()> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        let head_end = loop {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                return Ok(());
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let mut lines = head.lines();
        let mut request_line = lines.next().unwrap_or_default().split_whitespace();
        let method = request_line.next().unwrap_or_default().to_string();
        let target = request_line.next().unwrap_or_default().to_string();

        let mut content_length = 0usize;
        let mut api_key_header = None;
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                let value = value.trim();
                match name.trim().to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.parse().unwrap_or(0),
                    "x-goog-api-key" => api_key_header = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        while buf.len() < head_end + content_length {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body_end = buf.len().min(head_end + content_length);
        let body = String::from_utf8_lossy(&buf[head_end..body_end]).to_string();

        let path = target.split('?').next().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(Recorded {
            method: method.clone(),
            target,
            api_key_header,
            body,
        });

        let reply = self.reply_for(&method, &path);
        let body = if reply.content_type == "application/json" {
            String::from_utf8_lossy(&reply.body)
                .replace("{base}", &self.root)
                .into_bytes()
        } else {
            reply.body
        };
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            reply.status,
            reason(reply.status),
            reply.content_type,
            body.len()
        );
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(&body).await?;
        stream.shutdown().await
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
