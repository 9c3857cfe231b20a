use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Minimal HTTP stand-in for the inference service.
///
/// Serves `/health`, `/schema` and `/predict` until the test process exits and
/// records every `/predict` body.
pub struct StubService {
    pub base_url: String,
    predict_bodies: Arc<Mutex<Vec<String>>>,
}

impl StubService {
    pub fn start(features: &[&str], prediction: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub service");
        let base_url = format!("http://{}", listener.local_addr().expect("stub address"));
        let schema = serde_json::json!({
            "expected_features": features,
            "target_column": "income",
            "positive_label": 1,
            "label_mapping": {"<=50K": 0, ">50K": 1},
        })
        .to_string();
        let prediction = prediction.to_string();
        let predict_bodies = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&predict_bodies);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let (head, body) = read_request(&mut stream);
                let response = if head.starts_with("GET /health") {
                    json_response(r#"{"status":"ok","model_loaded":true,"model_name":"logreg"}"#)
                } else if head.starts_with("GET /schema") {
                    json_response(&schema)
                } else if head.starts_with("POST /predict") {
                    recorded.lock().unwrap().push(body);
                    json_response(&prediction)
                } else {
                    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string()
                };
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self {
            base_url,
            predict_bodies,
        }
    }

    pub fn predict_bodies(&self) -> Vec<String> {
        self.predict_bodies.lock().unwrap().clone()
    }
}

/// Address that refuses connections.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn read_request(stream: &mut TcpStream) -> (String, String) {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let Ok(read) = stream.read(&mut buf) else {
            break;
        };
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buf[..read]);
        if let Some(end) = find_header_end(&data) {
            let head = String::from_utf8_lossy(&data[..end]).to_string();
            let length = content_length(&head);
            if data.len() >= end + 4 + length {
                let body = String::from_utf8_lossy(&data[end + 4..end + 4 + length]).to_string();
                return (head, body);
            }
        }
    }
    (String::from_utf8_lossy(&data).to_string(), String::new())
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
