use std::io::{self, BufRead, Write};
use std::net::{TcpListener, TcpStream};

use credit_risk_core::formula;
use credit_risk_ui::{render_page, PAGE_MIME_TYPE, PAGE_PATH};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::{ServerConfig, Transport};
use crate::metrics::{MetricsRegistry, UNMATCHED_ROUTE};
use crate::protocol::{
    parse_debt_service, parse_profile, AssessmentResponse, ErrorBody, ProfileError,
};

const HEALTH_PATH: &str = "/health";
const PREDICT_PATH: &str = "/api/predict";
const FORMULA_PATH: &str = "/api/formula";
const DTI_PATH: &str = "/api/dti";
const METRICS_PATH: &str = "/metrics";

const KNOWN_PATHS: [&str; 6] = [
    PAGE_PATH,
    HEALTH_PATH,
    PREDICT_PATH,
    FORMULA_PATH,
    DTI_PATH,
    METRICS_PATH,
];

const METRICS_MIME_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub struct RiskServer {
    config: ServerConfig,
    metrics: MetricsRegistry,
}

impl RiskServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn serve(&self) -> io::Result<()> {
        match self.config.transport {
            Transport::Http => self.serve_http(&self.config.http_addr),
            Transport::Stdio => self.serve_stdio(),
        }
    }

    /// Scores one JSON profile body. Every transport goes through here.
    pub fn assess_body(&self, body: &[u8]) -> Result<AssessmentResponse, ProfileError> {
        let profile = parse_profile(body).inspect_err(|_| self.metrics.record_rejected_profile())?;
        let response = AssessmentResponse::for_profile(&profile);
        self.metrics.record_assessment(response.assessment.rating);
        debug!(
            score = response.assessment.risk_score,
            rating = response.assessment.rating.name(),
            "assessment computed"
        );
        Ok(response)
    }

    /// Line-delimited JSON: one profile per input line, one response per
    /// output line.
    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        info!("credit-riskd stdio transport ready");

        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let payload = match self.assess_body(trimmed.as_bytes()) {
                Ok(response) => serde_json::to_vec(&response),
                Err(err) => {
                    warn!(error = %err, "rejected stdio profile");
                    serde_json::to_vec(&ErrorBody::new(err.to_string()))
                }
            };
            let mut payload = payload.map_err(io::Error::from)?;
            payload.push(b'\n');
            stdout.write_all(&payload)?;
            stdout.flush()?;
        }

        Ok(())
    }

    pub fn serve_http(&self, addr: &str) -> io::Result<()> {
        let listener = TcpListener::bind(addr)?;
        info!(addr = %listener.local_addr()?, "credit-riskd http listening");
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = self.handle_http_connection(stream) {
                        warn!(error = %err, "http request error");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "http accept error");
                }
            }
        }
        Ok(())
    }

    fn handle_http_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        // Connections are served in turn; a stalled client must not hold the loop.
        stream.set_read_timeout(Some(self.config.http_timeout))?;
        stream.set_write_timeout(Some(self.config.http_timeout))?;
        let mut reader = io::BufReader::new(stream.try_clone()?);
        let Some(req) = read_http_request(&mut reader, self.config.max_body_bytes)? else {
            return Ok(());
        };
        let response = self.dispatch_http_request(&req);
        write_http_response(&mut stream, &response)
    }

    fn dispatch_http_request(&self, req: &HttpRequest) -> HttpResponse {
        let (route, response) = self.route_http_request(req);
        self.metrics.record_request(route, response.status);
        info!(
            method = %req.method,
            path = %req.path,
            status = response.status,
            "http request served"
        );
        response
    }

    fn route_http_request(&self, req: &HttpRequest) -> (&'static str, HttpResponse) {
        let Some(route) = KNOWN_PATHS.into_iter().find(|path| *path == req.path) else {
            return (
                UNMATCHED_ROUTE,
                HttpResponse::error(404, format!("no route for {}", req.path)),
            );
        };

        if req.body_too_large {
            return (
                route,
                HttpResponse::error(
                    413,
                    format!(
                        "request body exceeds {} bytes",
                        self.config.max_body_bytes
                    ),
                ),
            );
        }

        let response = match (req.method.as_str(), route) {
            ("GET", PAGE_PATH) => HttpResponse::text(200, PAGE_MIME_TYPE, render_page()),
            ("GET", HEALTH_PATH) => HttpResponse::json(200, &json!({"status": "ok"})),
            ("POST", PREDICT_PATH) => match self.assess_body(&req.body) {
                Ok(out) => HttpResponse::json(200, &out),
                Err(err) => HttpResponse::error(400, err.to_string()),
            },
            ("GET", FORMULA_PATH) => HttpResponse::json(200, &formula()),
            ("POST", DTI_PATH) => match parse_debt_service(&req.body) {
                Ok(out) => HttpResponse::json(200, &out),
                Err(err) => HttpResponse::error(400, err.to_string()),
            },
            ("GET", METRICS_PATH) => {
                HttpResponse::text(200, METRICS_MIME_TYPE, self.metrics.render_text())
            }
            _ => HttpResponse::error(
                405,
                format!("method {} not allowed on {route}", req.method),
            ),
        };
        (route, response)
    }
}

impl Default for RiskServer {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

#[derive(Debug)]
struct HttpRequest {
    method: String,
    path: String,
    body: Vec<u8>,
    body_too_large: bool,
}

#[derive(Debug)]
struct HttpResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl HttpResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, &ErrorBody::new(message))
    }

    fn text(status: u16, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body: body.into_bytes(),
        }
    }
}

fn read_http_request<R: BufRead>(
    reader: &mut R,
    max_body_bytes: usize,
) -> io::Result<Option<HttpRequest>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let first = line.trim_end_matches(['\r', '\n']);
    if first.is_empty() {
        return Ok(None);
    }

    let mut parts = first.split_whitespace();
    let Some(method) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line (missing method)",
        ));
    };
    let Some(target) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line (missing path)",
        ));
    };
    let path = target.split_once('?').map_or(target, |(path, _)| path);

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<usize>().unwrap_or(0);
            }
        }
    }

    let body_too_large = content_length > max_body_bytes;
    let mut body = Vec::new();
    if content_length > 0 && !body_too_large {
        body.resize(content_length, 0);
        reader.read_exact(&mut body)?;
    }
    Ok(Some(HttpRequest {
        method: method.to_string(),
        path: path.to_string(),
        body,
        body_too_large,
    }))
}

fn write_http_response(stream: &mut TcpStream, response: &HttpResponse) -> io::Result<()> {
    let reason = http_reason_phrase(response.status);
    let headers = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason,
        response.content_type,
        response.body.len()
    );
    stream.write_all(headers.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}

fn http_reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "OK",
    }
}
