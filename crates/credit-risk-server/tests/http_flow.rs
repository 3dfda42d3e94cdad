use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use serde_json::Value;

fn reserve_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve addr");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr.to_string()
}

fn wait_for_http(addr: &str) {
    for _ in 0..80 {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    panic!("http server not ready on {addr}");
}

fn spawn_http(addr: &str) -> Child {
    spawn_http_with(addr, &[])
}

fn spawn_http_with(addr: &str, envs: &[(&str, &str)]) -> Child {
    let child = Command::new(env!("CARGO_BIN_EXE_credit-riskd"))
        .env("CREDIT_RISKD_TRANSPORT", "http")
        .env("CREDIT_RISK_HTTP_ADDR", addr)
        .envs(envs.iter().copied())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn credit-riskd");
    wait_for_http(addr);
    child
}

fn send_http(addr: &str, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect http");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(request.as_bytes()).expect("write request");
    stream.flush().expect("flush");
    let mut buf = String::new();
    stream.read_to_string(&mut buf).expect("read response");
    buf
}

fn response_body(response: &str) -> &str {
    response.split("\r\n\r\n").nth(1).unwrap_or("")
}

fn response_header(response: &str) -> &str {
    response.split("\r\n\r\n").next().unwrap_or("")
}

const FORM_DEFAULTS: &str = r#"{"age":35,"income":500000,"creditRating":"Average","debtToIncomeRatio":0.35,"employmentLength":5,"numAccounts":4,"latePayments":2,"loanAmount":1000000,"interestRate":8.5,"savingsBalance":100000}"#;

#[test]
fn http_health_predict_and_formula_work() {
    let addr = reserve_addr();
    let mut child = spawn_http(&addr);

    let health = send_http(&addr, "GET", "/health", "");
    assert!(health.starts_with("HTTP/1.1 200"));
    assert!(response_body(&health).contains("\"status\":\"ok\""));

    let predict = send_http(&addr, "POST", "/api/predict", FORM_DEFAULTS);
    assert!(predict.starts_with("HTTP/1.1 200"));
    assert!(response_header(&predict).contains("Content-Type: application/json"));
    let body: Value = serde_json::from_str(response_body(&predict)).expect("predict json");
    assert_eq!(body["risk_score"], 39);
    assert_eq!(body["rating"], "Average");
    assert_eq!(body["risk_level"], "AVERAGE");
    assert_eq!(body["risk_color"], "#f39c12");
    assert!(body["description_hindi"].as_str().is_some());
    assert!(body["description_english"]
        .as_str()
        .unwrap_or("")
        .contains("average"));

    let formula = send_http(&addr, "GET", "/api/formula", "");
    assert!(formula.starts_with("HTTP/1.1 200"));
    let body: Value = serde_json::from_str(response_body(&formula)).expect("formula json");
    assert_eq!(body["formula"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["total"], "Risk Score out of 100");

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn http_rejects_malformed_profile() {
    let addr = reserve_addr();
    let mut child = spawn_http(&addr);

    let bad = send_http(&addr, "POST", "/api/predict", r#"{"income":"a lot"}"#);
    assert!(bad.starts_with("HTTP/1.1 400"));
    let body: Value = serde_json::from_str(response_body(&bad)).expect("error json");
    assert!(body["error"].as_str().unwrap_or("").contains("income"));

    let not_json = send_http(&addr, "POST", "/api/predict", "age=35");
    assert!(not_json.starts_with("HTTP/1.1 400"));

    let partial = send_http(&addr, "POST", "/api/predict", r#"{"age":40}"#);
    assert!(partial.starts_with("HTTP/1.1 200"));

    let missing = send_http(&addr, "GET", "/api/unknown", "");
    assert!(missing.starts_with("HTTP/1.1 404"));

    let metrics = send_http(&addr, "GET", "/metrics", "");
    assert!(metrics.starts_with("HTTP/1.1 200"));
    let text = response_body(&metrics);
    assert!(text.contains("credit_risk_rejected_profiles_total 2"));
    assert!(text.contains("credit_risk_http_responses_total{status=\"400\"} 2"));

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn http_serves_form_page_and_dti_helper() {
    let addr = reserve_addr();
    let mut child = spawn_http(&addr);

    let page = send_http(&addr, "GET", "/", "");
    assert!(page.starts_with("HTTP/1.1 200"));
    assert!(response_header(&page).contains("text/html"));
    let html = response_body(&page);
    assert!(html.contains("Assess Credit Risk"));
    assert!(html.contains("<option value=\"No History\">No History</option>"));

    let dti = send_http(
        &addr,
        "POST",
        "/api/dti",
        r#"{"income":600000,"loanAmount":120000}"#,
    );
    assert!(dti.starts_with("HTTP/1.1 200"));
    let body: Value = serde_json::from_str(response_body(&dti)).expect("dti json");
    assert_eq!(body["monthly_income"], 50000.0);
    assert_eq!(body["monthly_loan_payment"], 10000.0);

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn http_stalled_client_does_not_block_later_requests() {
    let addr = reserve_addr();
    let mut child = spawn_http_with(&addr, &[("CREDIT_RISK_HTTP_TIMEOUT_MS", "300")]);

    let mut partial_line = TcpStream::connect(&addr).expect("connect stalled client");
    partial_line.write_all(b"GET /hea").expect("write partial line");
    partial_line.flush().expect("flush");

    let mut short_body = TcpStream::connect(&addr).expect("connect short body client");
    short_body
        .write_all(b"POST /api/predict HTTP/1.1\r\nContent-Length: 50\r\n\r\n{\"age\":35}")
        .expect("write short body");
    short_body.flush().expect("flush");

    let mut stream = TcpStream::connect(&addr).expect("connect http");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set read timeout");
    stream
        .write_all(b"GET /health HTTP/1.1\r\nConnection: close\r\n\r\n")
        .expect("write request");
    stream.flush().expect("flush");
    let mut health = String::new();
    stream.read_to_string(&mut health).expect("read health");
    assert!(health.starts_with("HTTP/1.1 200"), "got {health:?}");

    drop(partial_line);
    drop(short_body);
    let _ = child.kill();
    let _ = child.wait();
}
