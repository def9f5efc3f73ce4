use crate::config::Config;
use hyper::Method;
use std::net::SocketAddr;
use std::time::Duration;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Mock appointments API server started");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_accept_error(err: &std::io::Error) {
    eprintln!("[Error] Failed to accept connection: {err}");
}

/// Request entry line, stamped with local wall-clock time.
pub fn log_request(method: &Method, path: &str) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("[{timestamp}] {method} {path}");
}

/// Total handler latency, logged once the response is ready.
pub fn log_timing(method: &Method, path: &str, elapsed: Duration) {
    println!("[Timing] {method} {path} took {elapsed:?}");
}

pub fn log_api_request(method: &Method, path: &str, status: u16) {
    println!("[API] {method} {path} - {status}");
}

pub fn log_connection_timeout(seconds: u64) {
    eprintln!("[Warn] Connection timeout after {seconds} seconds");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}
