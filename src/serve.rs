// ABOUTME: Local preview server for generated slideshows
// ABOUTME: Serves the written HTML file over HTTP until the process is interrupted

use crate::errors::{Result, SlideshowError};
use log::{debug, error, info};
use std::fs;
use std::path::Path;
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Bind a preview server on `host:port`. Port 0 picks a free port.
pub fn bind(host: &str, port: u16) -> Result<Server> {
    Server::http(format!("{}:{}", host, port))
        .map_err(|e| SlideshowError::Serve(format!("Failed to start HTTP server: {}", e)))
}

/// Serve `html_path` at `/` and at its own file name.
///
/// Handles at most `max_requests` requests when given, otherwise runs forever.
pub fn serve_file(server: &Server, html_path: &Path, max_requests: Option<usize>) -> Result<()> {
    let file_name = html_path
        .file_name()
        .map(|name| format!("/{}", name.to_string_lossy()))
        .unwrap_or_else(|| "/".to_string());

    if let Some(addr) = server.server_addr().to_ip() {
        info!("Serving {:?} on http://{}", html_path, addr);
        println!("Preview available at http://{}/", addr);
    }

    for request in server
        .incoming_requests()
        .take(max_requests.unwrap_or(usize::MAX))
    {
        respond(request, html_path, &file_name);
    }

    Ok(())
}

fn respond(request: Request, html_path: &Path, file_name: &str) {
    let url_path = request.url().split('?').next().unwrap_or("/").to_string();
    debug!("Request for {:?}", url_path);

    let response = if url_path == "/" || url_path == file_name {
        match fs::read(html_path) {
            Ok(content) => {
                let response = Response::from_data(content);
                match Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
                    Ok(header) => response.with_header(header),
                    Err(()) => response,
                }
            }
            Err(e) => {
                error!("Failed to read file {:?}: {}", html_path, e);
                Response::from_string(format!("Failed to read file: {}", e))
                    .with_status_code(StatusCode(500))
            }
        }
    } else {
        Response::from_string("404 Not Found")
            .with_status_code(StatusCode(404))
    };

    if let Err(e) = request.respond(response) {
        error!("Failed to send response: {}", e);
    }
}
