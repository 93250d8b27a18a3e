//! # Construcción de Respuestas HTTP
//!
//! Construye respuestas HTTP/1.1 con framing fijo y las convierte a
//! bytes listos para el socket.
//!
//! El servidor siempre emite exactamente dos headers, en este orden:
//! `Content-Length` y `Content-Type`. No hay headers opcionales, así
//! que no hace falta un mapa de headers: el frame se serializa directo
//! desde los campos del struct.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_server::http::{Response, StatusCode};
//!
//! let response = Response::file(b"Hello".to_vec(), "text/plain");
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;
use std::path::Path;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Valor del header Content-Type
    content_type: String,

    /// Cuerpo de la respuesta (Content-Length se calcula de aquí)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta 200 OK con el contenido de un archivo
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::Response;
    ///
    /// let response = Response::file(b"<h1>Hola</h1>".to_vec(), "text/html");
    /// assert_eq!(response.status().as_u16(), 200);
    /// ```
    pub fn file(body: Vec<u8>, content_type: &str) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: content_type.to_string(),
            body,
        }
    }

    /// Crea una respuesta de error con un fragmento HTML mínimo
    ///
    /// El body nombra el código y su reason phrase:
    /// `<html><body><h1>404 Not Found</h1></body></html>`
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error_page(StatusCode::Forbidden);
    /// assert_eq!(response.status(), StatusCode::Forbidden);
    /// ```
    pub fn error_page(status: StatusCode) -> Self {
        let body = format!("<html><body><h1>{}</h1></body></html>", status);
        Self {
            status,
            content_type: "text/html".to_string(),
            body: body.into_bytes(),
        }
    }

    /// Código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Cuerpo de la respuesta
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el frame completo, con el orden de headers fijo:
    ///
    /// ```text
    /// HTTP/1.1 200 OK\r\n
    /// Content-Length: 5\r\n
    /// Content-Type: text/plain\r\n
    /// \r\n
    /// Hello
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: {}\r\n\r\n",
            self.status,
            self.body.len(),
            self.content_type
        );

        let mut result = Vec::with_capacity(header.len() + self.body.len());
        result.extend_from_slice(header.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }
}

/// Deriva el Content-Type a partir de la extensión del archivo
///
/// La comparación es case-insensitive. Extensiones desconocidas (o
/// archivos sin extensión) caen al tipo binario genérico
/// `application/octet-stream`.
///
/// # Ejemplo
/// ```
/// use static_server::http::response::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("data.bin")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        Some("wasm") => "application/wasm",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
