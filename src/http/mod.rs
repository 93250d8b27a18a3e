//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP/1.1 que necesita un servidor de
//! archivos estáticos de una petición por conexión:
//!
//! - Parsing de la request line (método + target)
//! - Construcción de responses con framing fijo
//! - Códigos de estado
//!
//! El servidor nunca lee headers del request: solo consume la primera
//! línea y cierra la conexión después de responder, por lo que los
//! headers quedan sin leer en el buffer del socket sin consecuencias.
//!
//! ### Formato de Response
//!
//! El framing es fijo, siempre los mismos dos headers y en este orden:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 13\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! <body>
//! ```

pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, RequestLine};
pub use response::Response;
pub use status::StatusCode;
