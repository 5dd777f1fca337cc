//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (binario seguro, framing por `Content-Length`)
//! - Construcción y parsing de responses
//! - Conjunto cerrado de status codes
//! - Compresión gzip negociada con `Accept-Encoding`
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding; // Negociación y compresión del body
pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status; // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use encoding::ContentEncoding;
pub use request::{Method, ParseError, Request, RequestParser};
pub use response::Response;
pub use status::{InvalidStatusCode, StatusCode};
