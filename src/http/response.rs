//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http11_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_body("abc")
//!     .finalize(Some("gzip"))
//!     .unwrap();
//!
//! assert_eq!(response.header("Content-Encoding"), Some("gzip"));
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::encoding::ContentEncoding;
use super::request::{content_length, find, parse_headers, ParseError, HEAD_TERMINATOR};
use super::StatusCode;
use std::collections::HashMap;

/// Content-Type por defecto cuando el body no es vacío
const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP (Content-Type, Content-Length, etc.)
    /// Usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Crea una respuesta 200 OK con un body de texto
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok).with_body(body)
    }

    /// Crea una respuesta 200 OK con bytes de un archivo
    ///
    /// Establece `Content-Type: application/octet-stream`.
    pub fn octet_stream(body: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(body)
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// `Content-Length` se calcula en [`Response::finalize`], después de
    /// una posible compresión.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Prepara la respuesta para el cable
    ///
    /// 1. Si el body no es vacío y `accept_encoding` lista un esquema
    ///    soportado, comprime el body y agrega `Content-Encoding`.
    /// 2. Agrega `Content-Type: text/plain` si falta.
    /// 3. Fija `Content-Length` al largo real del body ya codificado.
    ///
    /// Con body vacío no se envían `Content-Type` ni `Content-Length`.
    pub fn finalize(mut self, accept_encoding: Option<&str>) -> std::io::Result<Self> {
        if self.body.is_empty() {
            self.headers.remove("Content-Type");
            self.headers.remove("Content-Length");
            return Ok(self);
        }

        if let Some(encoding) = accept_encoding.and_then(ContentEncoding::negotiate) {
            self.body = encoding.encode(&self.body)?;
            self.add_header("Content-Encoding", encoding.as_str());
        }

        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| DEFAULT_CONTENT_TYPE.to_string());
        let length = self.body.len().to_string();
        self.add_header("Content-Length", &length);

        Ok(self)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario, sin terminador extra
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(64 + self.body.len());

        // 1. Status line
        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Parsea una respuesta desde bytes (lado cliente)
    ///
    /// El body se delimita con `Content-Length`; sin ese header, todo lo
    /// que sigue a la cabecera es el body.
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::{Response, StatusCode};
    ///
    /// let response = Response::parse(b"HTTP/1.1 404 Not Found\r\n\r\n").unwrap();
    /// assert_eq!(response.status(), StatusCode::NotFound);
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let head_end = find(buffer, HEAD_TERMINATOR).ok_or(ParseError::Incomplete)?;
        let head = std::str::from_utf8(&buffer[..head_end])
            .map_err(|_| ParseError::InvalidEncoding)?;

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default();
        let status = Self::parse_status_line(status_line)?;
        let headers = parse_headers(lines)?;

        let available = &buffer[head_end + HEAD_TERMINATOR.len()..];
        let body_len = content_length(&headers)?.unwrap_or(available.len());
        if available.len() < body_len {
            return Err(ParseError::Incomplete);
        }

        Ok(Self {
            status,
            headers,
            body: available[..body_len].to_vec(),
        })
    }

    /// Formato: `HTTP/1.1 404 Not Found`
    fn parse_status_line(line: &str) -> Result<StatusCode, ParseError> {
        let invalid = || ParseError::InvalidStatusLine(line.to_string());

        let mut parts = line.splitn(3, ' ');
        let version = parts.next().ok_or_else(invalid)?;
        if !version.starts_with("HTTP/") {
            return Err(invalid());
        }

        let code: u16 = parts
            .next()
            .and_then(|code| code.parse().ok())
            .ok_or_else(invalid)?;

        Ok(StatusCode::try_from(code)?)
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
