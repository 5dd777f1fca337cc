//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, sobre bytes.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: bytes crudos; su largo lo fija `Content-Length`
//!
//! La cabecera termina en la primera línea vacía. El body nunca se busca
//! por patrones de líneas vacías, así que puede contener `\r\n\r\n` o
//! bytes que no son UTF-8. Sin `Content-Length` el body es vacío.

use super::status::InvalidStatusCode;
use std::collections::HashMap;
use thiserror::Error;

/// Separador entre la cabecera y el body
pub(crate) const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP
///
/// Solo GET y POST tienen rutas; cualquier otro token se conserva para
/// que el router responda 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro método (PUT, DELETE, ...)
    Other(String),
}

impl Method {
    /// Convierte el token de la request line en un método
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path de la petición, sin decodificar (ej: "/echo/abc")
    path: String,

    /// Versión HTTP; se guarda pero no se valida
    version: String,

    /// Headers HTTP, sensibles a mayúsculas. El último repetido gana.
    headers: HashMap<String, String>,

    /// Body del request
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Mensaje incompleto o truncado
    #[error("Incomplete HTTP message")]
    Incomplete,

    /// La cabecera no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// Formato inválido de la request line
    #[error("Invalid request line: {0}")]
    InvalidRequestLine(String),

    /// El path no empieza con '/'
    #[error("Invalid request path: {0}")]
    InvalidPath(String),

    /// Header malformado
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Content-Length no numérico
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// Status line de una response malformada
    #[error("Invalid status line: {0}")]
    InvalidStatusLine(String),

    /// Código de estado fuera del conjunto soportado
    #[error(transparent)]
    UnsupportedStatus(#[from] InvalidStatusCode),

    /// Request vacío o solo espacios
    #[error("Empty request")]
    EmptyRequest,
}

/// Cabecera ya parseada de un request cuyo body puede no haber llegado
#[derive(Debug)]
struct Head {
    method: Method,
    path: String,
    version: String,
    headers: HashMap<String, String>,
    body_start: usize,
    body_len: usize,
}

/// Parser incremental sobre un buffer que solo crece
///
/// Recuerda hasta dónde buscó el fin de la cabecera y, una vez
/// encontrada, no la vuelve a parsear: cada lectura nueva solo revisa
/// los bytes agregados. Después de entregar un request vuelve a su
/// estado inicial; el llamador debe descartar los bytes consumidos.
#[derive(Debug, Default)]
pub struct RequestParser {
    /// Bytes del buffer ya revisados en busca de `\r\n\r\n`
    scanned: usize,

    /// La request line ya se validó
    line_checked: bool,

    /// Cabecera completa, esperando el body
    head: Option<Head>,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Avanza con el contenido actual del buffer
    ///
    /// # Retorna
    ///
    /// * `Ok(Some((request, consumed)))` - Request completo y cuántos bytes ocupó
    /// * `Ok(None)` - Faltan bytes (cabecera o body incompletos)
    /// * `Err(ParseError)` - El request es inválido
    ///
    /// Sin `Content-Length` el body es vacío; los bytes siguientes quedan
    /// para el próximo request.
    pub fn advance(&mut self, buffer: &[u8]) -> Result<Option<(Request, usize)>, ParseError> {
        let head = match self.head.take() {
            Some(head) => head,
            None => match self.scan_head(buffer)? {
                Some(head) => head,
                None => return Ok(None),
            },
        };

        let end = head.body_start.saturating_add(head.body_len);
        if buffer.len() < end {
            self.head = Some(head);
            return Ok(None);
        }

        *self = Self::default();

        let request = Request {
            method: head.method,
            path: head.path,
            version: head.version,
            headers: head.headers,
            body: buffer[head.body_start..end].to_vec(),
        };

        Ok(Some((request, end)))
    }

    /// Busca el fin de la cabecera solo en los bytes nuevos
    fn scan_head(&mut self, buffer: &[u8]) -> Result<Option<Head>, ParseError> {
        if self.scanned == 0 && buffer.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyRequest);
        }

        // El terminador puede haber quedado partido entre dos lecturas
        let from = self.scanned.min(buffer.len()).saturating_sub(HEAD_TERMINATOR.len() - 1);
        let head_end = match find(&buffer[from..], HEAD_TERMINATOR) {
            Some(pos) => from + pos,
            None => {
                // Si la request line ya llegó completa, validarla de inmediato
                if !self.line_checked {
                    let line_from = self.scanned.min(buffer.len()).saturating_sub(1);
                    if let Some(pos) = find(&buffer[line_from..], b"\r\n") {
                        let line = std::str::from_utf8(&buffer[..line_from + pos])
                            .map_err(|_| ParseError::InvalidEncoding)?;
                        Request::parse_request_line(line)?;
                        self.line_checked = true;
                    }
                }
                self.scanned = buffer.len();
                return Ok(None);
            }
        };

        let head = std::str::from_utf8(&buffer[..head_end])
            .map_err(|_| ParseError::InvalidEncoding)?;

        // 1. Request line (primera línea)
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let (method, path, version) = Request::parse_request_line(request_line)?;

        // 2. Headers (resto de la cabecera)
        let headers = parse_headers(lines)?;

        // 3. Largo del body
        let body_len = content_length(&headers)?.unwrap_or(0);

        Ok(Some(Head {
            method,
            path,
            version,
            headers,
            body_start: head_end + HEAD_TERMINATOR.len(),
            body_len,
        }))
    }
}

impl Request {
    /// Parsea un request HTTP completo desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http11_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl/8.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl/8.0"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        match Self::parse_prefix(buffer)? {
            Some((request, _)) => Ok(request),
            None => Err(ParseError::Incomplete),
        }
    }

    /// Intenta parsear un request desde el inicio del buffer
    ///
    /// Equivale a un `RequestParser` nuevo; para lecturas sucesivas sobre
    /// el mismo buffer conviene conservar el parser.
    pub fn parse_prefix(buffer: &[u8]) -> Result<Option<(Self, usize)>, ParseError> {
        RequestParser::new().advance(buffer)
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        let path = parts[1];
        if !path.starts_with('/') {
            return Err(ParseError::InvalidPath(path.to_string()));
        }

        Ok((
            Method::from_token(parts[0]),
            path.to_string(),
            parts[2].to_string(),
        ))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP tal como llegó
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (el nombre es sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Parsea las líneas de headers de una cabecera
///
/// Cada header tiene formato: "Name: Value", separado en el primer ": "
pub(crate) fn parse_headers<'a>(
    lines: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, String>, ParseError> {
    let mut headers = HashMap::new();

    for line in lines {
        match line.split_once(": ") {
            Some((name, value)) => {
                headers.insert(name.to_string(), value.to_string());
            }
            None => return Err(ParseError::InvalidHeader(line.to_string())),
        }
    }

    Ok(headers)
}

/// Lee `Content-Length` si está presente
pub(crate) fn content_length(headers: &HashMap<String, String>) -> Result<Option<usize>, ParseError> {
    match headers.get("Content-Length") {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ParseError::InvalidContentLength(value.clone())),
        None => Ok(None),
    }
}

/// Posición de la primera ocurrencia de `needle` en `haystack`
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
