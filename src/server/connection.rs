//! # Conexión
//! src/server/connection.rs
//!
//! Ciclo de vida de una conexión aceptada:
//!
//! ```text
//! ACCEPTED → READING → DISPATCHED → RESPONDING → (READING | CLOSED)
//! ```
//!
//! En modo un-request-por-conexión se cierra después de responder; en
//! modo keep-alive se vuelve a leer del mismo socket. Los bytes que
//! sobran de un request quedan en el buffer para el siguiente.

use crate::error::{Result, ServerError};
use crate::http::{ParseError, Request, RequestParser, Response, StatusCode};
use crate::router::Router;
use log::Level;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Instant;

/// Tamaño de cada lectura del socket
const READ_CHUNK: usize = 1024;

/// Parámetros de una conexión, copiados desde `Config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Leer más requests del mismo socket después de responder
    pub keep_alive: bool,

    /// Máximo de bytes en el buffer para un solo request
    pub max_request_bytes: usize,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            keep_alive: false,
            max_request_bytes: 1024 * 1024,
        }
    }
}

/// Nivel de log para una response según su código
fn log_level(status: StatusCode) -> Level {
    if status.is_success() {
        Level::Info
    } else if status.is_client_error() {
        Level::Warn
    } else {
        Level::Error
    }
}

/// Una conexión TCP aceptada y su buffer de lectura
pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    parser: RequestParser,
    settings: ConnectionSettings,
    peer: String,
}

impl Connection {
    pub fn new(stream: TcpStream, settings: ConnectionSettings) -> Self {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            stream,
            buffer: Vec::with_capacity(READ_CHUNK),
            parser: RequestParser::new(),
            settings,
            peer,
        }
    }

    /// Atiende la conexión hasta cerrarla
    ///
    /// Retorna `Ok(())` cuando el cliente cierra o cuando termina el único
    /// intercambio en modo sin keep-alive. Cualquier error cierra el socket.
    pub fn handle(mut self, router: &Router) -> Result<()> {
        loop {
            let request = match self.read_request()? {
                Some(request) => request,
                None => {
                    debug!("Conexión cerrada por {}", self.peer);
                    return Ok(());
                }
            };

            let start = Instant::now();
            let response = router
                .route(&request)
                .finalize(request.header("Accept-Encoding"))?;

            self.stream.write_all(&response.to_bytes())?;
            self.stream.flush()?;

            log!(
                log_level(response.status()),
                "{} {} {} -> {} ({:.2}ms)",
                self.peer,
                request.method().as_str(),
                request.path(),
                response.status(),
                start.elapsed().as_secs_f64() * 1000.0
            );

            if !self.settings.keep_alive {
                return Ok(());
            }
        }
    }

    /// Lee hasta tener un request completo
    ///
    /// * `Ok(Some(request))` - Request listo para despachar
    /// * `Ok(None)` - El cliente cerró, o solo mandó espacios sin keep-alive
    /// * `Err(_)` - Error de socket o request inválido (ya se respondió 400)
    fn read_request(&mut self) -> Result<Option<Request>> {
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            // Ignorar líneas vacías antes de la request line
            let leading = self
                .buffer
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count();

            if leading > 0 && leading == self.buffer.len() {
                self.buffer.clear();
                if !self.settings.keep_alive {
                    return Ok(None);
                }
            } else if !self.buffer.is_empty() {
                self.buffer.drain(..leading);

                match self.parser.advance(&self.buffer) {
                    Ok(Some((request, consumed))) => {
                        self.buffer.drain(..consumed);
                        return Ok(Some(request));
                    }
                    Ok(None) => {}
                    Err(e) => return Err(self.reject(e.into())),
                }
            }

            let limit = self.settings.max_request_bytes;
            if self.buffer.len() >= limit {
                return Err(self.reject(ServerError::RequestTooLarge(limit)));
            }

            let bytes_read = self.stream.read(&mut chunk)?;
            if bytes_read == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                // El cliente cerró a mitad de un request
                return Err(self.reject(ParseError::Incomplete.into()));
            }

            debug!("{} bytes desde {}", bytes_read, self.peer);
            self.buffer.extend_from_slice(&chunk[..bytes_read]);
        }
    }

    /// Responde 400 (mejor esfuerzo) antes de cerrar por un request inválido
    fn reject(&mut self, error: ServerError) -> ServerError {
        warn!("Request inválido desde {}: {}", self.peer, error);

        let bytes = Response::new(StatusCode::BadRequest).to_bytes();
        if let Err(e) = self.stream.write_all(&bytes).and_then(|_| self.stream.flush()) {
            debug!("No se pudo enviar 400 a {}: {}", self.peer, e);
        }

        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;
    use std::net::{Shutdown, TcpListener};
    use std::thread;
    use tempfile::TempDir;

    /// Atiende una sola conexión en un thread y retorna lo que recibió el cliente
    fn exchange(settings: ConnectionSettings, payload: &[u8]) -> (String, bool) {
        let dir = TempDir::new().unwrap();
        let router = Router::with_default_routes(FileStore::open(dir.path()).unwrap());
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            Connection::new(stream, settings).handle(&router).is_ok()
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(payload).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        let ok = server.join().unwrap();

        (String::from_utf8_lossy(&buf).into_owned(), ok)
    }

    fn keep_alive() -> ConnectionSettings {
        ConnectionSettings {
            keep_alive: true,
            ..ConnectionSettings::default()
        }
    }

    #[test]
    fn test_single_shot_root() {
        let (text, ok) = exchange(ConnectionSettings::default(), b"GET / HTTP/1.1\r\n\r\n");

        assert!(ok);
        assert_eq!(text, "HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_single_shot_answers_only_first_request() {
        let (text, ok) = exchange(
            ConnectionSettings::default(),
            b"GET /echo/abc HTTP/1.1\r\nContent-Length: 0\r\n\r\nGET /echo/xyz HTTP/1.1\r\n\r\n",
        );

        assert!(ok);
        assert_eq!(text.matches("HTTP/1.1 200 OK").count(), 1);
        assert!(text.ends_with("\r\n\r\nabc"));
    }

    #[test]
    fn test_keep_alive_pipelined_requests() {
        let (text, ok) = exchange(
            keep_alive(),
            b"GET /echo/abc HTTP/1.1\r\nContent-Length: 0\r\n\r\nGET /echo/xyz HTTP/1.1\r\nContent-Length: 0\r\n\r\n",
        );

        assert!(ok);
        assert_eq!(text.matches("HTTP/1.1 200 OK").count(), 2);
        assert!(text.contains("\r\n\r\nabcHTTP/1.1 200 OK"));
        assert!(text.ends_with("\r\n\r\nxyz"));
    }

    #[test]
    fn test_keep_alive_pipelined_without_content_length() {
        let (text, ok) = exchange(
            keep_alive(),
            b"GET /echo/abc HTTP/1.1\r\n\r\nGET /echo/xyz HTTP/1.1\r\n\r\n",
        );

        assert!(ok);
        assert_eq!(text.matches("HTTP/1.1 200 OK").count(), 2);
        assert!(text.contains("\r\n\r\nabcHTTP/1.1 200 OK"));
        assert!(text.ends_with("\r\n\r\nxyz"));
    }

    #[test]
    fn test_keep_alive_post_then_get_in_one_write() {
        let (text, ok) = exchange(
            keep_alive(),
            b"POST /files/n HTTP/1.1\r\nContent-Length: 2\r\n\r\nhiGET /files/n HTTP/1.1\r\n\r\n",
        );

        assert!(ok);
        assert!(text.starts_with("HTTP/1.1 201 Created\r\n\r\n"));
        assert!(text.ends_with("\r\n\r\nhi"));
    }

    #[test]
    fn test_head_spanning_several_reads() {
        let mut payload = b"GET /user-agent HTTP/1.1\r\nUser-Agent: ".to_vec();
        payload.extend(std::iter::repeat(b'u').take(READ_CHUNK * 2));
        payload.extend_from_slice(b"\r\n\r\n");

        let (text, ok) = exchange(ConnectionSettings::default(), &payload);

        assert!(ok);
        assert!(text.starts_with("HTTP/1.1 200 OK"));
        assert!(text.ends_with(&"u".repeat(READ_CHUNK * 2)));
    }

    #[test]
    fn test_log_level_by_status() {
        assert_eq!(log_level(StatusCode::Ok), Level::Info);
        assert_eq!(log_level(StatusCode::Created), Level::Info);
        assert_eq!(log_level(StatusCode::NotFound), Level::Warn);
        assert_eq!(log_level(StatusCode::MethodNotAllowed), Level::Warn);
        assert_eq!(log_level(StatusCode::InternalServerError), Level::Error);
    }

    #[test]
    fn test_keep_alive_skips_blank_lines() {
        let (text, ok) = exchange(keep_alive(), b"\r\n\r\nGET / HTTP/1.1\r\n\r\n\r\n");

        assert!(ok);
        assert_eq!(text, "HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_whitespace_only_closes_single_shot() {
        let (text, ok) = exchange(ConnectionSettings::default(), b"  \r\n");

        assert!(ok);
        assert!(text.is_empty());
    }

    #[test]
    fn test_parse_error_gets_400() {
        let (text, ok) = exchange(ConnectionSettings::default(), b"GARBAGE\r\n\r\n");

        assert!(!ok);
        assert_eq!(text, "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[test]
    fn test_truncated_request_gets_400() {
        let (text, ok) = exchange(
            ConnectionSettings::default(),
            b"POST /files/x HTTP/1.1\r\nContent-Length: 100\r\n\r\nshort",
        );

        assert!(!ok);
        assert!(text.starts_with("HTTP/1.1 400 Bad Request"));
    }

    #[test]
    fn test_request_too_large() {
        let settings = ConnectionSettings {
            keep_alive: false,
            max_request_bytes: 16,
        };
        let (text, ok) = exchange(settings, b"GET /echo/aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

        assert!(!ok);
        assert!(text.starts_with("HTTP/1.1 400 Bad Request"));
    }

    #[test]
    fn test_body_spanning_several_reads() {
        let body = vec![b'z'; READ_CHUNK * 3 + 7];
        let mut payload = format!("POST /files/big HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes();
        payload.extend_from_slice(&body);

        let (text, ok) = exchange(ConnectionSettings::default(), &payload);

        assert!(ok);
        assert_eq!(text, "HTTP/1.1 201 Created\r\n\r\n");
    }

    #[test]
    fn test_peer_closed_immediately() {
        let dir = TempDir::new().unwrap();
        let router = Router::with_default_routes(FileStore::open(dir.path()).unwrap());
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            // No se envía nada desde el peer: el read retorna 0
            Connection::new(stream, ConnectionSettings::default()).handle(&router).is_ok()
        });

        drop(TcpStream::connect(addr).unwrap());

        assert!(server.join().unwrap());
    }
}
