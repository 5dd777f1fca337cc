//! # Codificación de Contenido
//! src/http/encoding.rs
//!
//! Negociación de `Accept-Encoding` y compresión del body.
//! Por ahora el único esquema soportado es gzip.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Esquemas de compresión que el servidor sabe aplicar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Lista de esquemas permitidos, en el orden en que se prueban
    const ALLOWED: [ContentEncoding; 1] = [ContentEncoding::Gzip];

    /// Token usado en `Accept-Encoding` / `Content-Encoding`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALLOWED
            .into_iter()
            .find(|encoding| encoding.as_str() == token)
    }

    /// Elige el primer token de `Accept-Encoding` que esté permitido
    ///
    /// El header es una lista separada por comas; cada token se recorta.
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::ContentEncoding;
    ///
    /// assert_eq!(ContentEncoding::negotiate("br, gzip"), Some(ContentEncoding::Gzip));
    /// assert_eq!(ContentEncoding::negotiate("deflate"), None);
    /// ```
    pub fn negotiate(accept_encoding: &str) -> Option<Self> {
        accept_encoding
            .split(',')
            .map(str::trim)
            .find_map(Self::from_token)
    }

    /// Comprime el body con este esquema
    pub fn encode(&self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(body)?;
                encoder.finish()
            }
        }
    }
}
