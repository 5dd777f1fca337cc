//! # Errores del Servidor
//! src/error.rs
//!
//! Errores que terminan una conexión. Nunca terminan el proceso: el
//! thread de la conexión los registra y cierra el socket.

use crate::http::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Error de socket o de compresión
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// El request no se pudo parsear
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// El request superó el límite de bytes configurado
    #[error("Request exceeds {0} bytes")]
    RequestTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, ServerError>;
