//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes
//! 3. Lee y parsea requests HTTP
//! 4. Genera y envía responses HTTP
//!
//! Cada conexión corre en su propio thread, sin límite de threads vivos.

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{Connection, ConnectionSettings};
pub use tcp::Server;
