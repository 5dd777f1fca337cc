//! # HTTP/1.1 Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado directamente sobre sockets TCP,
//! sin librerías HTTP, para mostrar el manejo del protocolo a nivel de
//! bytes: framing de cabeceras, negociación de contenido y transferencia
//! binaria de archivos.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y serialización del protocolo, compresión gzip
//! - `router`: Enrutamiento de (método, path) a handlers
//! - `handlers`: Rutas `/`, `/echo`, `/user-agent` y `/files`
//! - `store`: Lectura/escritura en el directorio configurado
//! - `server`: Accept loop y ciclo de vida de cada conexión
//! - `config`, `logger`, `error`: CLI, logging y tipos de error
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http11_server::config::Config;
//! use http11_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config).expect("Error al abrir el directorio");
//! server.run().expect("Error al iniciar servidor");
//! ```

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod logger;
pub mod router;
pub mod server;
pub mod store;
