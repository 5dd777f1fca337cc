//! # Handlers del Servidor
//!
//! Este módulo contiene la implementación de todas las rutas
//! que el servidor sabe responder.
//!
//! ## Categorías
//!
//! - **basic**: Rutas sin estado (`/`, `/echo/<value>`, `/user-agent`)
//! - **files**: Rutas respaldadas por el File Store (`/files/<name>`)
//!
//! Cada handler recibe el Request y un `RouteContext` y retorna una
//! Response; los errores se traducen a status codes, nunca se propagan.

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;
