//! # Handlers de archivos
//!
//! - GET /files/<name>: lee `<root>/<name>`
//! - POST /files/<name>: crea o sobrescribe `<root>/<name>` con el body
//!
//! Nombres inválidos responden 400; fallos del sistema de archivos, 500.

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;
use crate::store::FileStore;

/// Handler para GET /files/<name>
pub fn read_file_handler(_req: &Request, ctx: &RouteContext) -> Response {
    let name = ctx.tail;
    if !FileStore::is_valid_name(name) {
        return Response::new(StatusCode::BadRequest);
    }

    match ctx.store.read(name) {
        Ok(Some(data)) => {
            debug!("Leído {} ({} bytes)", name, data.len());
            Response::octet_stream(data)
        }
        Ok(None) => Response::new(StatusCode::NotFound),
        Err(e) => {
            warn!("No se pudo leer {}: {}", name, e);
            Response::new(StatusCode::InternalServerError)
        }
    }
}

/// Handler para POST /files/<name>
pub fn write_file_handler(req: &Request, ctx: &RouteContext) -> Response {
    let name = ctx.tail;
    if !FileStore::is_valid_name(name) {
        return Response::new(StatusCode::BadRequest);
    }

    match ctx.store.write(name, req.body()) {
        Ok(()) => {
            debug!("Escrito {} ({} bytes)", name, req.body().len());
            Response::new(StatusCode::Created)
        }
        Err(e) => {
            warn!("No se pudo escribir {}: {}", name, e);
            Response::new(StatusCode::InternalServerError)
        }
    }
}
