//! # Handlers básicos
//!
//! - `/`: saludo vacío
//! - `/echo/<value>`: devuelve `<value>` tal cual
//! - `/user-agent`: refleja el header `User-Agent`

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;

/// Handler para GET /
///
/// 200 OK sin body.
pub fn root_handler(_req: &Request, _ctx: &RouteContext) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para GET /echo/<value>
///
/// El body es todo lo que sigue al prefijo, sin decodificar.
pub fn echo_handler(_req: &Request, ctx: &RouteContext) -> Response {
    Response::text(ctx.tail)
}

/// Handler para GET /user-agent
///
/// Sin header `User-Agent` el body queda vacío.
pub fn user_agent_handler(req: &Request, _ctx: &RouteContext) -> Response {
    Response::text(req.header("User-Agent").unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;
    use tempfile::TempDir;

    fn with_context<F: FnOnce(&RouteContext)>(tail: &str, f: F) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        f(&RouteContext { tail, store: &store });
    }

    #[test]
    fn test_root_handler() {
        let req = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        with_context("", |ctx| {
            let response = root_handler(&req, ctx);
            assert_eq!(response.status(), StatusCode::Ok);
            assert!(response.body().is_empty());
        });
    }

    #[test]
    fn test_echo_handler() {
        let req = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
        with_context("abc", |ctx| {
            let response = echo_handler(&req, ctx);
            assert_eq!(response.status(), StatusCode::Ok);
            assert_eq!(response.body(), b"abc");
        });
    }

    #[test]
    fn test_user_agent_handler() {
        let req = Request::parse(b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-agent/1.0\r\n\r\n")
            .unwrap();
        with_context("", |ctx| {
            let response = user_agent_handler(&req, ctx);
            assert_eq!(response.body(), b"test-agent/1.0");
        });
    }

    #[test]
    fn test_user_agent_handler_missing_header() {
        let req = Request::parse(b"GET /user-agent HTTP/1.1\r\n\r\n").unwrap();
        with_context("", |ctx| {
            let response = user_agent_handler(&req, ctx);
            assert_eq!(response.status(), StatusCode::Ok);
            assert!(response.body().is_empty());
        });
    }
}
