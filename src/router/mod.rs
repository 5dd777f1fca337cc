//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea (método, path) a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las rutas se evalúan en orden de registro y gana la primera que
//! coincide. El matching es igualdad o prefijo sobre el path sin
//! decodificar. Si nada coincide: 405 para métodos distintos de GET/POST,
//! 404 para el resto.

use crate::handlers;
use crate::http::{Method, Request, Response, StatusCode};
use crate::store::FileStore;

/// Datos que recibe un handler además del request
pub struct RouteContext<'a> {
    /// Resto del path después del prefijo de la ruta ("" en rutas exactas)
    pub tail: &'a str,

    /// File Store configurado al arrancar
    pub store: &'a FileStore,
}

/// Tipo de función handler
///
/// Un handler recibe un Request y su contexto y retorna una Response
pub type Handler = fn(&Request, &RouteContext) -> Response;

/// Forma de comparar el path de una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// El path debe ser exactamente igual
    Exact(String),

    /// El path debe empezar con el prefijo; el resto va a `RouteContext::tail`
    Prefix(String),
}

impl PathPattern {
    /// Retorna el resto del path si coincide
    fn matches<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self {
            PathPattern::Exact(expected) => (path == expected.as_str()).then_some(""),
            PathPattern::Prefix(prefix) => path.strip_prefix(prefix.as_str()),
        }
    }
}

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
}

/// Router que mapea (método, path) a handlers
pub struct Router {
    /// Rutas en orden de precedencia
    routes: Vec<Route>,

    /// Directorio de `/files/*`, inyectado al construir
    store: FileStore,
}

impl Router {
    /// Crea un router vacío sobre el File Store dado
    pub fn new(store: FileStore) -> Self {
        Self {
            routes: Vec::new(),
            store,
        }
    }

    /// Crea el router con la tabla completa del servidor
    ///
    /// | Método | Path | Handler |
    /// |---|---|---|
    /// | GET | `/` | saludo vacío |
    /// | GET | `/echo/<value>` | eco |
    /// | GET | `/files/<name>` | lectura de archivo |
    /// | GET | `/user-agent` | header `User-Agent` |
    /// | POST | `/files/<name>` | escritura de archivo |
    pub fn with_default_routes(store: FileStore) -> Self {
        let mut router = Self::new(store);

        router.register(Method::GET, PathPattern::Exact("/".into()), handlers::root_handler);
        router.register(Method::GET, PathPattern::Prefix("/echo/".into()), handlers::echo_handler);
        router.register(Method::GET, PathPattern::Prefix("/files/".into()), handlers::read_file_handler);
        router.register(Method::GET, PathPattern::Exact("/user-agent".into()), handlers::user_agent_handler);
        router.register(Method::POST, PathPattern::Prefix("/files/".into()), handlers::write_file_handler);

        router
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::router::{PathPattern, RouteContext, Router};
    /// use http11_server::http::{Method, Request, Response};
    /// use http11_server::store::FileStore;
    ///
    /// fn hello_handler(_req: &Request, _ctx: &RouteContext) -> Response {
    ///     Response::text("hello")
    /// }
    ///
    /// let store = FileStore::open(std::env::temp_dir()).unwrap();
    /// let mut router = Router::new(store);
    /// router.register(Method::GET, PathPattern::Exact("/hello".into()), hello_handler);
    /// ```
    pub fn register(&mut self, method: Method, pattern: PathPattern, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request) -> Response {
        let path = request.path();

        for route in &self.routes {
            if &route.method != request.method() {
                continue;
            }
            if let Some(tail) = route.pattern.matches(path) {
                let ctx = RouteContext {
                    tail,
                    store: &self.store,
                };
                return (route.handler)(request, &ctx);
            }
        }

        match request.method() {
            Method::Other(_) => Response::new(StatusCode::MethodNotAllowed),
            Method::GET | Method::POST => Response::new(StatusCode::NotFound),
        }
    }
}
