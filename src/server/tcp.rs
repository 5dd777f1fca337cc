//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread; el loop de accept nunca espera a que terminen.

use super::connection::{Connection, ConnectionSettings};
use crate::config::Config;
use crate::error::Result;
use crate::router::Router;
use crate::store::FileStore;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor y abre el File Store en `config.directory`
    pub fn new(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.directory)?;
        let router = Router::with_default_routes(store);

        Ok(Self {
            config,
            router: Arc::new(router),
            listener: None,
        })
    }

    /// Hace bind del socket y retorna la dirección real
    ///
    /// Con puerto 0 el sistema elige un puerto libre. `run` usa este
    /// socket en vez de abrir otro.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        let listener = self.open_listener()?;
        let addr = listener.local_addr()?;

        self.listener = Some(listener);
        Ok(addr)
    }

    fn open_listener(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(self.config.address())?;
        info!("Servidor escuchando en {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Acepta conexiones para siempre, un thread por conexión
    pub fn run(&mut self) -> Result<()> {
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => self.open_listener()?,
        };

        info!("Modo concurrente: un thread por conexión");
        let settings = ConnectionSettings {
            keep_alive: self.config.keep_alive,
            max_request_bytes: self.config.max_request_bytes,
        };

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => Self::spawn_connection(stream, Arc::clone(&self.router), settings),
                Err(e) => error!("Error al aceptar conexión: {}", e),
            }
        }

        Ok(())
    }

    /// Lanza el thread de una conexión; no se guarda el handle
    fn spawn_connection(stream: TcpStream, router: Arc<Router>, settings: ConnectionSettings) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        debug!("Nueva conexión desde {}", peer);

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || {
                if let Err(e) = Connection::new(stream, settings).handle(&router) {
                    error!("Error en conexión {}: {}", peer, e);
                }
            });

        if let Err(e) = spawned {
            error!("No se pudo crear el thread de la conexión: {}", e);
        }
    }
}
