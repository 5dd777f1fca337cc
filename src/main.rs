//! # HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.

#[macro_use]
extern crate log;

use http11_server::config::Config;
use http11_server::logger;
use http11_server::server::Server;

fn main() {
    // Crear configuración desde CLI / env
    let config = Config::new();

    if let Err(e) = logger::init_logger(&config) {
        eprintln!("No se pudo inicializar el logger: {}", e);
    }

    if let Err(e) = config.validate() {
        error!("Configuración inválida: {}", e);
        std::process::exit(1);
    }

    info!("HTTP/1.1 Server");
    config.log_summary();

    // Crear el servidor
    let mut server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
