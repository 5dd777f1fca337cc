//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http11_server --directory /tmp/files --keep-alive
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_DIRECTORY=/srv/files ./http11_server
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "http11_server")]
#[command(about = "Servidor HTTP/1.1 mínimo sobre sockets TCP")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio donde se guardan/leen los archivos de /files/*
    #[arg(long, default_value_os_t = std::env::temp_dir(), env = "HTTP_DIRECTORY")]
    pub directory: PathBuf,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Mantener la conexión abierta y leer más requests del mismo socket
    #[arg(long = "keep-alive", env = "HTTP_KEEP_ALIVE")]
    pub keep_alive: bool,

    /// Máximo de bytes que se aceptan por request (cabecera + body)
    #[arg(long = "max-request-bytes", default_value = "1048576", env = "HTTP_MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Nivel de log (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info", env = "HTTP_LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http11_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        if self.max_request_bytes == 0 {
            return Err("Max request bytes must be >= 1".to_string());
        }

        if self.directory.as_os_str().is_empty() {
            return Err("Directory must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!("Configuración:");
        info!("   Address:      {}", self.address());
        info!("   Directory:    {}", self.directory.display());
        info!(
            "   Conexiones:   {}",
            if self.keep_alive { "keep-alive" } else { "un request por conexión" }
        );
        info!("   Max request:  {} bytes", self.max_request_bytes);
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir(),
            port: 4221,
            host: "127.0.0.1".to_string(),
            keep_alive: false,
            max_request_bytes: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.directory, std::env::temp_dir());
        assert!(!config.keep_alive);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Host"));
    }

    #[test]
    fn test_validate_zero_max_request() {
        let mut config = Config::default();
        config.max_request_bytes = 0;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Max request bytes"));
    }

    #[test]
    fn test_validate_empty_directory() {
        let mut config = Config::default();
        config.directory = PathBuf::new();
        assert!(config.validate().is_err());
    }

    // ==================== CLI ====================

    #[test]
    fn test_parse_directory_flag() {
        let config = Config::try_parse_from(["http11_server", "--directory", "/srv/files"]).unwrap();
        assert_eq!(config.directory, PathBuf::from("/srv/files"));
        assert_eq!(config.port, 4221);
    }

    #[test]
    fn test_parse_all_flags() {
        let config = Config::try_parse_from([
            "http11_server",
            "--directory",
            "/data",
            "--port",
            "8080",
            "--host",
            "0.0.0.0",
            "--keep-alive",
            "--max-request-bytes",
            "4096",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.keep_alive);
        assert_eq!(config.max_request_bytes, 4096);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(Config::try_parse_from(["http11_server", "--workers", "4"]).is_err());
    }
}
