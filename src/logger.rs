//! # Logging
//! src/logger.rs
//!
//! Inicializa `simplelog` sobre stderr con el nivel configurado.

use crate::config::Config;

use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

/// Inicializa el logger global una sola vez
pub fn init_logger(cfg: &Config) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        parse_level(&cfg.log_level),
        prepare_logger_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

/// Convierte el nivel de la CLI; niveles desconocidos caen a `info`
pub fn parse_level(level: &str) -> LevelFilter {
    match level.parse::<LevelFilter>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("Unsupported log level: {}, using `info`", level);
            LevelFilter::Info
        }
    }
}

fn prepare_logger_config() -> simplelog::Config {
    simplelog::ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Debug)
        .build()
}
