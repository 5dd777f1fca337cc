//! # File Store
//! src/store.rs
//!
//! Frontera de lectura/escritura hacia el directorio configurado.
//! Sirve a las rutas `/files/<name>`.
//!
//! No hay locks: dos escrituras concurrentes al mismo nombre compiten a
//! nivel del sistema de archivos y gana la última.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Directorio raíz de los archivos servidos
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Crea el store; crea el directorio si no existe
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directorio raíz
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Valida un nombre de archivo (seguridad básica)
    ///
    /// El nombre no puede ser vacío ni salir del directorio raíz.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
    }

    /// Lee un archivo completo
    ///
    /// Retorna `Ok(None)` si el archivo no existe.
    pub fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_of(name)?) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Crea o sobrescribe un archivo con los bytes dados
    pub fn write(&self, name: &str, data: &[u8]) -> io::Result<()> {
        fs::write(self.path_of(name)?, data)
    }

    fn path_of(&self, name: &str) -> io::Result<PathBuf> {
        if !Self::is_valid_name(name) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid filename: {}", name),
            ));
        }
        Ok(self.root.join(name))
    }
}
