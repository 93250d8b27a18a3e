//! # Configuración del Servidor
//! src/config.rs
//!
//! La configuración tiene dos capas:
//!
//! 1. **CLI / variables de entorno** (`Config`): host, puerto y server
//!    root. Son los valores por defecto del proceso.
//! 2. **Archivo de configuración** (`ConfigFile`): un documento TOML en
//!    `<server-root>/backend/server.toml` con cero-o-una declaración de
//!    bind y cero-o-más rutas. Se lee una sola vez al arranque.
//!
//! El archivo nunca es fatal: si falta o no parsea, se loguea el error
//! y el servidor arranca con la tabla de rutas vacía y el bind que ya
//! tenía (sirve archivos por path literal).
//!
//! ## Formato del archivo
//!
//! ```toml
//! [bind]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [[route]]
//! path = "/"
//! public-file = "index.html"
//! ```

use crate::logger::Logger;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuración base del servidor (CLI y variables de entorno)
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP/1.1 concurrente de archivos estáticos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Host/IP en el que escucha (puede sobreescribirlo el archivo de configuración)
    #[arg(long, default_value = "0.0.0.0", env = "STATIC_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "STATIC_PORT")]
    pub port: u16,

    /// Directorio raíz del servidor (contiene backend/ y static/)
    #[arg(long = "server-root", default_value = ".", env = "SERVER_ROOT")]
    pub server_root: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Ruta del archivo de configuración: `<server-root>/backend/server.toml`
    pub fn config_file_path(&self) -> PathBuf {
        Path::new(&self.server_root).join("backend").join("server.toml")
    }

    /// Ruta del static root: `<server-root>/static`
    pub fn static_root(&self) -> PathBuf {
        Path::new(&self.server_root).join("static")
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("Port must be in range 1-65535".to_string());
        }
        Ok(())
    }

    /// Aplica la declaración de bind del archivo de configuración
    ///
    /// Si el archivo no trae bind, se conservan host y puerto actuales y
    /// se deja una advertencia en el log (no es un error).
    pub fn apply_bind(&mut self, bind: Option<&BindInfo>, logger: &Logger) {
        match bind {
            Some(info) => {
                self.host = info.host.clone();
                self.port = info.port;
                logger.info(&format!("Using host {}...", self.host));
                logger.info(&format!("Using port {}...", self.port));
            }
            None => {
                logger.warn("No bind information found in configuration! Using defaults...");
            }
        }
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:     {}", self.address());
        println!("   Server root: {}", self.server_root);
        println!("   Static root: {}", self.static_root().display());
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            server_root: ".".to_string(),
        }
    }
}

/// Par host/puerto declarado en el archivo de configuración
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindInfo {
    pub host: String,
    pub port: u16,
}

/// Mapeo de un path de request a un archivo del static root
///
/// La comparación del path es por igualdad exacta (sin wildcards) y
/// `public_file` es relativo al static root. Las rutas son inmutables
/// después de la carga.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Route {
    /// Path de la petición (ej: "/")
    pub path: String,

    /// Archivo a servir, relativo al static root (ej: "index.html")
    #[serde(rename = "public-file")]
    pub public_file: String,
}

/// Contenido parseado del archivo de configuración
///
/// El orden de las entradas `[[route]]` se preserva: la primera ruta
/// que coincida gana.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Declaración de bind (opcional)
    pub bind: Option<BindInfo>,

    /// Tabla de rutas en orden de declaración
    #[serde(default, rename = "route")]
    pub routes: Vec<Route>,
}

/// Errores al cargar el archivo de configuración
#[derive(Debug)]
pub enum ConfigFileError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFileError::Io(e) => write!(f, "IO error: {}", e),
            ConfigFileError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigFileError {}

impl ConfigFile {
    /// Parsea el contenido TOML del archivo de configuración
    pub fn parse_str(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(ConfigFileError::Parse)
    }

    /// Lee y parsea el archivo de configuración desde disco
    pub fn read(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(ConfigFileError::Io)?;
        Self::parse_str(&content)
    }

    /// Carga el archivo de configuración, degradando a valores por defecto
    ///
    /// Archivo ausente o no parseable: se reporta en el log y se retorna
    /// una tabla de rutas vacía sin bind. El servidor sigue arrancando.
    pub fn load(path: &Path, logger: &Logger) -> Self {
        match Self::read(path) {
            Ok(file) => {
                logger.info(&format!(
                    "Loaded {} routes from configuration.",
                    file.routes.len()
                ));
                file
            }
            Err(e) => {
                logger.error(&format!(
                    "Error reading configuration {}: {}",
                    path.display(),
                    e
                ));
                ConfigFile::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Config base ====================

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.server_root, ".");
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_paths_derive_from_server_root() {
        let mut config = Config::default();
        config.server_root = "/srv/web".to_string();
        assert_eq!(
            config.config_file_path(),
            PathBuf::from("/srv/web/backend/server.toml")
        );
        assert_eq!(config.static_root(), PathBuf::from("/srv/web/static"));
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let mut config = Config::default();
        config.port = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Port"));
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Host"));
    }

    // ==================== Bind del archivo ====================

    #[test]
    fn test_apply_bind_overrides_defaults() {
        let mut config = Config::default();
        let logger = Logger::new("test");
        let bind = BindInfo {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };

        config.apply_bind(Some(&bind), &logger);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_apply_bind_none_keeps_defaults() {
        let mut config = Config::default();
        let logger = Logger::new("test");

        config.apply_bind(None, &logger);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    // ==================== Archivo de configuración ====================

    #[test]
    fn test_parse_full_config_file() {
        let content = r#"
            [bind]
            host = "127.0.0.1"
            port = 9090

            [[route]]
            path = "/"
            public-file = "index.html"

            [[route]]
            path = "/about"
            public-file = "about.html"
        "#;

        let file = ConfigFile::parse_str(content).unwrap();
        assert_eq!(
            file.bind,
            Some(BindInfo {
                host: "127.0.0.1".to_string(),
                port: 9090
            })
        );
        assert_eq!(file.routes.len(), 2);
        assert_eq!(file.routes[0].path, "/");
        assert_eq!(file.routes[0].public_file, "index.html");
        assert_eq!(file.routes[1].path, "/about");
    }

    #[test]
    fn test_parse_preserves_route_order() {
        // Dos rutas con el mismo path: el orden de declaración decide
        let content = r#"
            [[route]]
            path = "/x"
            public-file = "first.html"

            [[route]]
            path = "/x"
            public-file = "second.html"
        "#;

        let file = ConfigFile::parse_str(content).unwrap();
        assert_eq!(file.routes[0].public_file, "first.html");
        assert_eq!(file.routes[1].public_file, "second.html");
    }

    #[test]
    fn test_parse_without_bind() {
        let content = r#"
            [[route]]
            path = "/"
            public-file = "index.html"
        "#;

        let file = ConfigFile::parse_str(content).unwrap();
        assert!(file.bind.is_none());
        assert_eq!(file.routes.len(), 1);
    }

    #[test]
    fn test_parse_empty_file() {
        let file = ConfigFile::parse_str("").unwrap();
        assert!(file.bind.is_none());
        assert!(file.routes.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = ConfigFile::parse_str("[[route]\npath = ");
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let logger = Logger::new("test");
        let file = ConfigFile::load(Path::new("/nonexistent/server.toml"), &logger);
        assert!(file.bind.is_none());
        assert!(file.routes.is_empty());
    }

    #[test]
    fn test_config_file_error_display() {
        let err = ConfigFile::parse_str("not = [valid").unwrap_err();
        assert!(err.to_string().starts_with("Parse error:"));
    }
}
