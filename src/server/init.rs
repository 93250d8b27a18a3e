//! # Inicialización de Primer Arranque
//! src/server/init.rs
//!
//! Garantiza el layout en disco antes de que arranque el servidor:
//!
//! ```text
//! <server-root>/
//! ├── backend/server.toml   (configuración por defecto si no existe)
//! ├── static/index.html     (página por defecto si no existe)
//! └── server.state          (marcador de inicialización)
//! ```
//!
//! El marcador `server.state` contiene `already-initialized=true`; si
//! está presente con ese valor la inicialización se salta por completo.
//! Escribir `already-initialized=false` fuerza una re-inicialización en
//! el siguiente arranque. Ningún fallo aquí es fatal: se loguea y el
//! servidor arranca igual.

use crate::config::Config;
use crate::logger::Logger;
use std::fs;
use std::path::Path;

/// Nombre del archivo marcador de inicialización
const STATE_FILE: &str = "server.state";

/// Configuración por defecto que se materializa en el primer arranque
const DEFAULT_CONFIG: &str = r#"# Configuración del servidor de archivos estáticos.
#
# [bind] es opcional: sin él, el servidor conserva el host y el puerto
# con los que arrancó el proceso.

[bind]
host = "0.0.0.0"
port = 8080

# Cada [[route]] mapea un path de request a un archivo dentro de static/.
# El orden importa: gana la primera coincidencia exacta.

[[route]]
path = "/"
public-file = "index.html"
"#;

/// Página por defecto para que una instalación fresca sirva algo
const DEFAULT_INDEX: &str = "<html><body><h1>It works!</h1></body></html>\n";

/// Inicializa el layout del servidor si aún no fue inicializado
pub fn first_run(config: &Config, logger: &Logger) {
    let server_root = Path::new(&config.server_root);

    if already_initialized(&server_root.join(STATE_FILE)) {
        return;
    }

    logger.info("Initializing server layout...");

    let backend_dir = server_root.join("backend");
    if let Err(e) = fs::create_dir_all(&backend_dir) {
        logger.error(&format!("Failed to create backend directory: {}", e));
    }

    let config_file = config.config_file_path();
    if !config_file.exists() {
        if let Err(e) = fs::write(&config_file, DEFAULT_CONFIG) {
            logger.error(&format!("Failed to write default configuration: {}", e));
        }
    }

    let static_dir = config.static_root();
    if let Err(e) = fs::create_dir_all(&static_dir) {
        logger.error(&format!("Failed to create static directory: {}", e));
    }

    let index_file = static_dir.join("index.html");
    if !index_file.exists() {
        if let Err(e) = fs::write(&index_file, DEFAULT_INDEX) {
            logger.error(&format!("Failed to write default index: {}", e));
        }
    }

    if let Err(e) = fs::write(server_root.join(STATE_FILE), "already-initialized=true") {
        logger.error(&format!("Failed to create state file: {}", e));
    }
}

/// Decide si el layout ya fue inicializado según el archivo de estado
///
/// Solo `already-initialized=false` en la primera línea fuerza una
/// re-inicialización; cualquier otro contenido cuenta como inicializado.
fn already_initialized(state_file: &Path) -> bool {
    let content = match fs::read_to_string(state_file) {
        Ok(content) => content,
        Err(_) => return false,
    };

    let first_line = content.lines().next().unwrap_or("");
    match first_line.split_once('=') {
        Some(("already-initialized", "false")) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_root() -> PathBuf {
        let unique = format!(
            "static_server_init_{}_{}",
            std::process::id(),
            DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let root = std::env::temp_dir().join(unique);
        fs::create_dir_all(&root).expect("create temp root");
        root
    }

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default();
        config.server_root = root.to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_first_run_creates_layout() {
        let root = temp_root();
        let config = config_for(&root);
        let logger = Logger::new("test");

        first_run(&config, &logger);

        assert!(root.join("backend").join("server.toml").exists());
        assert!(root.join("static").join("index.html").exists());
        assert_eq!(
            fs::read_to_string(root.join(STATE_FILE)).unwrap(),
            "already-initialized=true"
        );

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_default_config_is_valid_toml() {
        use crate::config::ConfigFile;

        let file = ConfigFile::parse_str(DEFAULT_CONFIG).unwrap();
        assert!(file.bind.is_some());
        assert_eq!(file.routes.len(), 1);
        assert_eq!(file.routes[0].path, "/");
        assert_eq!(file.routes[0].public_file, "index.html");
    }

    #[test]
    fn test_initialized_marker_skips_init() {
        let root = temp_root();
        let config = config_for(&root);
        let logger = Logger::new("test");

        fs::write(root.join(STATE_FILE), "already-initialized=true").unwrap();
        first_run(&config, &logger);

        // Nada del layout se creó
        assert!(!root.join("backend").exists());
        assert!(!root.join("static").exists());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_false_marker_forces_reinit() {
        let root = temp_root();
        let config = config_for(&root);
        let logger = Logger::new("test");

        fs::write(root.join(STATE_FILE), "already-initialized=false").unwrap();
        first_run(&config, &logger);

        assert!(root.join("backend").join("server.toml").exists());
        assert_eq!(
            fs::read_to_string(root.join(STATE_FILE)).unwrap(),
            "already-initialized=true"
        );

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_garbage_marker_counts_as_initialized() {
        let root = temp_root();
        let config = config_for(&root);
        let logger = Logger::new("test");

        fs::write(root.join(STATE_FILE), "whatever").unwrap();
        first_run(&config, &logger);

        assert!(!root.join("backend").exists());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_existing_files_are_not_overwritten() {
        let root = temp_root();
        let config = config_for(&root);
        let logger = Logger::new("test");

        fs::create_dir_all(root.join("static")).unwrap();
        fs::write(root.join("static").join("index.html"), "custom").unwrap();

        first_run(&config, &logger);

        assert_eq!(
            fs::read_to_string(root.join("static").join("index.html")).unwrap(),
            "custom"
        );

        fs::remove_dir_all(&root).ok();
    }
}
