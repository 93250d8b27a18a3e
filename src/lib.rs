//! # Static Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente de archivos estáticos. Atiende una
//! petición por conexión (sin keep-alive): lee la request line, la
//! resuelve contra una tabla de rutas configurada y sirve el archivo
//! correspondiente desde un directorio `static/` confinado.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: parsing de la request line y construcción de responses
//! - `resolver`: mapeo ruta → archivo y contención dentro del static root
//! - `server`: accept loop TCP, un thread por conexión, inicialización
//! - `config`: configuración CLI/env + archivo TOML (bind y rutas)
//! - `logger`: sink de logging con niveles, sin estado global
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::{Config, ConfigFile};
//! use static_server::logger::Logger;
//! use static_server::server::Server;
//! use std::sync::Arc;
//!
//! let mut config = Config::default();
//! let logger = Arc::new(Logger::new("server"));
//!
//! let file = ConfigFile::load(&config.config_file_path(), &logger);
//! config.apply_bind(file.bind.as_ref(), &logger);
//!
//! let mut server = Server::new(&config, file.routes, logger);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod logger;
pub mod resolver;
pub mod server;
