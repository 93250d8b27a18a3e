//! # Sistema de Logging
//! src/logger.rs
//!
//! Sink de logging con niveles que escribe líneas de texto a stdout.
//! No hay logger global: `main` construye una instancia y la comparte
//! vía `Arc` con los componentes que la necesitan.
//!
//! ## Formato
//!
//! ```text
//! [SERVER/INFO] Server started!
//! [SERVER/WARN] No bind information found in configuration! Using defaults...
//! ```

/// Sink de logging con niveles (info, warn, error, debug)
#[derive(Debug, Clone)]
pub struct Logger {
    /// Prefijo ya formateado: `[NOMBRE/`
    prefix: String,
}

impl Logger {
    /// Crea un logger identificado por un nombre
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::logger::Logger;
    ///
    /// let logger = Logger::new("server");
    /// logger.info("Server started!");
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            prefix: format!("[{}/", name.to_uppercase()),
        }
    }

    /// Registra información general
    pub fn info(&self, message: &str) {
        self.log("INFO", message);
    }

    /// Registra advertencias (condiciones anómalas pero no fatales)
    pub fn warn(&self, message: &str) {
        self.log("WARN", message);
    }

    /// Registra errores
    pub fn error(&self, message: &str) {
        self.log("ERROR", message);
    }

    /// Registra información de depuración
    pub fn debug(&self, message: &str) {
        self.log("DEBUG", message);
    }

    fn log(&self, level: &str, message: &str) {
        println!("{}{}] {}", self.prefix, level, message);
    }
}
