//! # Módulo Server
//!
//! Capa TCP del servidor:
//! - `tcp`: accept loop y manejo de conexiones (un thread por conexión)
//! - `init`: inicialización del layout en disco en el primer arranque

pub mod init;
pub mod tcp;

pub use tcp::Server;
