//! # Static Server - Entry Point
//! src/main.rs
//!
//! Bootstrap del proceso: parseo de CLI, inicialización del layout en
//! disco, carga del archivo de configuración y arranque del servidor.
//! El proceso sigue vivo mientras el accept loop corre y retorna cuando
//! el servidor se detiene; un error fatal termina con código 1.

use static_server::config::{Config, ConfigFile};
use static_server::logger::Logger;
use static_server::server::{init, Server};
use std::sync::Arc;

fn main() {
    println!("=================================");
    println!("  Static HTTP/1.1 Server");
    println!("=================================\n");

    let mut config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    let logger = Arc::new(Logger::new("server"));
    logger.info("Starting static web server...");

    // Garantiza backend/, static/ y el archivo de configuración
    init::first_run(&config, &logger);

    // El archivo puede sobreescribir host/puerto y aporta la tabla de rutas
    let config_file = ConfigFile::load(&config.config_file_path(), &logger);
    config.apply_bind(config_file.bind.as_ref(), &logger);

    config.print_summary();

    let mut server = Server::new(&config, config_file.routes, logger);

    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
