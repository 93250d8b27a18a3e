//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Accept loop del servidor y manejo de conexiones. Cada conexión
//! aceptada se procesa en su propio thread; el loop nunca espera a que
//! un handler termine antes de aceptar la siguiente conexión.
//!
//! ## Ciclo de vida de una conexión
//!
//! ```text
//! leer request line → resolver → leer archivo → escribir response → cerrar
//! ```
//!
//! La conexión siempre se cierra después de una respuesta (sin
//! keep-alive), también en cualquier camino de error. Un error en una
//! conexión termina solo esa conexión; un error del socket de escucha
//! termina el servidor.
//!
//! ## Limitaciones deliberadas
//!
//! - No hay pool de threads ni límite de conexiones simultáneas, y no
//!   hay timeouts de lectura: un cliente que mantiene el socket abierto
//!   sin enviar datos retiene su thread indefinidamente.
//! - `stop()` solo se observa al inicio de cada iteración del loop: un
//!   `accept` bloqueado no se interrumpe, así que el servidor termina
//!   recién después del siguiente evento de accept.

use crate::config::{Config, Route};
use crate::http::{response::content_type_for, Response, StatusCode};
use crate::logger::Logger;
use crate::resolver::resolve;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Servidor HTTP/1.1 de archivos estáticos, un thread por conexión
pub struct Server {
    address: String,
    routes: Arc<Vec<Route>>,
    static_root: Arc<PathBuf>,
    logger: Arc<Logger>,
    active: Arc<AtomicBool>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor a partir de la configuración y la tabla de rutas
    ///
    /// La tabla de rutas y el static root quedan inmutables y se
    /// comparten con los threads de conexión vía `Arc`, sin locks.
    pub fn new(config: &Config, routes: Vec<Route>, logger: Arc<Logger>) -> Self {
        Self {
            address: config.address(),
            routes: Arc::new(routes),
            static_root: Arc::new(config.static_root()),
            logger,
            active: Arc::new(AtomicBool::new(false)),
            listener: None,
        }
    }

    /// Abre el socket de escucha y marca el servidor como activo
    ///
    /// Retorna la dirección local real: con puerto 0 el sistema asigna
    /// uno efímero, útil en tests.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(&self.address)?;
        let local_addr = listener.local_addr()?;

        self.listener = Some(listener);
        self.active.store(true, Ordering::Relaxed);
        self.logger.info(&format!(
            "Server started! Visit http://{} to access the result.",
            local_addr
        ));

        Ok(local_addr)
    }

    /// Indica si el accept loop debe seguir corriendo
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Solicita la detención del servidor
    ///
    /// El flag solo se consulta al inicio de cada iteración del accept
    /// loop: si el loop está bloqueado en `accept`, la detención se
    /// hace efectiva recién con la siguiente conexión entrante.
    pub fn stop(&self) {
        self.logger.info("Stopping server...");
        self.active.store(false, Ordering::Relaxed);
        self.logger.info("Server stopped!");
    }

    /// Corre el accept loop hasta detenerse o hasta un error fatal
    ///
    /// Cada conexión aceptada se despacha a su propio thread con clones
    /// de los `Arc` compartidos. Un error de `accept` es fatal: se
    /// loguea, el servidor pasa a inactivo y el loop termina (no hay
    /// rebind ni retry).
    pub fn serve(&self) -> io::Result<()> {
        let listener = self.listener.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "serve() called before bind()")
        })?;

        while self.is_active() {
            match listener.accept() {
                Ok((stream, peer_addr)) => {
                    let routes = Arc::clone(&self.routes);
                    let static_root = Arc::clone(&self.static_root);
                    let logger = Arc::clone(&self.logger);

                    logger.debug(&format!("Connection from {}", peer_addr));

                    thread::spawn(move || {
                        Self::handle_connection(stream, routes, static_root, logger);
                    });
                }
                Err(e) => {
                    self.logger.error(&format!("Server error: {}", e));
                    self.active.store(false, Ordering::Relaxed);
                }
            }
        }

        self.stop();
        Ok(())
    }

    /// Abre el socket y corre el accept loop (bloquea el thread actual)
    pub fn run(&mut self) -> io::Result<()> {
        self.bind()?;
        self.serve()
    }

    /// Atiende una conexión completa y la cierra incondicionalmente
    fn handle_connection(
        stream: TcpStream,
        routes: Arc<Vec<Route>>,
        static_root: Arc<PathBuf>,
        logger: Arc<Logger>,
    ) {
        if let Err(e) = Self::serve_request(&stream, &routes, &static_root) {
            logger.error(&format!("Error handling client: {}", e));
        }

        // El cierre fallido se reporta pero nunca se propaga
        if let Err(e) = stream.shutdown(Shutdown::Both) {
            if e.kind() != io::ErrorKind::NotConnected {
                logger.error(&format!("Error closing client socket: {}", e));
            }
        }
    }

    /// Lee una request line, la resuelve y escribe la respuesta
    ///
    /// Si el peer cerró sin enviar datos (o envió solo una línea vacía)
    /// la conexión se cierra sin escribir un solo byte.
    fn serve_request(
        mut stream: &TcpStream,
        routes: &[Route],
        static_root: &Path,
    ) -> io::Result<()> {
        let mut reader = BufReader::new(stream);
        let mut raw_line = Vec::new();
        let bytes_read = reader.read_until(b'\n', &mut raw_line)?;

        if bytes_read == 0 {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&raw_line);
        let line = line.trim_end_matches(['\r', '\n']);

        if line.is_empty() {
            return Ok(());
        }

        let response = match resolve(line, routes, static_root) {
            Ok(file_path) => Self::file_response(&file_path),
            Err(e) => Response::error_page(e.status()),
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()
    }

    /// Lee el archivo resuelto completo y arma la respuesta 200
    ///
    /// Un fallo de IO después de una resolución exitosa no tiene
    /// clasificación propia: responde 500.
    fn file_response(file_path: &Path) -> Response {
        match fs::read(file_path) {
            Ok(contents) => Response::file(contents, content_type_for(file_path)),
            Err(_) => Response::error_page(StatusCode::InternalServerError),
        }
    }
}
