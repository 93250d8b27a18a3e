//! # Resolución de Requests
//! src/resolver/mod.rs
//!
//! Convierte una request line cruda en el path canónico del archivo a
//! servir, o en el error que lo impidió.
//!
//! ## Pipeline
//!
//! ```text
//! request line → parse → matching de rutas → path bajo static root
//!              → normalización → chequeo de contención → archivo
//! ```
//!
//! La tabla de rutas se recorre en orden de declaración y gana la
//! primera coincidencia exacta; si ninguna ruta coincide, el target se
//! usa tal cual como path de archivo.
//!
//! La contención es la única defensa contra escapes por `..`: se evalúa
//! sobre la forma normalizada del path (nunca sobre el string crudo) y
//! falla con `Forbidden` sin importar si el archivo destino existe.
//! Después del chequeo de existencia se canonicaliza con el filesystem
//! para que tampoco un symlink pueda salir del static root.

use crate::config::Route;
use crate::http::{ParseError, RequestLine, StatusCode};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Fallos de resolución, cada uno con su código HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Request line vacía o con menos de dos tokens
    BadRequest,

    /// Método distinto de GET
    MethodNotAllowed,

    /// El path resuelto escapa del static root
    Forbidden,

    /// El archivo no existe o es un directorio
    NotFound,
}

impl ResolveError {
    /// Código de estado HTTP correspondiente al fallo
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::BadRequest => StatusCode::BadRequest,
            ResolveError::MethodNotAllowed => StatusCode::MethodNotAllowed,
            ResolveError::Forbidden => StatusCode::Forbidden,
            ResolveError::NotFound => StatusCode::NotFound,
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::BadRequest => write!(f, "Malformed request line"),
            ResolveError::MethodNotAllowed => write!(f, "Method not allowed"),
            ResolveError::Forbidden => write!(f, "Target escapes the static root"),
            ResolveError::NotFound => write!(f, "File not found"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<ParseError> for ResolveError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::EmptyRequestLine | ParseError::MissingTarget => ResolveError::BadRequest,
            ParseError::UnsupportedMethod(_) => ResolveError::MethodNotAllowed,
        }
    }
}

/// Resuelve una request line al archivo que debe servirse
///
/// Retorna el path canónico del archivo, listo para leer. El método se
/// valida antes de tocar el filesystem.
///
/// # Ejemplo
///
/// ```no_run
/// use static_server::config::Route;
/// use static_server::resolver::resolve;
/// use std::path::Path;
///
/// let routes = vec![Route {
///     path: "/".to_string(),
///     public_file: "index.html".to_string(),
/// }];
///
/// let file = resolve("GET / HTTP/1.1", &routes, Path::new("./static"));
/// ```
pub fn resolve(
    request_line: &str,
    routes: &[Route],
    static_root: &Path,
) -> Result<PathBuf, ResolveError> {
    let line = RequestLine::parse(request_line)?;

    // Matching de rutas: primera coincidencia exacta gana
    let mut target = line.target;
    for route in routes {
        if route.path == target {
            target = format!("/{}", route.public_file);
            break;
        }
    }

    let relative = target.strip_prefix('/').unwrap_or(&target);
    let joined = static_root.join(contain(relative)?);

    // Existencia y tipo: los directorios no se sirven
    let metadata = fs::metadata(&joined).map_err(|_| ResolveError::NotFound)?;
    if metadata.is_dir() {
        return Err(ResolveError::NotFound);
    }

    // Re-chequeo sobre la forma canónica: un symlink dentro del root
    // podría apuntar fuera de él
    let canonical = fs::canonicalize(&joined).map_err(|_| ResolveError::NotFound)?;
    let canonical_root = fs::canonicalize(static_root).map_err(|_| ResolveError::NotFound)?;

    if !canonical.starts_with(&canonical_root) {
        return Err(ResolveError::Forbidden);
    }

    Ok(canonical)
}

/// Normaliza un path relativo y garantiza que no escapa hacia arriba
///
/// Resuelve segmentos `.` y `..` léxicamente. Un `..` que intente subir
/// por encima del inicio, o un segmento absoluto, producen `Forbidden`
/// sin importar qué exista en disco.
fn contain(relative: &str) -> Result<PathBuf, ResolveError> {
    let mut normalized = PathBuf::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => normalized.push(segment),
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(ResolveError::Forbidden);
                }
            }
            Component::CurDir => {}
            // "//etc/passwd" y similares dejan un componente absoluto
            // tras quitar la primera barra
            Component::RootDir | Component::Prefix(_) => {
                return Err(ResolveError::Forbidden);
            }
        }
    }

    Ok(normalized)
}
