//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor solo necesita la primera línea del request; los headers
//! nunca se leen. El formato esperado es:
//!
//! ```text
//! GET /ruta?query=valor HTTP/1.1
//! ```
//!
//! Los tokens se separan por espacios simples: el primero es el método,
//! el segundo es el target. La parte de query (desde el primer `?`) se
//! descarta antes de hacer matching de rutas.

/// Métodos HTTP soportados
///
/// El servidor solo sirve archivos, así que únicamente GET es válido.
/// Cualquier otro método produce 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es exactamente `GET`.
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// Errores que pueden ocurrir durante el parsing de la request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// La línea está vacía
    EmptyRequestLine,

    /// La línea tiene menos de dos tokens (falta el target)
    MissingTarget,

    /// Método HTTP no soportado (solo se acepta GET)
    UnsupportedMethod(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequestLine => write!(f, "Empty request line"),
            ParseError::MissingTarget => write!(f, "Request line is missing a target"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
        }
    }
}

impl std::error::Error for ParseError {}

/// Request line parseada: método + target sin query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Método HTTP (solo GET)
    pub method: Method,

    /// Target de la petición con la query ya descartada (ej: "/index.html")
    pub target: String,
}

impl RequestLine {
    /// Parsea la primera línea de un request HTTP
    ///
    /// El orden de validación importa: primero se exige que existan al
    /// menos dos tokens (si no, la línea está malformada), y solo después
    /// se valida el método.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_server::http::{Method, RequestLine};
    ///
    /// let line = RequestLine::parse("GET /index.html?v=2 HTTP/1.1").unwrap();
    /// assert_eq!(line.method, Method::GET);
    /// assert_eq!(line.target, "/index.html");
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        if line.is_empty() {
            return Err(ParseError::EmptyRequestLine);
        }

        let mut tokens = line.split(' ');
        let method_token = tokens.next().ok_or(ParseError::EmptyRequestLine)?;
        let target_token = tokens.next().ok_or(ParseError::MissingTarget)?;

        if target_token.is_empty() {
            return Err(ParseError::MissingTarget);
        }

        let method = Method::from_str(method_token)?;
        let target = Self::strip_query(target_token);

        Ok(RequestLine { method, target })
    }

    /// Descarta la componente de query del target
    ///
    /// Todo lo que sigue al primer `?` (inclusive) se elimina antes del
    /// matching de rutas.
    fn strip_query(target: &str) -> String {
        match target.find('?') {
            Some(pos) => target[..pos].to_string(),
            None => target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Request lines válidas ====================

    #[test]
    fn test_parse_simple_get() {
        let line = RequestLine::parse("GET / HTTP/1.1").unwrap();
        assert_eq!(line.method, Method::GET);
        assert_eq!(line.target, "/");
    }

    #[test]
    fn test_parse_strips_query() {
        let line = RequestLine::parse("GET /page.html?user=1&x=2 HTTP/1.1").unwrap();
        assert_eq!(line.target, "/page.html");
    }

    #[test]
    fn test_parse_query_only_question_mark() {
        let line = RequestLine::parse("GET /page.html? HTTP/1.1").unwrap();
        assert_eq!(line.target, "/page.html");
    }

    #[test]
    fn test_parse_without_version_token() {
        // Dos tokens bastan: la versión nunca se valida
        let line = RequestLine::parse("GET /index.html").unwrap();
        assert_eq!(line.target, "/index.html");
    }

    // ==================== Request lines inválidas ====================

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(
            RequestLine::parse(""),
            Err(ParseError::EmptyRequestLine)
        );
    }

    #[test]
    fn test_parse_single_token() {
        assert_eq!(RequestLine::parse("GET"), Err(ParseError::MissingTarget));
    }

    #[test]
    fn test_parse_post_is_unsupported() {
        assert_eq!(
            RequestLine::parse("POST /index.html HTTP/1.1"),
            Err(ParseError::UnsupportedMethod("POST".to_string()))
        );
    }

    #[test]
    fn test_parse_lowercase_get_is_unsupported() {
        // La comparación es exacta, "get" no es "GET"
        assert_eq!(
            RequestLine::parse("get / HTTP/1.1"),
            Err(ParseError::UnsupportedMethod("get".to_string()))
        );
    }

    #[test]
    fn test_missing_target_is_checked_before_method() {
        // Una línea de un solo token malformada reporta la línea, no el método
        assert_eq!(RequestLine::parse("BREW"), Err(ParseError::MissingTarget));
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::UnsupportedMethod("PUT".to_string()).to_string(),
            "Unsupported HTTP method: PUT"
        );
        assert_eq!(
            ParseError::EmptyRequestLine.to_string(),
            "Empty request line"
        );
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::GET.as_str(), "GET");
    }
}
