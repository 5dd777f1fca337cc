//! # Códigos de Estado HTTP
//!
//! Este módulo define el conjunto cerrado de códigos de estado que el
//! servidor sabe emitir. Cualquier otro código numérico se rechaza al
//! convertirlo: nunca se cae silenciosamente a 200.
//!
//! - **2xx**: Éxito (200, 201)
//! - **4xx**: Error del cliente (400, 404, 405)
//! - **5xx**: Error del servidor (500, fallos del File Store)

use thiserror::Error;

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 201 Created - Se creó o sobrescribió un archivo
    Created = 201,

    /// 400 Bad Request - Request o nombre de archivo malformado
    BadRequest = 400,

    /// 404 Not Found - Ruta o archivo no encontrado
    NotFound = 404,

    /// 405 Method Not Allowed - Método distinto de GET/POST
    MethodNotAllowed = 405,

    /// 500 Internal Server Error - Fallo del sistema de archivos
    InternalServerError = 500,
}

/// Error al construir un `StatusCode` desde un número fuera del conjunto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported status code {0}")]
pub struct InvalidStatusCode(pub u16);

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::Created)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = InvalidStatusCode;

    /// Solo acepta los códigos del conjunto cerrado
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::StatusCode;
    /// assert_eq!(StatusCode::try_from(404), Ok(StatusCode::NotFound));
    /// assert!(StatusCode::try_from(302).is_err());
    /// ```
    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(StatusCode::Ok),
            201 => Ok(StatusCode::Created),
            400 => Ok(StatusCode::BadRequest),
            404 => Ok(StatusCode::NotFound),
            405 => Ok(StatusCode::MethodNotAllowed),
            500 => Ok(StatusCode::InternalServerError),
            other => Err(InvalidStatusCode(other)),
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StatusCode; 6] = [
        StatusCode::Ok,
        StatusCode::Created,
        StatusCode::BadRequest,
        StatusCode::NotFound,
        StatusCode::MethodNotAllowed,
        StatusCode::InternalServerError,
    ];

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::Created.as_u16(), 201);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::Created.reason_phrase(), "Created");
        assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
        assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    }

    #[test]
    fn test_try_from_known_codes() {
        for status in ALL {
            assert_eq!(StatusCode::try_from(status.as_u16()), Ok(status));
        }
    }

    #[test]
    fn test_try_from_unknown_code_fails() {
        assert_eq!(StatusCode::try_from(302), Err(InvalidStatusCode(302)));
        assert_eq!(StatusCode::try_from(0), Err(InvalidStatusCode(0)));

        let err = StatusCode::try_from(418).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported status code 418");
    }

    #[test]
    fn test_is_success() {
        assert!(StatusCode::Ok.is_success());
        assert!(StatusCode::Created.is_success());
        assert!(!StatusCode::NotFound.is_success());
    }

    #[test]
    fn test_is_client_error() {
        assert!(!StatusCode::Ok.is_client_error());
        assert!(StatusCode::BadRequest.is_client_error());
        assert!(StatusCode::MethodNotAllowed.is_client_error());
        assert!(!StatusCode::InternalServerError.is_client_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::MethodNotAllowed.to_string(), "405 Method Not Allowed");
    }
}
