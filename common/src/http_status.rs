//! HTTP status code predicates shared by the transport and its errors.

/// HTTP status code as reported by the remote.
///
/// Stored directly rather than parsed back out of error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const OK: HttpStatusCode = HttpStatusCode(200);
    pub const CREATED: HttpStatusCode = HttpStatusCode(201);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);
    pub const NOT_FOUND: HttpStatusCode = HttpStatusCode(404);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Any 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }

    pub fn is_unauthorized(&self) -> bool {
        *self == Self::UNAUTHORIZED
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
