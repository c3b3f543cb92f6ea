use serde::{Deserialize, Serialize};

/// Which half of a token pair a JWT is. Refresh tokens never authenticate a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload. `iat` and `exp` are unix seconds; `sub` is the user's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}
