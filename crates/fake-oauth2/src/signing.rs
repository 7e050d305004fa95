//! Access token signing
//!
//! The protocol handlers only see [`TokenSigner`]. The default [`HmacSigner`]
//! uses a fixed, publicly known key so that client test suites can verify the
//! tokens they receive. Anything that needs real key management can plug in
//! its own signer via [`crate::server_router_with_signer`].

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::SigningError;
use crate::oauth::claims::AccessTokenClaims;

/// Key used by the default signer. Not a secret.
pub const MOCK_SIGNING_KEY: &[u8] = b"unused secret key (for verification)";

/// Signs access tokens and verifies them again
pub trait TokenSigner: Send + Sync {
    /// Serialize and sign the claims into a compact JWT
    fn sign(&self, claims: &AccessTokenClaims) -> Result<String, SigningError>;

    /// Check the signature and expiry of a compact JWT and return its claims
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, SigningError>;
}

/// HS256 signer over a shared secret
#[derive(Clone)]
pub struct HmacSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl HmacSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

impl Default for HmacSigner {
    fn default() -> Self {
        Self::new(MOCK_SIGNING_KEY)
    }
}

impl TokenSigner for HmacSigner {
    fn sign(&self, claims: &AccessTokenClaims) -> Result<String, SigningError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }

    fn verify(&self, token: &str) -> Result<AccessTokenClaims, SigningError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Audience is whatever client_id the caller sent; nothing to check it against.
        validation.validate_aud = false;

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}
