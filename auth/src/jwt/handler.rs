use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs1::EncodeRsaPublicKey;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::TOKEN_ISSUER;
use super::errors::JwtError;
use crate::keys::KeyError;
use crate::keys::KeyPair;

/// Algorithm used when signing.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Algorithms accepted on verification: the RSA family only.
const RSA_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];

/// Access token issuer and verifier.
///
/// Signs with RS256 using the private half of a [`KeyPair`] and verifies
/// against the public half. Immutable after construction, so one instance
/// can be shared across any number of concurrent requests.
pub struct JwtHandler {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
}

impl JwtHandler {
    /// Create a new JWT handler from a key pair.
    ///
    /// A verification-only key pair produces a handler that can verify
    /// but fails every issuance with `EncodingFailed`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The key could not be serialized to DER
    pub fn new(key_pair: &KeyPair) -> Result<Self, KeyError> {
        let encoding_key = key_pair
            .private_key()
            .map(|private_key| {
                private_key
                    .to_pkcs1_der()
                    .map(|der| EncodingKey::from_rsa_der(der.as_bytes()))
                    .map_err(|_| KeyError::EncodingFailed("private"))
            })
            .transpose()?;

        let public_der = key_pair
            .public_key()
            .to_pkcs1_der()
            .map_err(|_| KeyError::EncodingFailed("public"))?;

        Ok(Self {
            encoding_key,
            decoding_key: DecodingKey::from_rsa_der(public_der.as_bytes()),
        })
    }

    /// Issue an access token for a principal, valid for 15 minutes from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or no private key is available
    pub fn issue(
        &self,
        principal_id: Uuid,
        email: &str,
        name: Option<&str>,
    ) -> Result<String, JwtError> {
        self.issue_at(principal_id, email, name, Utc::now())
    }

    /// Issue an access token as if the current time were `now`.
    pub fn issue_at(
        &self,
        principal_id: Uuid,
        email: &str,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::for_principal(principal_id, email, name, now))
    }

    /// Sign claims into a compact JWT.
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| JwtError::EncodingFailed("no private key".to_string()))?;

        encode(&Header::new(SIGNING_ALGORITHM), claims, encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `TokenExpired` - Signature is valid but the token is past expiry
    /// * `InvalidToken` - Anything else
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// The declared algorithm is checked before any signature work, so a
    /// token claiming HS256 or `none` never reaches the cryptographic check.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|_| JwtError::InvalidToken)?;
        if !RSA_ALGORITHMS.contains(&header.alg) {
            return Err(JwtError::InvalidToken);
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = RSA_ALGORITHMS.to_vec();
        // Temporal checks run below against `now`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.set_issuer(&[TOKEN_ISSUER]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| JwtError::InvalidToken)?
            .claims;

        let now = now.timestamp();
        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }
        if claims.is_premature(now) {
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }
}
