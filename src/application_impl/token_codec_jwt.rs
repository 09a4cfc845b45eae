use crate::application_port::*;
use crate::domain_model::*;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub signing_key: Vec<u8>,
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged by the token guard, which needs the claims of an
        // expired token to build its response.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        JwtHs256Codec {
            encoding_key: EncodingKey::from_secret(&cfg.signing_key),
            decoding_key: DecodingKey::from_secret(&cfg.signing_key),
            cfg,
            validation,
        }
    }

    #[inline]
    fn gen_jti() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn ttl(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.cfg.access_ttl,
            TokenType::Refresh => self.cfg.refresh_ttl,
        }
    }
}

impl TokenCodec for JwtHs256Codec {
    fn issue(
        &self,
        identity: UserId,
        token_type: TokenType,
        fresh: bool,
        additional: AdditionalClaims,
    ) -> Result<IssuedToken, AuthError> {
        let iat_dt = Utc::now();
        let exp_dt = iat_dt + self.ttl(token_type);
        let claims = TokenClaims {
            sub: identity.to_string(),
            jti: Self::gen_jti(),
            token_type,
            fresh: fresh && token_type == TokenType::Access,
            iat: iat_dt.timestamp(),
            nbf: iat_dt.timestamp(),
            exp: exp_dt.timestamp(),
            additional,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
        Ok(IssuedToken { token, claims })
    }

    fn decode(&self, token: &str) -> Result<DecodedToken, MalformedToken> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| MalformedToken(e.to_string()))?;
        Ok(DecodedToken {
            header: data.header,
            claims: data.claims,
        })
    }
}
