use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Authorization claims attached to an identity when a token is issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalClaims {
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user id as string
    pub jti: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(default)]
    pub fresh: bool,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub additional: AdditionalClaims,
}

impl TokenClaims {
    pub fn identity(&self) -> Option<UserId> {
        self.sub.parse::<UserId>().ok()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// What a protected route demands of the presented token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRequirement {
    Access,
    FreshAccess,
    Refresh,
}

impl TokenRequirement {
    pub fn token_type(self) -> TokenType {
        match self {
            TokenRequirement::Access | TokenRequirement::FreshAccess => TokenType::Access,
            TokenRequirement::Refresh => TokenType::Refresh,
        }
    }

    pub fn requires_fresh(self) -> bool {
        matches!(self, TokenRequirement::FreshAccess)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenRejection {
    #[error("token revoked")]
    TokenRevoked,
    #[error("fresh token required")]
    TokenNotFresh,
    #[error("token expired")]
    TokenExpired,
    #[error("token signature or format invalid")]
    TokenInvalidSignature,
    #[error("token missing")]
    TokenMissing,
}

/// JSON body sent with a 401 when a token is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenErrorBody {
    #[serde(skip)]
    pub reason: TokenRejection,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TokenErrorBody {
    pub fn with_description(reason: TokenRejection, error: &str, description: &str) -> Self {
        TokenErrorBody {
            reason,
            error: error.to_string(),
            description: Some(description.to_string()),
            message: None,
        }
    }

    pub fn with_message(reason: TokenRejection, error: &str, message: &str) -> Self {
        TokenErrorBody {
            reason,
            error: error.to_string(),
            description: None,
            message: Some(message.to_string()),
        }
    }
}

/// Identity and claims of a request that passed every token check.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub identity: UserId,
    pub claims: TokenClaims,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.claims.additional.is_admin
    }

    pub fn jti(&self) -> &str {
        &self.claims.jti
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_flatten_admin_flag_and_type() {
        let claims = TokenClaims {
            sub: "7".to_string(),
            jti: "abc".to_string(),
            token_type: TokenType::Refresh,
            fresh: false,
            iat: 1,
            nbf: 1,
            exp: 2,
            additional: AdditionalClaims { is_admin: true },
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
        assert_eq!(json["is_admin"], true);
        assert_eq!(claims.identity(), Some(UserId(7)));
    }

    #[test]
    fn error_body_omits_absent_fields() {
        let body = TokenErrorBody::with_message(
            TokenRejection::TokenExpired,
            "invalid token",
            "Signature verification failed.",
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "invalid token",
                "message": "Signature verification failed."
            })
        );
    }
}
