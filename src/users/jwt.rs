use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::state::AppState;

/// HS256 signing and verification keys derived from the process-wide
/// secret. Read-only after startup.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_secret(&state.config.jwt.secret)
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, email: &str, user_id: Uuid) -> anyhow::Result<String> {
        let claims = Claims {
            email: email.to_string(),
            user_id,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        // Tokens carry no exp claim, so the default expiry validation
        // must be switched off; signature and shape still count.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.user_id, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = JwtKeys::from_secret("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign("a@x.com", user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let keys = JwtKeys::from_secret("dev-secret");
        let other = JwtKeys::from_secret("other-secret");
        let token = keys.sign("a@x.com", Uuid::new_v4()).expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = JwtKeys::from_secret("dev-secret");
        assert!(keys.verify("not.a.token").is_err());
    }

    #[tokio::test]
    async fn keys_derive_from_state_config() {
        let state = crate::state::AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign("a@x.com", Uuid::new_v4()).expect("sign");
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn login_and_register_tokens_agree_on_user_id() {
        // Two tokens signed independently for the same account decode to
        // the same claims.
        let keys = JwtKeys::from_secret("dev-secret");
        let user_id = Uuid::new_v4();
        let t1 = keys.sign("a@x.com", user_id).expect("sign t1");
        let t2 = keys.sign("a@x.com", user_id).expect("sign t2");
        let c1 = keys.verify(&t1).expect("verify t1");
        let c2 = keys.verify(&t2).expect("verify t2");
        assert_eq!(c1.user_id, c2.user_id);
        assert_eq!(c1.email, c2.email);
    }
}
