use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload used for authentication. No expiry is embedded; a valid
/// signature is the whole authorization proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_serializes_camel_case() {
        let claims = Claims {
            email: "a@x.com".into(),
            user_id: Uuid::new_v4(),
        };
        let v = serde_json::to_value(&claims).unwrap();
        assert!(v.get("userId").is_some());
        assert!(v.get("user_id").is_none());
    }
}
