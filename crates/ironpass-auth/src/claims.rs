use ironpass_models::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in a session token.
///
/// `sub` is optional on the way in so that a correctly signed token without a
/// subject can be told apart from a forged one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// The subject as a user id, if present and well formed.
    pub fn subject_id(&self) -> Option<Uuid> {
        self.sub
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialized_as_integer() {
        let claims = Claims {
            sub: Some(Uuid::nil().to_string()),
            role: Role::Admin,
            iat: 1,
            exp: 2,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["role"], 1);
    }

    #[test]
    fn test_missing_sub_deserializes() {
        let claims: Claims = serde_json::from_str(r#"{"role":0,"iat":1,"exp":2}"#).unwrap();
        assert!(claims.sub.is_none());
        assert!(claims.subject_id().is_none());
    }

    #[test]
    fn test_subject_id_rejects_garbage() {
        let claims = Claims {
            sub: Some("not-a-uuid".to_string()),
            role: Role::Regular,
            iat: 1,
            exp: 2,
        };
        assert!(claims.subject_id().is_none());

        let id = Uuid::new_v4();
        let claims = Claims {
            sub: Some(id.to_string()),
            ..claims
        };
        assert_eq!(claims.subject_id(), Some(id));
    }
}
