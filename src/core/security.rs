use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Local};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use poem::Request;
use poem_openapi::{auth::Bearer, SecurityScheme};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{core::error::HrResult, model::user::User, settings::Config, store::HrStore};

const ACCESS_TOKEN: &str = "access";
const REFRESH_TOKEN: &str = "refresh";

/// password hashing
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    // Argon2 with default params (Argon2id v19)
    let argon2 = Argon2::default();

    // Hash password to PHC string ($argon2id$v=19$...)
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// password hash verification
pub fn verify_hash_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let verify = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(verify)
}

pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub user_name: String,
    pub exp: i64,
    pub type_key: String,
}

impl Claims {
    fn new(user: &User, type_key: &str, exp_minutes: u16) -> Self {
        let exp = (Local::now() + Duration::minutes(exp_minutes as i64)).timestamp();
        Self {
            id: user.id.to_string(),
            user_name: user.user_name.clone(),
            exp,
            type_key: type_key.to_string(),
        }
    }

    pub fn access(user: &User, config: &Config) -> Self {
        Self::new(user, ACCESS_TOKEN, config.jwt_exp)
    }

    pub fn refresh(user: &User, config: &Config) -> Self {
        Self::new(user, REFRESH_TOKEN, config.jwt_refresh_exp)
    }
}

/// Generate token
pub fn encode_token(claims: &Claims, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

/// Extract payload and Validate token
pub fn decode_token(token: &str, jwt_secret: &str) -> anyhow::Result<Claims> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &keys.decoding, &Validation::default())?;
    Ok(token_data.claims)
}

pub fn generate_token_from_user(user: &User, config: &Config) -> anyhow::Result<String> {
    encode_token(&Claims::access(user, config), &config.jwt_secret)
}

pub fn generate_refresh_token_from_user(user: &User, config: &Config) -> anyhow::Result<String> {
    encode_token(&Claims::refresh(user, config), &config.jwt_secret)
}

/// Resolves a token of kind `type_key` to an active user.
///
/// Malformed, expired or wrong-kind tokens resolve to `None`; only store
/// failures are errors.
async fn get_user_from_claims(
    store: &dyn HrStore,
    config: &Config,
    token: Option<String>,
    type_key: &str,
) -> HrResult<Option<User>> {
    let Some(token) = token else {
        return Ok(None);
    };
    let claims = match decode_token(&token, &config.jwt_secret) {
        Ok(val) => val,
        Err(err) => {
            debug!("rejected {} token: {}", type_key, err);
            return Ok(None);
        }
    };
    if claims.type_key != type_key {
        return Ok(None);
    }
    let Ok(user_id) = Uuid::parse_str(&claims.id) else {
        return Ok(None);
    };
    let user = store.get_user_by_id(&user_id).await?;
    Ok(user.filter(|x| x.is_active.unwrap_or(false) && x.deleted_date.is_none()))
}

pub async fn get_user_from_token(
    store: &dyn HrStore,
    config: &Config,
    jwt_token: Option<String>,
) -> HrResult<Option<User>> {
    get_user_from_claims(store, config, jwt_token, ACCESS_TOKEN).await
}

pub async fn get_user_from_refresh_token(
    store: &dyn HrStore,
    config: &Config,
    refresh_token: Option<String>,
) -> HrResult<Option<User>> {
    get_user_from_claims(store, config, refresh_token, REFRESH_TOKEN).await
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserApiKey {
    pub token: Option<String>,
}

/// ApiKey authorization
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "bearer_checker")]
pub struct BearerAuthorization(pub UserApiKey);

pub async fn bearer_checker(_req: &Request, api_key: Bearer) -> Option<UserApiKey> {
    Some(UserApiKey {
        token: Some(api_key.token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::test_utils::{generate_test_user, test_config},
        model::role::Role,
        store::memory::MemoryStore,
    };

    #[test]
    fn test_hashing_password() {
        let password = "secretpassword";
        let hash = hash_password(password);
        assert!(hash.is_ok());
        let hash = hash.unwrap();
        let verify = verify_hash_password(password, &hash);
        assert!(verify.is_ok());
        assert!(verify.unwrap());
        let verify_false = verify_hash_password("wrongpassword", &hash);
        assert!(verify_false.is_ok());
        assert!(!verify_false.unwrap());
    }

    #[tokio::test]
    async fn test_generate_token() -> anyhow::Result<()> {
        // Given
        let config = test_config();
        let store = MemoryStore::new();
        let test_user = generate_test_user(&store, &config, "hello", "password", Role::Hr).await?;

        // When
        let token_user =
            get_user_from_token(&store, &config, Some(test_user.token.clone())).await?;
        let refresh_user =
            get_user_from_refresh_token(&store, &config, Some(test_user.refresh_token.clone()))
                .await?;

        // Expect
        assert!(token_user.is_some());
        assert_eq!(token_user.unwrap().user_name, "hello".to_string());
        assert!(refresh_user.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_token_kinds_are_not_interchangeable() -> anyhow::Result<()> {
        // Given
        let config = test_config();
        let store = MemoryStore::new();
        let test_user = generate_test_user(&store, &config, "hello", "password", Role::Hr).await?;

        // Expect
        assert!(
            get_user_from_token(&store, &config, Some(test_user.refresh_token.clone()))
                .await?
                .is_none()
        );
        assert!(
            get_user_from_refresh_token(&store, &config, Some(test_user.token.clone()))
                .await?
                .is_none()
        );
        assert!(
            get_user_from_token(&store, &config, Some("not-a-token".to_string()))
                .await?
                .is_none()
        );
        assert!(get_user_from_token(&store, &config, None).await?.is_none());
        Ok(())
    }
}
