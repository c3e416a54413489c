use std::collections::HashSet;

use anyhow::Result as Fallible;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::Mutex;
use rand::Rng;

use guia_entities::time::Timestamp;

/// Validity period of issued tokens.
const TOKEN_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Issues and validates the JWT bearer tokens used by API clients
/// that cannot hold cookies.
///
/// Tokens revoked by a logout stay on an in-memory blacklist until
/// they would have expired anyway.
pub struct JwtState {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    blacklist: Mutex<HashSet<String>>,
}

impl JwtState {
    pub fn new(secret: Option<&str>) -> Self {
        let secret = secret.map(|s| s.as_bytes().to_vec()).unwrap_or_else(|| {
            // Tokens do not survive a restart without a configured secret.
            warn!("No token secret configured, generating a random one");
            rand::thread_rng().gen::<[u8; 32]>().to_vec()
        });
        Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            blacklist: Mutex::new(HashSet::new()),
        }
    }

    pub fn generate_token(&self, email: &str) -> Fallible<String> {
        let claims = Claims {
            sub: email.to_owned(),
            exp: Timestamp::now().as_secs() + TOKEN_VALIDITY_SECS,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn validate_token_and_get_email(&self, token: &str) -> Fallible<String> {
        if self.blacklist.lock().contains(token) {
            anyhow::bail!("Token has been revoked");
        }
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims.sub)
    }

    pub fn blacklist_token(&self, token: String) {
        let mut blacklist = self.blacklist.lock();
        blacklist.insert(token);
        // Expired tokens fail validation anyway and can be dropped.
        blacklist.retain(|t| {
            decode::<Claims>(t, &self.decoding_key, &Validation::default()).is_ok()
        });
    }
}
