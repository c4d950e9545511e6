//! Login/logout lifecycle.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::expect_data;
use crate::session::{SessionStore, SessionUser};
use crate::transport::{ClientError, ClientResult, Transport};

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticate and install the session into the store.
///
/// Some backend builds omit the user descriptor from the login echo; in
/// that case a minimal descriptor is synthesized from the submitted
/// username so the session always has one.
pub async fn login(
    transport: &dyn Transport,
    store: &SessionStore,
    credentials: &Credentials,
) -> ClientResult<SessionUser> {
    let body = transport
        .post("/auth/login", serde_json::to_value(credentials)?)
        .await?;
    let data = expect_data(body)?;

    let token = data
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::decode("login response is missing a token"))?;

    let user = data
        .get("user")
        .cloned()
        .and_then(|u| serde_json::from_value::<SessionUser>(u).ok())
        .unwrap_or_else(|| SessionUser {
            id: 0,
            name: credentials.username.clone(),
            role: String::new(),
        });

    store.set_session(token, Some(user.clone()));
    Ok(user)
}

/// Clear the session locally, then notify the backend.
///
/// The local clear happens first: even if the logout call fails, the client
/// is logged out.
pub async fn logout(transport: &dyn Transport, store: &SessionStore) -> ClientResult<()> {
    store.clear();
    let body = transport.post("/auth/logout", Value::Null).await?;
    expect_data(body)?;
    Ok(())
}
