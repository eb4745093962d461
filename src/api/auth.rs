//! Authentication endpoints plus the session-aware sign-in/sign-out flows built on them.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{Ack, ApiClient, ApiRequest};
use crate::error::ClientResult;
use crate::identity::{Role, User};
use crate::session::SessionStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptchaChallenge {
    pub captcha: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub captcha: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub captcha: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub user: User,
}

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn get_captcha(&self) -> ClientResult<CaptchaChallenge> {
        self.client.send_as(ApiRequest::get("/captcha")).await
    }

    pub async fn login(&self, email: &str, password: &str, role: Role, captcha: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
            captcha: captcha.to_string(),
        };
        self.client.send_as(ApiRequest::post("/auth/login").body(&body)).await
    }

    pub async fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        role: Role,
        captcha: &str,
    ) -> ClientResult<SignupResponse> {
        let body = SignupRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            captcha: captcha.to_string(),
        };
        self.client.send_as(ApiRequest::post("/auth/signup").body(&body)).await
    }

    pub async fn logout(&self) -> ClientResult<Ack> {
        self.client.send_as(ApiRequest::post("/auth/logout")).await
    }

    pub async fn get_current_user(&self) -> ClientResult<CurrentUser> {
        self.client.send_as(ApiRequest::get("/auth/me")).await
    }

    /// Log in and persist the returned user, replacing any previous session.
    pub async fn sign_in(
        &self,
        session: &SessionStore,
        email: &str,
        password: &str,
        role: Role,
        captcha: &str,
    ) -> ClientResult<User> {
        let resp = self.login(email, password, role, captcha).await?;
        session.set_user(&resp.user)?;
        info!(target: "mira::api", user_id = %resp.user.id, role = %resp.user.role, "signed in");
        Ok(resp.user)
    }

    /// Log out on the backend and always drop the local snapshot; the backend error, if any, is returned afterwards.
    pub async fn sign_out(&self, session: &SessionStore) -> ClientResult<()> {
        let remote = self.logout().await;
        session.clear_user()?;
        match remote {
            Ok(_) => {
                info!(target: "mira::api", "signed out");
                Ok(())
            }
            Err(e) => {
                warn!(target: "mira::api", error = %e, "backend logout failed; local session cleared");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_body_shape() {
        let body = LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
            role: Role::Admin,
            captcha: "X7K2QP".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"email": "a@b.c", "password": "pw", "role": "admin", "captcha": "X7K2QP"})
        );
    }

    #[test]
    fn signup_body_uses_full_name_key() {
        let body = SignupRequest {
            full_name: "Ravi K".into(),
            email: "r@k.in".into(),
            password: "pw".into(),
            role: Role::Candidate,
            captcha: "ABC123".into(),
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["fullName"], "Ravi K");
        assert_eq!(v["role"], "candidate");
        assert_eq!(v.as_object().map(|o| o.len()), Some(5));
    }

    #[test]
    fn signup_response_reads_user_id() {
        let r: SignupResponse = serde_json::from_value(json!({"message": "User registered successfully", "userId": "66aa"})).unwrap();
        assert_eq!(r.user_id, "66aa");
    }
}
