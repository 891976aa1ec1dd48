// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side session state.
//!
//! The store knows whether someone is logged in and who they are. It keeps
//! that identity in memory and in a durable snapshot so that a later process
//! can restore it without asking the server. The snapshot never holds a
//! credential: bearer tokens live in their own storage slot and session
//! cookies belong to the transport.
//!
//! Any 401 seen by the adapter, for any request, drops the session. Clearing
//! is idempotent, so a logout racing an invalidation still ends logged out.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::lock::Mutex;
use log::{error, info, warn};
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    error::Result,
    gateway::{auth, Executor as _},
    http::{
        self, Adapter, Bearer, Config, Cookies, Interceptor, Response, StatusCode, Token,
        Transport,
    },
    model::{Envelope, Role, UserSummary},
    storage::Storage,
};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const LOGOUT_FAILED: &str = "Logout failed";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Session {
    user: Option<UserSummary>,
}

impl Session {
    #[cfg(test)]
    pub(crate) const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) const fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }
}

/// The result of a session-changing operation, ready to show to a user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Outcome<T = ()> {
    pub(crate) success: bool,
    pub(crate) message: String,
    pub(crate) data: Option<T>,
}

impl<T> Outcome<T> {
    fn succeeded<M: Into<String>>(message: M, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    fn failed<M: Into<String>>(message: M) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// The credential strategy the store manages.
pub(crate) enum Credential {
    /// The store saves the token issued at login and drops it when the
    /// session ends.
    Bearer(Arc<Bearer>),
    /// The transport sends the cookie back; the store only drops the saved
    /// jar when the session ends. There is no jar when credentials are left
    /// out of requests.
    Cookie(Option<Arc<Cookies>>),
}

struct Shared {
    user: RwLock<Option<UserSummary>>,
    snapshot: Mutex<Box<dyn Storage<UserSummary>>>,
    credential: Credential,
}

impl Shared {
    async fn clear(&self) {
        *self.user.write().await = None;

        if let Err(e) = self.snapshot.lock().await.remove().await {
            warn!("We could not remove the saved user: {}", e);
        }

        match self.credential {
            Credential::Bearer(ref bearer) => {
                if let Err(e) = bearer.clear().await {
                    warn!("We could not remove the saved token: {}", e);
                }
            }
            Credential::Cookie(Some(ref cookies)) => {
                if let Err(e) = cookies.clear().await {
                    warn!("We could not remove the saved cookies: {}", e);
                }
            }
            Credential::Cookie(None) => {}
        }
    }

    /// Whether a request made now would carry the credential for a restored
    /// user.
    async fn has_credential(&self) -> bool {
        match self.credential {
            Credential::Bearer(ref bearer) => match bearer.token().await {
                Ok(token) => token.is_some(),
                Err(e) => {
                    warn!("The saved token could not be read: {}", e);
                    false
                }
            },
            Credential::Cookie(_) => true,
        }
    }
}

/// Drops the session whenever the server says the request was not
/// authenticated.
struct Invalidator {
    shared: Arc<Shared>,
}

#[async_trait]
impl Interceptor for Invalidator {
    async fn after(&self, res: &Response) -> Result<()> {
        if res.status() == StatusCode::UNAUTHORIZED {
            if self.shared.user.read().await.is_some() {
                info!("The server no longer accepts our session, so we are logging out");
            }
            self.shared.clear().await;
        }
        Ok(())
    }
}

pub(crate) struct Store {
    shared: Arc<Shared>,
    adapter: Adapter,
}

impl Store {
    /// Builds the adapter for `config` over `transport` with the interceptors
    /// the credential strategy needs, and a store that owns it.
    pub(crate) fn new<T: Transport + 'static>(
        config: Config,
        transport: T,
        snapshot: Box<dyn Storage<UserSummary>>,
        credential: Credential,
    ) -> Self {
        let shared = Arc::new(Shared {
            user: RwLock::new(None),
            snapshot: Mutex::new(snapshot),
            credential,
        });

        let mut adapter = Adapter::new(config, transport);
        if let Credential::Bearer(ref bearer) = shared.credential {
            let bearer: Arc<dyn Interceptor> = Arc::<Bearer>::clone(bearer);
            adapter = adapter.with_interceptor(bearer);
        }
        let adapter = adapter.with_interceptor(Arc::new(Invalidator {
            shared: Arc::clone(&shared),
        }));

        Self { shared, adapter }
    }

    /// The adapter every gateway call should go through, so that its
    /// failures reach the session.
    pub(crate) const fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub(crate) async fn session(&self) -> Session {
        Session {
            user: self.shared.user.read().await.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) async fn is_authenticated(&self) -> bool {
        self.shared.user.read().await.is_some()
    }

    pub(crate) async fn user(&self) -> Option<UserSummary> {
        self.shared.user.read().await.clone()
    }

    /// Restores the user from the durable snapshot. This never talks to the
    /// server, so it is safe to call at startup and as often as needed. A
    /// snapshot that cannot be read is thrown away, and so is a bearer
    /// session whose token is gone.
    pub(crate) async fn check_auth(&self) -> Session {
        let mut snapshot = self.shared.snapshot.lock().await;
        let (restored, discard) = match snapshot.get().await {
            Ok(Some(user)) if !user.username.is_empty() => (Some(user), false),
            Ok(Some(_)) => {
                warn!("The saved user has no name, so we are discarding it");
                (None, true)
            }
            Ok(None) => (None, false),
            Err(e) => {
                warn!("The saved user could not be read, so we are discarding it: {}", e);
                (None, true)
            }
        };

        if discard {
            if let Err(e) = snapshot.remove().await {
                warn!("We could not remove the saved user: {}", e);
            }
        }
        drop(snapshot);

        if let Some(user) = restored {
            if self.shared.has_credential().await {
                *self.shared.user.write().await = Some(user);
            } else {
                warn!(
                    "The saved session of {} has no token, so we are discarding it",
                    user.username
                );
                self.invalidate().await;
            }
        }

        self.session().await
    }

    pub(crate) async fn login(
        &self,
        username: &str,
        password: SecretString,
        key: Option<String>,
    ) -> Outcome<UserSummary> {
        let req = auth::Login {
            username: username.to_owned(),
            password,
            key,
        };
        let res = match req.send(&self.adapter).await {
            Ok(res) => res,
            Err(e) => {
                error!("We could not log in as {}: {}", username, e);
                return Outcome::failed(explain(&e, LOGIN_FAILED));
            }
        };

        let identity = match res.envelope::<auth::Identity>() {
            Ok(Envelope {
                data: Some(identity),
                ..
            }) => identity,
            Ok(_) => {
                error!("The server accepted the login but did not say who we are");
                return Outcome::failed(LOGIN_FAILED);
            }
            Err(e) => {
                error!("The server sent a login reply we do not understand: {}", e);
                return Outcome::failed(LOGIN_FAILED);
            }
        };

        if let Credential::Bearer(ref bearer) = self.shared.credential {
            let Some(token) = identity
                .token
                .or_else(|| Token::from_authorization(&res))
            else {
                error!("The server did not issue a bearer token");
                return Outcome::failed(format!("{LOGIN_FAILED}: no token was issued"));
            };
            if let Err(e) = bearer.set(&token).await {
                error!("We could not save the bearer token: {}", e);
                return Outcome::failed(format!("{LOGIN_FAILED}: {e}"));
            }
        }

        let user = identity.user;
        *self.shared.user.write().await = Some(user.clone());
        if let Err(e) = self.shared.snapshot.lock().await.set(&user).await {
            warn!(
                "We could not save the user, so the session will not survive a restart: {}",
                e
            );
        }

        info!("Logged in as {} ({})", user.username, user.role);
        Outcome::succeeded("Login successful", user)
    }

    /// Creates an account. The session itself does not change.
    pub(crate) async fn register(
        &self,
        username: &str,
        password: SecretString,
        role: Role,
        key: Option<String>,
        admin_role_password: Option<SecretString>,
    ) -> Outcome {
        let req = auth::Register {
            username: username.to_owned(),
            password,
            user_role: role,
            key,
            admin_role_password,
        };
        match req.execute(&self.adapter).await {
            Ok(Envelope {
                data: Some(Value::String(message)),
                ..
            }) if !message.is_empty() => Outcome::succeeded(message, ()),
            Ok(Envelope {
                data: Some(data), ..
            }) if !data.is_null() => Outcome::succeeded("Registration successful", ()),
            Ok(_) => Outcome::failed(REGISTRATION_FAILED),
            Err(e) => {
                error!("We could not register {}: {}", username, e);
                Outcome::failed(explain(&e, REGISTRATION_FAILED))
            }
        }
    }

    /// Ends the session locally no matter what the server says.
    pub(crate) async fn logout(&self) -> Outcome {
        let result = auth::Logout.execute(&self.adapter).await;
        self.shared.clear().await;

        match result {
            Ok(_) => Outcome::succeeded("Logged out successfully", ()),
            Err(e) => {
                error!("The server did not acknowledge the logout: {}", e);
                Outcome::failed(explain(&e, LOGOUT_FAILED))
            }
        }
    }

    /// Drops the session. Doing so when there is no session is harmless.
    pub(crate) async fn invalidate(&self) {
        self.shared.clear().await;
    }
}

/// Describes a failed request: the server's message if it sent one, then
/// whatever body it sent, then the status line.
fn explain(error: &http::Error, default: &str) -> String {
    let Some(failure) = error.failure() else {
        return default.to_owned();
    };

    if let Some(message) = failure.message().filter(|m| !m.is_empty()) {
        return message.to_owned();
    }

    match failure.body() {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(body) if !body.is_null() && !body.is_string() => body.to_string(),
        _ if !failure.status_text().is_empty() => {
            format!("{}: {}", failure.status().as_u16(), failure.status_text())
        }
        _ => default.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, process};

    use reqwest::{
        cookie::CookieStore as _,
        header::{self, HeaderMap, HeaderValue},
    };
    use serde_json::json;

    use crate::{
        error::Result,
        gateway::{reservation, Executor as _},
        http::testing::Fake,
        storage::{File, Memory},
    };

    use super::*;

    fn config() -> Result<Config> {
        Ok(Config::new(url::Url::parse("http://cinema.test/api/")?))
    }

    fn alice() -> UserSummary {
        UserSummary {
            username: "alice".to_owned(),
            role: Role::User,
        }
    }

    fn password(value: &str) -> SecretString {
        SecretString::new(value.to_owned())
    }

    fn cookie_store(fake: Fake, snapshot: &Memory<UserSummary>) -> Result<Store> {
        Ok(Store::new(
            config()?,
            fake,
            Box::new(snapshot.clone()),
            Credential::Cookie(None),
        ))
    }

    fn bearer_store(
        fake: Fake,
        snapshot: &Memory<UserSummary>,
        tokens: &Memory<Token>,
    ) -> Result<Store> {
        Ok(Store::new(
            config()?,
            fake,
            Box::new(snapshot.clone()),
            Credential::Bearer(Arc::new(Bearer::new(Box::new(tokens.clone())))),
        ))
    }

    #[tokio::test]
    async fn login_stores_identity_in_memory_and_snapshot() -> Result<()> {
        let fake = Fake::new().respond(200, json!({"data": {"username": "alice", "role": "user"}}));
        let requests = fake.requests();
        let mut snapshot = Memory::new();
        let store = cookie_store(fake, &snapshot)?;

        let outcome = store.login("alice", password("pw1"), None).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Login successful");
        assert_eq!(outcome.data, Some(alice()));
        let session = store.session().await;
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some(&alice()));
        assert_eq!(snapshot.get().await?, Some(alice()));

        let sent = requests.lock().await;
        assert_eq!(sent[0].url().path(), "/api/users/login");
        assert_eq!(
            sent[0].body(),
            Some(&json!({"username": "alice", "password": "pw1"}))
        );
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_reports_server_message() -> Result<()> {
        let fake = Fake::new().respond(401, json!({"message": "invalid credentials"}));
        let mut snapshot = Memory::new();
        let store = cookie_store(fake, &snapshot)?;

        let outcome = store.login("bob", password("wrong"), None).await;

        assert_eq!(
            outcome,
            Outcome {
                success: false,
                message: "invalid credentials".to_owned(),
                data: None,
            }
        );
        assert!(!store.is_authenticated().await);
        assert_eq!(snapshot.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn failure_messages_fall_back_in_order() -> Result<()> {
        let fake = Fake::new()
            .respond(400, json!("username is required"))
            .respond(409, json!({"code": "USER_CONFLICTS"}))
            .respond(500, Value::Null)
            .unreachable();
        let store = cookie_store(fake, &Memory::new())?;

        let mut messages = Vec::new();
        for _ in 0..4 {
            messages.push(store.login("bob", password("pw"), None).await.message);
        }

        assert_eq!(
            messages,
            vec![
                "username is required".to_owned(),
                r#"{"code":"USER_CONFLICTS"}"#.to_owned(),
                "500: Internal Server Error".to_owned(),
                "Login failed".to_owned(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn login_without_identity_fails() -> Result<()> {
        let fake = Fake::new().respond(200, json!({"data": {"status": "Login successfully"}}));
        let store = cookie_store(fake, &Memory::new())?;

        let outcome = store.login("alice", password("pw1"), None).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Login failed");
        assert!(!store.is_authenticated().await);
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_everything_even_when_the_server_is_gone() -> Result<()> {
        let fake = Fake::new()
            .respond(200, json!({"data": {"username": "alice", "role": "user"}}))
            .unreachable();
        let mut snapshot = Memory::new();
        let store = cookie_store(fake, &snapshot)?;
        let _ = store.login("alice", password("pw1"), None).await;

        let outcome = store.logout().await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Logout failed");
        assert_eq!(store.session().await, Session::default());
        assert_eq!(snapshot.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn logout_reports_success() -> Result<()> {
        let fake = Fake::new().respond(200, json!({"data": "Logged out successfully"}));
        let store = cookie_store(fake, &Memory::with(alice()))?;
        let _ = store.check_auth().await;

        let outcome = store.logout().await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Logged out successfully");
        assert!(!store.is_authenticated().await);
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_restores_snapshot_without_network() -> Result<()> {
        let fake = Fake::new();
        let requests = fake.requests();
        let store = cookie_store(fake, &Memory::with(alice()))?;

        let session = store.check_auth().await;
        let again = store.check_auth().await;

        assert_eq!(session.user(), Some(&alice()));
        assert_eq!(session, again);
        assert_eq!(store.user().await, Some(alice()));
        assert!(requests.lock().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_without_snapshot_stays_anonymous() -> Result<()> {
        let store = cookie_store(Fake::new(), &Memory::new())?;
        assert!(!store.check_auth().await.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_discards_corrupt_snapshot() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("boxoffice-{}-corrupt", process::id()));
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("user.json"), br#"{"username": "alice", "ro"#)?;

        let store = Store::new(
            config()?,
            Fake::new(),
            Box::new(File::in_dir(&dir, "user")),
            Credential::Cookie(None),
        );

        let session = store.check_auth().await;

        assert!(!session.is_authenticated());
        assert!(!dir.join("user.json").exists());
        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_discards_nameless_snapshot() -> Result<()> {
        let mut snapshot = Memory::with(UserSummary {
            username: String::new(),
            role: Role::Admin,
        });
        let store = cookie_store(Fake::new(), &snapshot)?;

        assert!(!store.check_auth().await.is_authenticated());
        assert_eq!(snapshot.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_response_ends_session_and_still_fails() -> Result<()> {
        let fake = Fake::new().respond(401, json!({"message": "token expired"}));
        let mut snapshot = Memory::with(alice());
        let store = cookie_store(fake, &snapshot)?;
        let _ = store.check_auth().await;
        assert!(store.is_authenticated().await);

        let result = reservation::GetMyReservations
            .execute(store.adapter())
            .await;

        assert!(matches!(result, Err(http::Error::Auth(_))));
        assert!(!store.is_authenticated().await);
        assert_eq!(snapshot.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn other_failures_leave_session_alone() -> Result<()> {
        let fake = Fake::new().respond(403, json!({"message": "admins only"}));
        let store = cookie_store(fake, &Memory::with(alice()))?;
        let _ = store.check_auth().await;

        let result = reservation::CancelReservation { id: 1 }
            .execute(store.adapter())
            .await;

        assert!(matches!(result, Err(http::Error::Validation(_))));
        assert!(store.is_authenticated().await);
        Ok(())
    }

    async fn cookie_jar(saved: &Memory<String>) -> Result<Arc<Cookies>> {
        let url = url::Url::parse("http://cinema.test/api/")?;
        Ok(Arc::new(Cookies::load(url, Box::new(saved.clone())).await))
    }

    #[tokio::test]
    async fn logout_forgets_saved_cookie_when_the_server_is_gone() -> Result<()> {
        let mut saved = Memory::with("jwt=abc".to_owned());
        let cookies = cookie_jar(&saved).await?;
        let store = Store::new(
            config()?,
            Fake::new().unreachable(),
            Box::new(Memory::with(alice())),
            Credential::Cookie(Some(Arc::clone(&cookies))),
        );
        let _ = store.check_auth().await;

        let outcome = store.logout().await;

        assert!(!outcome.success);
        assert!(!store.is_authenticated().await);
        assert_eq!(saved.get().await?, None);
        assert_eq!(
            cookies.cookies(&url::Url::parse("http://cinema.test/api/")?),
            None
        );
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_response_forgets_saved_cookie() -> Result<()> {
        let mut saved = Memory::with("jwt=expired".to_owned());
        let store = Store::new(
            config()?,
            Fake::new().respond(401, json!({"message": "session expired"})),
            Box::new(Memory::with(alice())),
            Credential::Cookie(Some(cookie_jar(&saved).await?)),
        );
        let _ = store.check_auth().await;

        let result = reservation::GetMyReservations
            .execute(store.adapter())
            .await;

        assert!(matches!(result, Err(http::Error::Auth(_))));
        assert_eq!(saved.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn overlapping_logout_and_unauthorized_end_anonymous() -> Result<()> {
        let fake = Fake::new()
            .respond(401, json!({"message": "token expired"}))
            .respond(401, json!({"message": "token expired"}));
        let mut snapshot = Memory::with(alice());
        let mut tokens = Memory::with(Token::new("t0k".to_owned()));
        let store = bearer_store(fake, &snapshot, &tokens)?;
        assert!(store.check_auth().await.is_authenticated());

        let (outcome, result) = tokio::join!(
            store.logout(),
            reservation::GetMyReservations.execute(store.adapter())
        );

        assert!(!outcome.success);
        assert!(matches!(result, Err(http::Error::Auth(_))));
        assert_eq!(store.session().await, Session::default());
        assert_eq!(snapshot.get().await?, None);
        assert!(tokens.get().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_discards_bearer_session_without_token() -> Result<()> {
        let fake = Fake::new();
        let requests = fake.requests();
        let mut snapshot = Memory::with(alice());
        let store = bearer_store(fake, &snapshot, &Memory::new())?;

        assert!(!store.check_auth().await.is_authenticated());
        assert_eq!(snapshot.get().await?, None);
        assert!(requests.lock().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalidation_is_idempotent() -> Result<()> {
        let mut snapshot = Memory::with(alice());
        let store = cookie_store(Fake::new(), &snapshot)?;
        let _ = store.check_auth().await;

        store.invalidate().await;
        store.invalidate().await;

        assert!(!store.is_authenticated().await);
        assert_eq!(snapshot.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn bearer_login_saves_token_and_sends_it() -> Result<()> {
        let fake = Fake::new()
            .respond(
                200,
                json!({"data": {"username": "alice", "role": "user", "token": "t0k"}}),
            )
            .respond(200, json!({"data": []}));
        let requests = fake.requests();
        let mut snapshot = Memory::new();
        let mut tokens = Memory::new();
        let store = bearer_store(fake, &snapshot, &tokens)?;

        assert!(store.login("alice", password("pw1"), None).await.success);
        let _ = reservation::GetMyReservations
            .execute(store.adapter())
            .await?;

        let sent = requests.lock().await;
        assert!(!sent[0].headers().contains_key(header::AUTHORIZATION));
        assert_eq!(
            sent[1]
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer t0k")
        );
        assert!(tokens.get().await?.is_some());
        let saved = serde_json::to_value(snapshot.get().await?)?;
        assert_eq!(saved, json!({"username": "alice", "role": "user"}));
        Ok(())
    }

    #[tokio::test]
    async fn bearer_token_may_come_from_header() -> Result<()> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer h3ad"));
        let fake = Fake::new().respond_with(
            200,
            json!({"data": {"username": "alice", "role": "user"}}),
            headers,
        );
        let mut tokens = Memory::new();
        let store = bearer_store(fake, &Memory::new(), &tokens)?;

        assert!(store.login("alice", password("pw1"), None).await.success);
        assert_eq!(
            serde_json::to_value(tokens.get().await?)?,
            json!("h3ad")
        );
        Ok(())
    }

    #[tokio::test]
    async fn bearer_login_without_token_fails() -> Result<()> {
        let fake = Fake::new().respond(200, json!({"data": {"username": "alice", "role": "user"}}));
        let mut snapshot = Memory::new();
        let store = bearer_store(fake, &snapshot, &Memory::new())?;

        let outcome = store.login("alice", password("pw1"), None).await;

        assert!(!outcome.success);
        assert!(!store.is_authenticated().await);
        assert_eq!(snapshot.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn bearer_token_is_dropped_on_unauthorized() -> Result<()> {
        let fake = Fake::new().respond(401, Value::Null);
        let mut tokens = Memory::with(Token::new("stale".to_owned()));
        let store = bearer_store(fake, &Memory::with(alice()), &tokens)?;
        let _ = store.check_auth().await;

        let result = reservation::GetMyReservations
            .execute(store.adapter())
            .await;

        assert!(matches!(result, Err(http::Error::Auth(_))));
        assert!(tokens.get().await?.is_none());
        assert!(!store.is_authenticated().await);
        Ok(())
    }

    #[tokio::test]
    async fn register_reports_without_logging_in() -> Result<()> {
        let fake = Fake::new()
            .respond(201, json!({"data": "Created user named carol successfully"}))
            .respond(
                409,
                json!({"code": "USER_CONFLICTS", "message": "User named carol already exists"}),
            );
        let requests = fake.requests();
        let store = cookie_store(fake, &Memory::new())?;

        let created = store
            .register(
                "carol",
                password("pw"),
                Role::Admin,
                Some("captcha-1".to_owned()),
                Some(password("elevate")),
            )
            .await;
        let duplicate = store
            .register("carol", password("pw"), Role::User, None, None)
            .await;

        assert_eq!(
            created,
            Outcome {
                success: true,
                message: "Created user named carol successfully".to_owned(),
                data: Some(()),
            }
        );
        assert!(!duplicate.success);
        assert_eq!(duplicate.message, "User named carol already exists");
        assert!(!store.is_authenticated().await);
        assert_eq!(
            requests.lock().await[0].body(),
            Some(&json!({
                "username": "carol",
                "password": "pw",
                "user_role": "admin",
                "key": "captcha-1",
                "admin_role_password": "elevate",
            }))
        );
        Ok(())
    }
}
