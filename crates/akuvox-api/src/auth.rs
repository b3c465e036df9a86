// Session authentication
//
// Token-based login against the SmartPlus property endpoint. The login
// reply carries the session token plus whatever profile attributes the
// cloud has for the account; updates are additive (see `SessionState`).

use reqwest::Method;
use reqwest::header::HeaderMap;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use crate::client::CloudClient;
use crate::error::Error;
use crate::models::LoginReply;

/// Login endpoint, relative to the cluster base URL.
const LOGIN_PATH: &str = "/property/login";

impl CloudClient {
    /// Authenticate with the stored credentials.
    ///
    /// `POST /property/login` with the account and password. On success
    /// the token and any profile fields present in the reply are stored;
    /// fields the reply omits keep their prior value. Fails with
    /// [`Error::NotAuthenticated`] when the credentials are rejected or
    /// the reply carries no token; every other dispatcher error
    /// propagates unchanged.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let _guard = self.lock_auth().await;
        self.login().await
    }

    /// The login flow proper. Callers must hold the auth lock.
    pub(crate) async fn login(&self) -> Result<(), Error> {
        let url = self.endpoint_url(LOGIN_PATH)?;
        debug!("logging in at {url}");

        let body = json!({
            "Account": self.credentials().username(),
            "passwd": self.credentials().password().expose_secret(),
        });

        let reply = self
            .dispatch(Method::POST, url, HeaderMap::new(), Some(&body))
            .await?;
        let reply = LoginReply::from_body(&reply);

        let Some(token) = reply.token else {
            return Err(Error::NotAuthenticated {
                message: "login reply did not include a session token".into(),
            });
        };

        let mut state = self.write_state();
        state.token = Some(token);
        if let Some(grade) = reply.grade {
            state.grade = Some(grade);
        }
        if let Some(account) = reply.account {
            state.account = Some(account);
        }
        if let Some(time_zone) = reply.time_zone {
            state.time_zone = Some(time_zone);
        }
        if let Some(community_id) = reply.community_id {
            state.community_id = Some(community_id);
        }
        if let Some(role) = reply.role {
            state.role = Some(role);
        }
        drop(state);

        debug!("login successful");
        Ok(())
    }

    /// `true` once a login has stored a session token. Pure; never
    /// touches the network.
    pub fn is_authenticated(&self) -> bool {
        self.read_state().token.is_some()
    }

    /// The current session token.
    ///
    /// Fails with [`Error::NotAuthenticated`] before the first successful
    /// login; never yields an empty placeholder.
    pub fn token(&self) -> Result<String, Error> {
        self.read_state()
            .token
            .clone()
            .ok_or_else(|| Error::NotAuthenticated {
                message: "no session token; call authenticate() first".into(),
            })
    }

    /// Account grade reported at login.
    pub fn grade(&self) -> Option<String> {
        self.read_state().grade.clone()
    }

    /// Canonical account name reported at login.
    pub fn account(&self) -> Option<String> {
        self.read_state().account.clone()
    }

    /// Account time zone reported at login.
    pub fn time_zone(&self) -> Option<String> {
        self.read_state().time_zone.clone()
    }

    /// Default community id reported at login.
    pub fn community_id(&self) -> Option<String> {
        self.read_state().community_id.clone()
    }

    /// Account role reported at login.
    pub fn role(&self) -> Option<String> {
        self.read_state().role.clone()
    }
}
