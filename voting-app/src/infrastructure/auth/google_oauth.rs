use crate::domain::Identity;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;
use voting_errors::AppError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUserInfo> for Identity {
    fn from(info: GoogleUserInfo) -> Self {
        Identity {
            provider_id: format!("google:{}", info.sub),
            email: info.email,
            name: info.name,
            avatar_url: info.picture.filter(|url| !url.is_empty()),
        }
    }
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

/// Sign-in with a Google account, authorization code flow with PKCE.
#[derive(Clone)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    token_client: oauth2::reqwest::Client,
    http_client: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Result<Self, AppError> {
        let invalid = |e: oauth2::url::ParseError| AppError::Internal(format!("OAuth config: {}", e));
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(invalid)?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(invalid)?;
        let redirect = RedirectUrl::new(redirect_uri.to_string()).map_err(invalid)?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        // Redirects are refused during the token exchange.
        let token_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            redirect_uri: redirect,
            token_client,
            http_client: reqwest::Client::new(),
        })
    }

    /// Authorization URL plus the CSRF token and PKCE verifier to keep in the session.
    pub fn authorize_url(&self) -> (String, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        (auth_url.to_string(), csrf_token, pkce_verifier)
    }

    /// Exchanges the callback code for a token and reads who signed in.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<Identity, AppError> {
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.token_client)
            .await
            .map_err(|e| AppError::Backend(format!("Token exchange failed: {:?}", e)))?;

        let access_token = token_result.access_token().secret();

        let user_info = self
            .http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to fetch user info: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Backend(format!("User info rejected: {}", e)))?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse user info: {}", e)))?;

        Ok(user_info.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_pkce_and_state() {
        let oauth = GoogleOAuth::new("client", "secret", "http://localhost:3000/auth/callback")
            .unwrap();
        let (url, csrf, _verifier) = oauth.authorize_url();
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("code_challenge="));
        assert!(url.contains(&format!("state={}", csrf.secret())));
    }

    #[test]
    fn test_user_info_maps_to_identity() {
        let identity: Identity = GoogleUserInfo {
            sub: "42".to_string(),
            email: Some("ana@example.com".to_string()),
            name: Some("Ana".to_string()),
            picture: Some(String::new()),
        }
        .into();
        assert_eq!(identity.provider_id, "google:42");
        assert_eq!(identity.avatar_url, None);
    }

    #[test]
    fn test_bad_redirect_is_config_error() {
        assert!(matches!(
            GoogleOAuth::new("client", "secret", "not a url"),
            Err(AppError::Internal(_))
        ));
    }
}
