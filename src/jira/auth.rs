use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How requests to Jira are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Atlassian account email plus API token
    Basic { email: String, token: String },
    /// Personal access token
    Bearer { token: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum AuthScheme {
    #[default]
    Basic,
    Bearer,
}

impl Auth {
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { email, token } => request.basic_auth(email, Some(token)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }

    pub fn scheme(&self) -> AuthScheme {
        match self {
            Self::Basic { .. } => AuthScheme::Basic,
            Self::Bearer { .. } => AuthScheme::Bearer,
        }
    }
}

// Keeps tokens out of logs and `#[instrument]` spans
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("token", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Auth;
    use reqwest::{header::AUTHORIZATION, Client};

    fn header(auth: &Auth) -> String {
        let request = auth
            .apply(Client::new().get("http://localhost/"))
            .build()
            .unwrap();
        request.headers()[AUTHORIZATION].to_str().unwrap().to_owned()
    }

    #[test]
    fn test_basic_header() {
        let auth = Auth::Basic {
            email: "me@example.com".to_owned(),
            token: "secret".to_owned(),
        };
        // base64("me@example.com:secret")
        assert_eq!(header(&auth), "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0");
    }

    #[test]
    fn test_bearer_header() {
        let auth = Auth::Bearer {
            token: "pat-123".to_owned(),
        };
        assert_eq!(header(&auth), "Bearer pat-123");
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = Auth::Basic {
            email: "me@example.com".to_owned(),
            token: "secret".to_owned(),
        };
        let debug = format!("{auth:?}");
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("secret"));
    }
}
