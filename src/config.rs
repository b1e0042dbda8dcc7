use crate::{
    error::TaskyError,
    jira::auth::{Auth, AuthScheme},
};
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

const AUTH_FILENAME: &str = "auth.ron";
const CONFIG_FILENAME: &str = "config.ron";

pub const DOMAIN_VAR: &str = "JIRA_DOMAIN";
pub const EMAIL_VAR: &str = "JIRA_EMAIL";
pub const TOKEN_VAR: &str = "JIRA_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// `acme`, `acme.atlassian.net` or `https://jira.acme.com/`
    pub domain: String,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Credentials {
    /// Only needed for basic auth
    pub email: Option<String>,
    pub token: String,
    #[serde(default)]
    pub scheme: AuthScheme,
}

impl Config {
    pub fn base_url(&self) -> Result<Url, TaskyError> {
        let domain = self.domain.trim();
        let url = if domain.contains("://") {
            domain.to_owned()
        } else if domain.contains('.') || domain.contains(':') {
            format!("https://{domain}")
        } else {
            format!("https://{domain}.atlassian.net")
        };

        Url::parse(&url).map_err(|e| TaskyError::InvalidUrl(self.domain.clone(), e.to_string()))
    }
}

impl Credentials {
    pub fn auth(&self) -> Result<Auth, TaskyError> {
        match self.scheme {
            AuthScheme::Basic => Ok(Auth::Basic {
                email: self.email.clone().ok_or(TaskyError::MissingEmail)?,
                token: self.token.clone(),
            }),
            AuthScheme::Bearer => Ok(Auth::Bearer {
                token: self.token.clone(),
            }),
        }
    }
}

impl From<&Auth> for Credentials {
    fn from(auth: &Auth) -> Self {
        let (email, token) = match auth {
            Auth::Basic { email, token } => (Some(email.clone()), token.clone()),
            Auth::Bearer { token } => (None, token.clone()),
        };

        Self {
            email,
            token,
            scheme: auth.scheme(),
        }
    }
}

/// Merges the saved files with `$JIRA_DOMAIN`, `$JIRA_EMAIL` and `$JIRA_API_TOKEN`,
/// the environment taking precedence
pub fn resolve(
    config: Option<Config>,
    credentials: Option<Credentials>,
    var: impl Fn(&str) -> Option<String>,
) -> Result<(Url, Auth), TaskyError> {
    let config = match var(DOMAIN_VAR) {
        Some(domain) => Config { domain },
        None => config.ok_or(TaskyError::MissingConfigurations)?,
    };

    let credentials = match (var(TOKEN_VAR), credentials) {
        (Some(token), saved) => {
            debug!("Using API token from ${TOKEN_VAR}");
            let saved_email = saved.and_then(|c| c.email);
            Credentials {
                email: var(EMAIL_VAR).or(saved_email),
                token,
                scheme: AuthScheme::Basic,
            }
        }
        (None, Some(mut saved)) => {
            if let Some(email) = var(EMAIL_VAR) {
                saved.email = Some(email);
            }
            saved
        }
        (None, None) => Err(TaskyError::MissingConfigurations)?,
    };

    Ok((config.base_url()?, credentials.auth()?))
}

/// [`resolve`] against the files in `root` and the process environment
pub fn load(root: &Path) -> Result<(Url, Auth), TaskyError> {
    resolve(
        Config::try_read(root)?,
        Credentials::try_read(root)?,
        |name| env::var(name).ok().filter(|value| !value.is_empty()),
    )
}

impl Saveable for Credentials {
    fn path(root: &Path) -> PathBuf {
        root.join(AUTH_FILENAME)
    }
}

impl Saveable for Config {
    fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILENAME)
    }
}

pub trait Saveable: Serialize + DeserializeOwned {
    fn path(root: &Path) -> PathBuf;

    fn save(&self, root: &Path) -> Result<(), TaskyError> {
        let path = Self::path(root);
        debug!("Saving {}", path.display());

        fs::write(path, ron::to_string(self)?)?;

        Ok(())
    }

    /// `None` when the file was never saved
    fn try_read(root: &Path) -> Result<Option<Self>, TaskyError> {
        let path = Self::path(root);
        let config = match fs::read_to_string(path) {
            Ok(config) => config,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => Err(error)?,
        };

        Ok(Some(ron::from_str(&config)?))
    }
}
