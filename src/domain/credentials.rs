//! Access token handling and authenticated clone URLs.
//!
//! The token is embedded in the clone URL, so anything that might print the
//! URL or git's output goes through a masked `Display` or a [`Redactor`].

use std::fmt;

use url::Url;

use super::AppError;

const MASK: &str = "****";
const TOKEN_PASSWORD: &str = "x-oauth-basic";

/// Access token for the catalog remote. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

/// Split an `owner/name` catalog identifier.
pub fn parse_catalog_repo(id: &str) -> Result<(&str, &str), AppError> {
    let trimmed = id.trim();
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    match trimmed.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(AppError::InvalidCatalogRepo(id.to_string())),
    }
}

/// Clone URL for the catalog repository.
///
/// `Display` renders the URL with the credential masked; only
/// [`CloneUrl::expose`] hands out the real one, for the git invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct CloneUrl {
    url: Url,
}

impl CloneUrl {
    /// Build `<base>/<owner>/<name>.git`, embedding the token as userinfo.
    ///
    /// `file://` bases are used for local mirrors and carry no credential.
    pub fn authenticated(
        remote_base: &str,
        catalog_repo: &str,
        token: &AccessToken,
    ) -> Result<Self, AppError> {
        let (owner, name) = parse_catalog_repo(catalog_repo)?;
        let mut url = Url::parse(remote_base).map_err(|e| AppError::InvalidRemote {
            base: remote_base.to_string(),
            reason: e.to_string(),
        })?;

        let path = format!("{}/{}/{}.git", url.path().trim_end_matches('/'), owner, name);
        url.set_path(&path);

        if url.scheme() != "file" && url.has_host() {
            url.set_username(token.expose()).map_err(|_| AppError::InvalidRemote {
                base: remote_base.to_string(),
                reason: "URL cannot carry credentials".to_string(),
            })?;
            url.set_password(Some(TOKEN_PASSWORD)).map_err(|_| AppError::InvalidRemote {
                base: remote_base.to_string(),
                reason: "URL cannot carry credentials".to_string(),
            })?;
        }

        Ok(Self { url })
    }

    pub fn expose(&self) -> &str {
        self.url.as_str()
    }

    fn masked(&self) -> String {
        if self.url.username().is_empty() {
            return self.url.to_string();
        }
        let mut bare = self.url.clone();
        // Clearing userinfo cannot fail on a URL that already carries it.
        let _ = bare.set_password(None);
        let _ = bare.set_username("");
        bare.as_str().replacen("://", &format!("://{MASK}@"), 1)
    }
}

impl fmt::Display for CloneUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for CloneUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CloneUrl").field(&self.masked()).finish()
    }
}

/// Scrubs secrets out of free-form text such as git's stderr.
#[derive(Clone, Default)]
pub struct Redactor {
    secrets: Vec<String>,
}

impl Redactor {
    pub fn new(token: &AccessToken) -> Self {
        let mut redactor = Self::default();
        if !token.is_empty() {
            let raw = token.expose().to_string();
            if let Ok(mut probe) = Url::parse("https://host") {
                if probe.set_username(&raw).is_ok() && probe.username() != raw {
                    redactor.secrets.push(probe.username().to_string());
                }
            }
            redactor.secrets.push(raw);
        }
        redactor
    }

    pub fn redact(&self, text: &str) -> String {
        self.secrets.iter().fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), MASK))
    }
}

impl fmt::Debug for Redactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redactor").field("secrets", &self.secrets.len()).finish()
    }
}
