use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;
use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::error::{Error, Result};

const PROFILE_ELEMENT: &str = "publishProfile";

/// Credentials and endpoint of the remote store. Built once, then handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub user: String,
    pub password: String,
    pub publish_url: String,
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("publish_url", &self.publish_url)
            .finish()
    }
}

impl Configuration {
    /// Either a publish settings file, or all three discrete values. Never both.
    pub fn from_options(
        user: Option<String>,
        password: Option<String>,
        publish_url: Option<String>,
        profile_file: Option<&Path>,
    ) -> Result<Self> {
        let any_set = user.is_some() || password.is_some() || publish_url.is_some();

        if let Some(profile_file) = profile_file {
            if any_set {
                return Err(Error::ConflictingConfiguration);
            }
            return Configuration::from_profile_file(profile_file);
        }

        match (user, password, publish_url) {
            (Some(user), Some(password), Some(publish_url)) => Ok(Configuration {
                user,
                password,
                publish_url,
            }),
            _ => Err(Error::IncompleteConfiguration),
        }
    }

    pub fn from_profile_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading publish settings");
        let xml = fs::read_to_string(path).map_err(|source| Error::ProfileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Configuration::from_profile_xml(&xml)
    }

    /// Reads the first `publishProfile` element. Its `publishUrl` is a bare host, so
    /// an `https://` scheme is prepended.
    pub fn from_profile_xml(xml: &str) -> Result<Self> {
        let mut in_profile = false;
        let mut found = false;
        let mut user = None;
        let mut password = None;
        let mut publish_url = None;

        for token in Tokenizer::from(xml) {
            let token = token.map_err(|e| Error::Profile(e.to_string()))?;
            match token {
                Token::ElementStart { local, .. } => {
                    in_profile = local.as_str() == PROFILE_ELEMENT;
                    found |= in_profile;
                }
                Token::Attribute { local, value, .. } if in_profile => {
                    let value = unescape(value.as_str());
                    match local.as_str() {
                        "userName" => user = Some(value),
                        "userPWD" => password = Some(value),
                        "publishUrl" => publish_url = Some(value),
                        _ => {}
                    }
                }
                Token::ElementEnd {
                    end: ElementEnd::Open | ElementEnd::Empty,
                    ..
                } if in_profile => break,
                _ => {}
            }
        }

        if !found {
            return Err(Error::Profile(format!("no {PROFILE_ELEMENT} element found")));
        }
        let require = |value: Option<String>, attr: &str| {
            value.ok_or_else(|| {
                Error::Profile(format!("{PROFILE_ELEMENT} is missing the `{attr}` attribute"))
            })
        };
        Ok(Configuration {
            user: require(user, "userName")?,
            password: require(password, "userPWD")?,
            publish_url: format!("https://{}", require(publish_url, "publishUrl")?),
        })
    }
}

/// Resolves the predefined XML entities and numeric character references
/// (`&#36;`, `&#x24;`). Unknown or malformed references are kept as written.
fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let resolved = rest
            .find(';')
            .and_then(|end| resolve_reference(&rest[1..end]).map(|c| (c, end)));
        match resolved {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => name.strip_prefix('#')?.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
