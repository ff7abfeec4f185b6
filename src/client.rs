use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::node::Directory;
use crate::path::VfsPath;

const JSON_CONTENT_TYPE: &str = "application/json";

/// The remote tree store as seen by the navigation layer. Calls block until the
/// store answers.
pub trait TreeStoreClient {
    fn list_directory(&self, path: &VfsPath) -> Result<Directory>;
    fn read_file(&self, path: &VfsPath) -> Result<Vec<u8>>;
}

impl<T: TreeStoreClient + ?Sized> TreeStoreClient for &T {
    fn list_directory(&self, path: &VfsPath) -> Result<Directory> {
        (**self).list_directory(path)
    }

    fn read_file(&self, path: &VfsPath) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// Client for the Kudu `/api/vfs/` endpoint, authenticated with HTTP Basic.
pub struct VfsClient {
    http: Client,
    config: Configuration,
}

impl VfsClient {
    pub fn new(config: &Configuration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(VfsClient {
            http,
            config: config.clone(),
        })
    }

    fn get(&self, path: &VfsPath) -> Result<Response> {
        let url = endpoint(&self.config.publish_url, path);
        info!(%url, "fetching from store");
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "store rejected request");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response)
    }
}

impl TreeStoreClient for VfsClient {
    fn list_directory(&self, path: &VfsPath) -> Result<Directory> {
        let response = self.get(path)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if !is_listing(content_type) {
            return Err(Error::NotADirectory(path.to_string()));
        }
        let body = response.bytes()?;
        Directory::decode(path.clone(), &body)
    }

    fn read_file(&self, path: &VfsPath) -> Result<Vec<u8>> {
        Ok(self.get(path)?.bytes()?.to_vec())
    }
}

fn endpoint(publish_url: &str, path: &VfsPath) -> String {
    format!(
        "{}/api/vfs/{}",
        publish_url.trim_end_matches('/'),
        path.remote_segments()
    )
}

fn is_listing(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE))
}
