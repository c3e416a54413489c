use anyhow::Result;

use guia_core::entities::ImageRef;

use super::ImageStorageGateway;

/// Image store backed by the HTTP API of an external media service.
///
/// All requests are authenticated with a bearer token and run
/// synchronously on the calling thread.
#[derive(Debug, Clone)]
pub struct HttpImageStore {
    api_base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl HttpImageStore {
    pub fn new(api_base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key: api_key.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn image_url(&self, public_id: &str) -> String {
        // TODO: use url::Url
        format!("{}/images/{public_id}", self.api_base_url)
    }
}

#[derive(Debug, serde::Deserialize, thiserror::Error)]
#[error("{message}")]
struct JsonError {
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
struct JsonImage {
    url: String,
    public_id: String,
}

impl From<JsonImage> for ImageRef {
    fn from(from: JsonImage) -> Self {
        let JsonImage { url, public_id } = from;
        Self { url, public_id }
    }
}

fn expect_success(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let json_error: JsonError = response
            .json()
            .unwrap_or_else(|_| JsonError {
                message: format!("response status: {status}"),
            });
        Err(json_error.into())
    }
}

impl ImageStorageGateway for HttpImageStore {
    fn upload_image(&self, public_id: &str, bytes: &[u8]) -> Result<ImageRef> {
        log::debug!("Uploading {} bytes to {public_id}", bytes.len());
        let response = self
            .client
            .post(self.image_url(public_id))
            .bearer_auth(&self.api_key)
            .body(bytes.to_vec())
            .send()?;
        let image: JsonImage = expect_success(response)?.json()?;
        Ok(image.into())
    }

    fn rename_image(&self, from_public_id: &str, to_public_id: &str) -> Result<ImageRef> {
        log::debug!("Moving image {from_public_id} to {to_public_id}");
        let response = self
            .client
            .post(format!("{}/rename", self.image_url(from_public_id)))
            .bearer_auth(&self.api_key)
            .form(&[("to", to_public_id)])
            .send()?;
        let image: JsonImage = expect_success(response)?.json()?;
        Ok(image.into())
    }

    fn delete_image(&self, public_id: &str) -> Result<()> {
        log::debug!("Deleting image {public_id}");
        let response = self
            .client
            .delete(self.image_url(public_id))
            .bearer_auth(&self.api_key)
            .send()?;
        expect_success(response)?;
        Ok(())
    }

    fn delete_image_folder(&self, prefix: &str) -> Result<()> {
        log::debug!("Deleting image folder {prefix}");
        let response = self
            .client
            .delete(format!("{}/folders/{prefix}", self.api_base_url))
            .bearer_auth(&self.api_key)
            .send()?;
        expect_success(response)?;
        Ok(())
    }
}
