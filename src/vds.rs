use std::fs::File;
use std::io;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::domain::{BoundingBox, Credentials, Product};
use crate::error::VdsError;

pub struct AreaRequest<'a> {
    pub bbox: &'a BoundingBox,
    pub date: &'a str,
    pub product: &'a Product,
    pub file_format: &'a str,
}

pub trait VdsClient: Send + Sync {
    fn fetch_area(&self, request: &AreaRequest<'_>, destination: &Path) -> Result<(), VdsError>;
}

#[derive(Debug)]
pub struct VdsHttpClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl VdsHttpClient {
    pub fn new(
        server: &str,
        credentials: Credentials,
        cert_check: bool,
    ) -> Result<Self, VdsError> {
        let base_url = Url::parse(&format!("https://{server}"))
            .map_err(|_| VdsError::InvalidServer(server.to_string()))?;
        if !cert_check {
            warn!("TLS certificate checking is disabled");
        }
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("vds-api-download/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| VdsError::VdsHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(None)
            .danger_accept_invalid_certs(!cert_check)
            .build()
            .map_err(|err| VdsError::VdsHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }
}

impl VdsClient for VdsHttpClient {
    fn fetch_area(&self, request: &AreaRequest<'_>, destination: &Path) -> Result<(), VdsError> {
        let http_request = self
            .client
            .get(self.base_url.clone())
            .basic_auth(&self.credentials.user, Some(&self.credentials.passwd))
            .query(&[
                ("lat_max", request.bbox.lat_max.as_str()),
                ("lat_min", request.bbox.lat_min.as_str()),
                ("lon_max", request.bbox.lon_max.as_str()),
                ("lon_min", request.bbox.lon_min.as_str()),
                ("date", request.date),
                ("product", request.product.as_str()),
                ("file_format", request.file_format),
                ("metadata", "false"),
                ("as_attachment", "true"),
            ])
            .build()
            .map_err(|err| VdsError::VdsHttp(err.to_string()))?;
        debug!("{}", http_request.url());
        let response = self
            .client
            .execute(http_request)
            .map_err(|err| VdsError::VdsHttp(err.to_string()))?;
        write_response_to_file(response, destination)
    }
}

fn write_response_to_file(
    mut response: reqwest::blocking::Response,
    destination: &Path,
) -> Result<(), VdsError> {
    if response.status() != StatusCode::OK {
        return Err(VdsError::VdsStatus {
            status: response.status().as_u16(),
        });
    }
    let mut file =
        File::create(destination).map_err(|err| VdsError::Filesystem(err.to_string()))?;
    io::copy(&mut response, &mut file).map_err(|err| VdsError::Filesystem(err.to_string()))?;
    Ok(())
}
