use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::new_subscriber::NewSubscriber;

pub const DEFAULT_BASE_URL: &str = "https://api.createsend.com/api/v3.1";
pub const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

// The remote API takes the key as the basic auth user name and ignores the password.
const API_KEY_PASSWORD: &str = "x";

/// HTTP client for the remote subscriber-list API.
pub struct ListClient {
    http_client: Client,
    base_url: Url,
    api_key: Secret<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ListDescriptor {
    #[serde(rename = "ListID")]
    pub list_id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct UnsubscribeBody<'a> {
    email_address: &'a str,
}

/// Only URLs that can carry a path are accepted, since every endpoint is appended to it.
pub fn parse_base_url(base_url: &str) -> Result<Url, String> {
    let url = Url::parse(base_url.trim())
        .map_err(|err| format!("{} is not a valid base url: {}", base_url, err))?;

    if url.cannot_be_a_base() {
        return Err(format!("{} cannot be used as a base url", base_url));
    }

    Ok(url)
}

impl ListClient {
    pub fn new(
        base_url: Url,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<ListClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(ListClient {
            http_client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends each segment to the base url, percent-encoding `/`, `?`, `#` and friends
    /// so ids can never change the endpoint.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        // A base url without a path is left untouched and the request fails on its scheme.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    #[tracing::instrument(name = "Listing the client lists", skip(self))]
    pub async fn list_lists(&self, client_id: &str) -> Result<Vec<ListDescriptor>, reqwest::Error> {
        let url = self.endpoint(&["clients", client_id, "lists.json"]);

        self.http_client
            .get(url)
            .basic_auth(self.api_key.expose_secret(), Some(API_KEY_PASSWORD))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    #[tracing::instrument(
        name = "Adding a subscriber to a list",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email_address)
    )]
    pub async fn add_subscriber(
        &self,
        list_id: &str,
        subscriber: &NewSubscriber,
    ) -> Result<(), reqwest::Error> {
        let list_file = format!("{}.json", list_id);
        let url = self.endpoint(&["subscribers", list_file.as_str()]);

        self.http_client
            .post(url)
            .basic_auth(self.api_key.expose_secret(), Some(API_KEY_PASSWORD))
            .json(subscriber)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        Ok(())
    }

    #[tracing::instrument(name = "Updating a list subscriber", skip(self, subscriber))]
    pub async fn update_subscriber(
        &self,
        list_id: &str,
        email: &str,
        subscriber: &NewSubscriber,
    ) -> Result<(), reqwest::Error> {
        let list_file = format!("{}.json", list_id);
        let url = self.endpoint(&["subscribers", list_file.as_str()]);

        self.http_client
            .put(url)
            .query(&[("email", email)])
            .basic_auth(self.api_key.expose_secret(), Some(API_KEY_PASSWORD))
            .json(subscriber)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    #[tracing::instrument(name = "Unsubscribing a list subscriber", skip(self))]
    pub async fn unsubscribe(&self, list_id: &str, email: &str) -> Result<(), reqwest::Error> {
        let url = self.endpoint(&["subscribers", list_id, "unsubscribe.json"]);

        self.http_client
            .post(url)
            .basic_auth(self.api_key.expose_secret(), Some(API_KEY_PASSWORD))
            .json(&UnsubscribeBody {
                email_address: email,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
