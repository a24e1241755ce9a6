use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::models::{
    Company, CompanyUpdate, Contact, Credentials, Interaction, LoginResponse, NewCompany,
    NewContact, NewInteraction,
};
use crate::error::{Error, Result};

/// Header carrying the session token on every authenticated call.
pub const AUTH_HEADER: &str = "x-api-key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self> {
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url, token })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.header(AUTH_HEADER, t),
            None => req,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!("{method} {url}");
        self.with_auth(self.http.request(method, url))
    }

    async fn send(req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await.map_err(|e| {
            warn!("transport failure: {e}");
            Error::from(e)
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!("{} answered HTTP {}", resp.url(), status);
            return Err(Error::request(Some(status.as_u16()), format!("HTTP {status}")));
        }
        Ok(resp)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = Self::send(self.request(Method::GET, path)).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn submit<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<()> {
        Self::send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Exchange credentials for a token. Rejections of any kind map to `Error::Authentication`.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body = Credentials { username: username.to_string(), password: password.to_string() };
        let req = self.http.post(self.endpoint("/login")).json(&body);
        let resp = Self::send(req).await.map_err(|_| Error::Authentication)?;
        let json: LoginResponse = resp.json().await.map_err(|_| Error::Authentication)?;
        Ok(json.token)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        let body = Credentials { username: username.to_string(), password: password.to_string() };
        let req = self.http.post(self.endpoint("/register")).json(&body);
        Self::send(req).await.map_err(|_| Error::Registration)?;
        Ok(())
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        self.fetch("/companies").await
    }

    pub async fn get_company(&self, id: &str) -> Result<Company> {
        self.fetch(&format!("/companies/{id}")).await
    }

    pub async fn create_company(&self, company: &NewCompany) -> Result<()> {
        self.submit(Method::POST, "/companies", company).await
    }

    pub async fn update_company(&self, id: &str, update: &CompanyUpdate) -> Result<()> {
        self.submit(Method::PUT, &format!("/companies/{id}"), update).await
    }

    /// The backend cascades the delete to contacts and interactions.
    pub async fn delete_company(&self, id: &str) -> Result<()> {
        self.remove(&format!("/companies/{id}")).await
    }

    pub async fn list_contacts(&self, company_id: &str) -> Result<Vec<Contact>> {
        self.fetch(&format!("/companies/{company_id}/contacts")).await
    }

    pub async fn create_contact(&self, company_id: &str, contact: &NewContact) -> Result<()> {
        self.submit(Method::POST, &format!("/companies/{company_id}/contacts"), contact)
            .await
    }

    pub async fn delete_contact(&self, company_id: &str, contact_id: &str) -> Result<()> {
        self.remove(&format!("/companies/{company_id}/contacts/{contact_id}"))
            .await
    }

    pub async fn list_interactions(&self, company_id: &str) -> Result<Vec<Interaction>> {
        self.fetch(&format!("/companies/{company_id}/interactions")).await
    }

    pub async fn create_interaction(&self, company_id: &str, interaction: &NewInteraction) -> Result<()> {
        self.submit(
            Method::POST,
            &format!("/companies/{company_id}/interactions"),
            interaction,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = ApiClient::new(Url::parse("http://localhost:3000/").unwrap(), None).unwrap();
        assert_eq!(client.endpoint("/companies"), "http://localhost:3000/companies");

        let client = ApiClient::new(Url::parse("https://api.example.com/v1").unwrap(), None).unwrap();
        assert_eq!(client.endpoint("/login"), "https://api.example.com/v1/login");
    }

    #[test]
    fn token_attaches_header() {
        let client = ApiClient::new(Url::parse("http://localhost:3000").unwrap(), Some("tok".into())).unwrap();
        let req = client.request(Method::GET, "/companies").build().unwrap();
        assert_eq!(req.headers().get(AUTH_HEADER).unwrap(), "tok");

        let anon = client.with_token(None);
        let req = anon.request(Method::GET, "/companies").build().unwrap();
        assert!(req.headers().get(AUTH_HEADER).is_none());
    }
}
