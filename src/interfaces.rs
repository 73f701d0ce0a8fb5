use crate::errors::Result;
use mockall::automock;
use reqwest::blocking::{Client, Response, multipart};

/// Status line and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// e.g. "400 Bad Request"
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Interface to the HTTP layer to facilitate testing
#[automock]
pub trait Transport {
    /// POST `fields` as `application/x-www-form-urlencoded`
    fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<HttpResponse>;

    /// POST `fields` plus one file part as `multipart/form-data`
    fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
        file_field: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<HttpResponse>;
}

/// Default implementation of Transport backed by a blocking reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(resp: Response) -> Result<HttpResponse> {
        let status = resp.status();
        let body = resp.text()?;
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.to_string(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<HttpResponse> {
        let resp = self.client.post(url).form(fields).send()?;
        Self::read(resp)
    }

    fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
        file_field: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<HttpResponse> {
        let mut form = multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key.clone(), value.clone());
        }
        let part = multipart::Part::bytes(content.to_vec()).file_name(file_name.to_string());
        form = form.part(file_field.to_string(), part);

        let resp = self.client.post(url).multipart(form).send()?;
        Self::read(resp)
    }
}
