use async_trait::async_trait;
use common::{
    api::{self, Endpoint, Form, Method, Reply},
    consts::API_PREFIX,
};
use derivative::Derivative;
use eyre::WrapErr;
use reqwest::multipart;
use tracing::trace;

/// Something able to answer endpoint calls, the HTTP client or a test double.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn call<E: Endpoint>(&self, endpoint: E) -> api::Result<E::Ret>;
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ApiClient {
    #[derivative(Debug = "ignore")]
    reqwest_client: reqwest::Client,
    url: String, // server root, without the api prefix
}

impl ApiClient {
    pub fn new(url: &str) -> Self {
        Self {
            reqwest_client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn endpoint_url<E: Endpoint>(&self) -> String {
        format!("{}/{}/{}", self.url, API_PREFIX, E::PATH)
    }
}

fn into_multipart(form: Form) -> multipart::Form {
    let (texts, files) = form.into_parts();
    let mut out = multipart::Form::new();
    for (name, value) in texts {
        out = out.text(name, value);
    }
    for (name, upload) in files {
        out = out.part(name, multipart::Part::bytes(upload.bytes).file_name(upload.filename));
    }
    out
}

#[async_trait]
impl Backend for ApiClient {
    async fn call<E: Endpoint>(&self, endpoint: E) -> api::Result<E::Ret> {
        let url = self.endpoint_url::<E>();
        trace!(%url, "calling {}", E::DISPLAY_NAME);

        // no retries, a failed call is reported to the user as is
        let req = match E::METHOD {
            Method::Get => self.reqwest_client.get(&url),
            Method::Post => self.reqwest_client.post(&url).multipart(into_multipart(endpoint.into_form())),
        };
        let res = req
            .send()
            .await
            .wrap_err("Reqwest error")
            .map_err(api::Error::ClientSideError)?;

        let body = res
            .bytes()
            .await
            .wrap_err("Body error")
            .map_err(api::Error::ClientSideError)?;

        let reply: Reply<E::Ret> = serde_json::from_slice(&body)
            .wrap_err("Deserialization error")
            .map_err(api::Error::ClientSideError)?;
        reply.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::api::{CalculateChecksum, HashAlgorithms};

    #[test]
    fn urls() {
        let client = ApiClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.endpoint_url::<CalculateChecksum>(), "http://127.0.0.1:5000/api/calculate-checksum");
        assert_eq!(client.endpoint_url::<HashAlgorithms>(), "http://127.0.0.1:5000/api/hash-algorithms");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_client_side_error() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.call(HashAlgorithms).await.unwrap_err();
        assert!(matches!(err, api::Error::ClientSideError(_)));
    }
}
