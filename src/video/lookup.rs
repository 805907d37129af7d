use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::DownloaderClient;
use crate::errors::{DEFAULT_UPSTREAM_MESSAGE, RequestError};

const DEFAULT_TITLE: &str = "Video";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    /// Any JSON value; only a truthy one counts as success.
    #[serde(default)]
    success: Option<Value>,
    #[serde(default)]
    result: Option<LookupResult>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LookupResult {
    title: Option<String>,
    download_url: Option<String>,
    thumbnail: Option<String>,
}

/// What the downloader API resolved a link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupMedia {
    pub title: String,
    pub download_url: String,
    pub thumbnail: Option<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl LookupResponse {
    fn succeeded(&self) -> bool {
        self.success.as_ref().is_some_and(is_truthy)
    }

    fn into_media(self) -> Result<LookupMedia, RequestError> {
        if !self.succeeded() {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string());
            return Err(RequestError::Upstream(message));
        }

        let result = self.result.unwrap_or_default();
        let download_url = result
            .download_url
            .filter(|u| !u.is_empty())
            .ok_or(RequestError::MissingDownloadUrl)?;

        Ok(LookupMedia {
            title: result
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            download_url,
            thumbnail: result.thumbnail.filter(|t| !t.is_empty()),
        })
    }
}

impl DownloaderClient {
    /// Ask the downloader API to resolve `url` into a direct media link.
    pub async fn lookup(&self, url: &str) -> Result<LookupMedia, RequestError> {
        let response = self
            .api
            .get(&self.api_url)
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RequestError::UpstreamHttp { status });
        }

        let body: LookupResponse = response.json().await?;
        debug!(
            "Lookup answered success={} has_result={}",
            body.succeeded(),
            body.result.is_some()
        );

        body.into_media()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, lookup_timeout: Duration) -> DownloaderClient {
        DownloaderClient::new(
            format!("{}/downloader/", server.uri()),
            lookup_timeout,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn successful_lookup_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/downloader/"))
            .and(query_param("url", "https://youtu.be/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": {
                    "title": "Test Video",
                    "download_url": "http://x/v.mp4",
                    "thumbnail": "http://x/t.jpg"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let media = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/abc123")
            .await
            .unwrap();

        assert_eq!(
            media,
            LookupMedia {
                title: "Test Video".into(),
                download_url: "http://x/v.mp4".into(),
                thumbnail: Some("http://x/t.jpg".into()),
            }
        );
    }

    #[tokio::test]
    async fn missing_title_defaults_to_video() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": { "download_url": "http://x/v.mp4" }
            })))
            .mount(&server)
            .await;

        let media = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/x")
            .await
            .unwrap();
        assert_eq!(media.title, "Video");
        assert_eq!(media.thumbnail, None);
    }

    #[tokio::test]
    async fn non_200_is_upstream_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::UpstreamHttp { status } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[tokio::test]
    async fn failure_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Video unavailable"
            })))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/x")
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Upstream(ref m) if m == "Video unavailable"));
    }

    #[tokio::test]
    async fn failure_without_message_uses_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/x")
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Upstream(ref m) if m == DEFAULT_UPSTREAM_MESSAGE));
    }

    #[tokio::test]
    async fn null_success_is_a_logical_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": null,
                "message": "Rate limited"
            })))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/x")
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Upstream(ref m) if m == "Rate limited"));
    }

    #[tokio::test]
    async fn numeric_success_flags_are_honoured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("url", "https://youtu.be/one"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": 1,
                "result": { "title": "One", "download_url": "http://x/1.mp4" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("url", "https://youtu.be/zero"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": 0,
                "message": "Nope"
            })))
            .mount(&server)
            .await;

        let client = client(&server, Duration::from_secs(5));
        let media = client.lookup("https://youtu.be/one").await.unwrap();
        assert_eq!(media.download_url, "http://x/1.mp4");

        let err = client.lookup("https://youtu.be/zero").await.unwrap_err();
        assert!(matches!(err, RequestError::Upstream(ref m) if m == "Nope"));
    }

    #[test]
    fn truthiness_follows_json_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!(2)));
    }

    #[tokio::test]
    async fn missing_download_url_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": { "title": "No link" }
            })))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .lookup("https://youtu.be/x")
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::MissingDownloadUrl));
    }

    #[tokio::test]
    async fn slow_api_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_millis(200))
            .lookup("https://youtu.be/x")
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Timeout));
    }
}
