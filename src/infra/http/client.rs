use async_trait::async_trait;
use blogdesk_api_types::{
    ApiErrorBody, BlogCreateRequest, BlogEntity, BlogId, BlogPage, BlogUpdateRequest,
    parse_created_id,
};
use bytes::Bytes;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::backend::{BackendError, BlogBackend, ListQuery};
use crate::config::BackendSettings;
use crate::domain::locale::LocaleTag;
use crate::domain::media::MediaAttachment;
use crate::infra::error::InfraError;

const BLOG_ID_HEADER: &str = "blogId";
const MEDIA_FIELD: &str = "file";

/// `reqwest` implementation of [`BlogBackend`].
#[derive(Clone, Debug)]
pub struct HttpBlogBackend {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpBlogBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, InfraError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self {
            client,
            base: endpoint_base(&settings.base_url, &settings.base_path),
            token: settings.api_token.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, endpoint: &str) -> Result<Url, BackendError> {
        self.base.join(endpoint).map_err(BackendError::transport)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "backend request");
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(req: RequestBuilder) -> Result<Bytes, BackendError> {
        let resp = req.send().await.map_err(BackendError::transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(BackendError::transport)?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message);
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(bytes)
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
        serde_json::from_slice(bytes)
            .map_err(|err| BackendError::decode(format!("failed to parse body: {err}")))
    }
}

#[async_trait]
impl BlogBackend for HttpBlogBackend {
    async fn list(&self, query: &ListQuery) -> Result<BlogPage, BackendError> {
        let mut url = self.url("all")?;
        url.query_pairs_mut()
            .append_pair("page", &query.page.to_string())
            .append_pair("size", &query.size.to_string());

        let req = self
            .request(Method::GET, url)
            .header(ACCEPT_LANGUAGE, query.locale.as_str());
        let bytes = Self::send(req).await?;
        Self::decode(&bytes)
    }

    async fn get_by_id(&self, id: BlogId, locale: &LocaleTag) -> Result<BlogEntity, BackendError> {
        let req = self
            .request(Method::GET, self.url("by-id")?)
            .header(BLOG_ID_HEADER, id.to_string())
            .header(ACCEPT_LANGUAGE, locale.as_str());
        let bytes = Self::send(req).await?;
        Self::decode(&bytes)
    }

    async fn create(
        &self,
        request: &BlogCreateRequest,
        locale: &LocaleTag,
    ) -> Result<Option<BlogId>, BackendError> {
        let req = self
            .request(Method::POST, self.url("create")?)
            .header(ACCEPT_LANGUAGE, locale.as_str())
            .json(request);
        let bytes = Self::send(req).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        // Bare scalar body; tolerate a plain-text identifier as well.
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });
        Ok(parse_created_id(&value))
    }

    async fn update(&self, request: &BlogUpdateRequest) -> Result<(), BackendError> {
        let req = self
            .request(Method::POST, self.url("update")?)
            .json(request);
        Self::send(req).await?;
        Ok(())
    }

    async fn upload_media(
        &self,
        id: BlogId,
        media: &MediaAttachment,
        locale: &LocaleTag,
    ) -> Result<(), BackendError> {
        let part = Part::bytes(media.bytes().to_vec())
            .file_name(media.file_name().to_string())
            .mime_str(media.content_type())
            .map_err(BackendError::transport)?;
        let form = Form::new().part(MEDIA_FIELD, part);

        let req = self
            .request(Method::POST, self.url("upload-media")?)
            .header(BLOG_ID_HEADER, id.to_string())
            .header(ACCEPT_LANGUAGE, locale.as_str())
            .multipart(form);
        Self::send(req).await?;
        Ok(())
    }

    async fn toggle_active(&self, id: BlogId, locale: &LocaleTag) -> Result<(), BackendError> {
        let req = self
            .request(Method::POST, self.url("update-activate")?)
            .header(BLOG_ID_HEADER, id.to_string())
            .header(ACCEPT_LANGUAGE, locale.as_str());
        Self::send(req).await?;
        Ok(())
    }
}

/// Append `base_path` to whatever path `base_url` already carries.
fn endpoint_base(base_url: &Url, base_path: &str) -> Url {
    let mut base = base_url.clone();
    let prefix = base.path().trim_end_matches('/').to_string();
    let scoped = base_path.trim_matches('/');
    let path = if scoped.is_empty() {
        format!("{prefix}/")
    } else {
        format!("{prefix}/{scoped}/")
    };
    base.set_path(&path);
    base.set_query(None);
    base
}
