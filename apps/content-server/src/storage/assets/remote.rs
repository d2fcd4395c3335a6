// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Remote object store backend.
//!
//! Speaks the bucket API of a Supabase-style storage service:
//!
//! - upload: `POST {base}/storage/v1/object/{bucket}/{path}`, 200/201 on success
//! - delete: `DELETE {base}/storage/v1/object/{bucket}/{path}`, 200/204 on success
//! - public: `{base}/storage/v1/object/public/{bucket}/{path}`
//!
//! Every request carries the service key both as a bearer token and as the
//! `apikey` header.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{AssetBackend, AssetError, AssetResult};
use crate::config::ObjectStoreConfig;

pub struct ObjectStoreBackend {
    http: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl ObjectStoreBackend {
    pub fn new(config: &ObjectStoreConfig) -> AssetResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssetError::UploadFailed {
                status: None,
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    fn object_url(&self, storage_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, storage_path
        )
    }
}

#[async_trait]
impl AssetBackend for ObjectStoreBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn put(&self, storage_path: &str, bytes: Vec<u8>, content_type: &str) -> AssetResult<()> {
        let response = self
            .http
            .post(self.object_url(storage_path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AssetError::UploadFailed {
                status: None,
                detail: format!("POST {storage_path} failed: {e}"),
            })?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(path = %storage_path, %status, body = %body, "Object store rejected upload");
        Err(AssetError::UploadFailed {
            status: Some(status.as_u16()),
            detail: body,
        })
    }

    async fn remove(&self, storage_path: &str) -> bool {
        let result = self
            .http
            .delete(self.object_url(storage_path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();
                status == StatusCode::OK || status == StatusCode::NO_CONTENT
            }
            Err(e) => {
                tracing::warn!(path = %storage_path, error = %e, "Object store delete request failed");
                false
            }
        }
    }

    fn public_url(&self, storage_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, storage_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::assets::{AssetGateway, UploadRequest, FILE_EXTENSIONS, IMAGE_EXTENSIONS};
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{HeaderMap, Method, Uri};
    use axum::response::{IntoResponse, Response};
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const KEY: &str = "service-key";
    const BUCKET: &str = "uploads";

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
    }

    /// In-process stand-in for the bucket API.
    #[derive(Clone)]
    struct MockStore {
        requests: Arc<Mutex<Vec<Recorded>>>,
        objects: Arc<Mutex<HashMap<String, Bytes>>>,
        upload_status: StatusCode,
    }

    async fn handle(
        State(store): State<MockStore>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let path = uri.path().to_string();
        store.requests.lock().unwrap().push(Recorded {
            method: method.clone(),
            path: path.clone(),
            headers,
            body: body.clone(),
        });

        let public_prefix = format!("/storage/v1/object/public/{BUCKET}/");
        let object_prefix = format!("/storage/v1/object/{BUCKET}/");

        if method == Method::GET {
            if let Some(key) = path.strip_prefix(&public_prefix) {
                if let Some(bytes) = store.objects.lock().unwrap().get(key) {
                    return (StatusCode::OK, bytes.clone()).into_response();
                }
            }
            return StatusCode::NOT_FOUND.into_response();
        }

        let Some(key) = path.strip_prefix(&object_prefix) else {
            return StatusCode::NOT_FOUND.into_response();
        };
        if method == Method::POST {
            if store.upload_status.is_success() {
                store.objects.lock().unwrap().insert(key.to_string(), body);
                return (store.upload_status, r#"{"Key":"ok"}"#).into_response();
            }
            return (store.upload_status, r#"{"error":"bucket full"}"#).into_response();
        }
        if method == Method::DELETE {
            return match store.objects.lock().unwrap().remove(key) {
                Some(_) => StatusCode::OK.into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            };
        }
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }

    async fn spawn_mock(upload_status: StatusCode) -> (MockStore, String) {
        let store = MockStore {
            requests: Arc::default(),
            objects: Arc::default(),
            upload_status,
        };
        let app = Router::new().fallback(handle).with_state(store.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (store, format!("http://{addr}"))
    }

    fn gateway_for(base_url: &str) -> AssetGateway {
        let backend = ObjectStoreBackend::new(&ObjectStoreConfig {
            base_url: format!("{base_url}/"),
            api_key: KEY.to_string(),
            bucket: BUCKET.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        AssetGateway::new(Arc::new(backend))
    }

    fn upload<'a>(filename: &'a str, allowed: &'a [&'a str]) -> UploadRequest<'a> {
        UploadRequest {
            bytes: b"\x89PNG fake".to_vec(),
            filename,
            content_type: None,
            allowed_extensions: allowed,
            folder: "projects",
        }
    }

    #[tokio::test]
    async fn upload_posts_bytes_with_credentials_and_is_fetchable() {
        let (store, base) = spawn_mock(StatusCode::OK).await;
        let gateway = gateway_for(&base);

        let stored = gateway.upload(upload("cover.png", IMAGE_EXTENSIONS)).await.unwrap();

        assert!(stored.storage_path.starts_with("projects/"));
        assert_eq!(
            stored.public_url,
            format!("{base}/storage/v1/object/public/{BUCKET}/{}", stored.storage_path)
        );

        {
            let requests = store.requests.lock().unwrap();
            assert_eq!(requests.len(), 1);
            let request = &requests[0];
            assert_eq!(request.method, Method::POST);
            assert_eq!(
                request.path,
                format!("/storage/v1/object/{BUCKET}/{}", stored.storage_path)
            );
            assert_eq!(request.headers["authorization"], format!("Bearer {KEY}"));
            assert_eq!(request.headers["apikey"], KEY);
            assert_eq!(request.headers["content-type"], "image/png");
            assert_eq!(&request.body[..], b"\x89PNG fake");
        }

        let fetched = reqwest::get(&stored.public_url).await.unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(&fetched.bytes().await.unwrap()[..], b"\x89PNG fake");
    }

    #[tokio::test]
    async fn created_status_counts_as_success() {
        let (_store, base) = spawn_mock(StatusCode::CREATED).await;
        let gateway = gateway_for(&base);

        assert!(gateway.upload(upload("cv.pdf", FILE_EXTENSIONS)).await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_is_upload_failure_with_body() {
        let (_store, base) = spawn_mock(StatusCode::BAD_REQUEST).await;
        let gateway = gateway_for(&base);

        let err = gateway
            .upload(upload("cover.png", IMAGE_EXTENSIONS))
            .await
            .unwrap_err();

        match err {
            AssetError::UploadFailed { status, detail } => {
                assert_eq!(status, Some(400));
                assert!(detail.contains("bucket full"));
            }
            other => panic!("expected UploadFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_extension_sends_no_request() {
        let (store, base) = spawn_mock(StatusCode::OK).await;
        let gateway = gateway_for(&base);

        let err = gateway
            .upload(upload("payload.exe", IMAGE_EXTENSIONS))
            .await
            .unwrap_err();

        assert!(matches!(err, AssetError::ValidationFailed(_)));
        assert!(store.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_succeeds_only_for_existing_objects() {
        let (store, base) = spawn_mock(StatusCode::OK).await;
        let gateway = gateway_for(&base);
        let stored = gateway.upload(upload("cover.png", IMAGE_EXTENSIONS)).await.unwrap();

        assert!(gateway.delete(&stored.storage_path).await);
        assert!(!gateway.delete(&stored.storage_path).await);

        let requests = store.requests.lock().unwrap();
        let delete = &requests[1];
        assert_eq!(delete.method, Method::DELETE);
        assert_eq!(delete.headers["apikey"], KEY);
    }

    #[tokio::test]
    async fn unreachable_store_is_upload_failure_without_status() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let gateway = gateway_for(&base);

        let err = gateway
            .upload(upload("cover.png", IMAGE_EXTENSIONS))
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::UploadFailed { status: None, .. }));
        assert!(!gateway.delete("projects/x.png").await);
    }
}
