//! reqwest client for the `/books` resource

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::Serialize;

use crate::{
    config::ServerConfig,
    error::{AppError, AppResult, ErrorBody},
    models::book::{Book, BookDraft, BookId, BorrowRequest},
};

use super::{CatalogApi, BORROW_FAILED, DELETE_FAILED, FETCH_FAILED, RETURN_FAILED, SAVE_FAILED};

/// How the user message is extracted from a failure body
#[derive(Clone, Copy)]
enum FailureBody {
    /// `message` field, else the fallback
    Message,
    /// `message` field, else the body as JSON text, else the fallback
    MessageOrJson,
}

#[derive(Clone)]
pub struct HttpCatalogApi {
    client: Client,
    books_url: String,
}

impl HttpCatalogApi {
    pub fn new(config: &ServerConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            books_url: format!("{}/books", base_url.trim_end_matches('/')),
        }
    }

    pub fn books_url(&self) -> &str {
        &self.books_url
    }

    fn book_url(&self, id: BookId) -> String {
        format!("{}/{}", self.books_url, id)
    }

    /// Send a request, mapping transport failures to `Fetch`
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        operation: &str,
    ) -> AppResult<Response> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| transport_error(e, url, operation))
    }

    /// Settle a mutation: any 2xx is accepted, a non-2xx answer becomes a
    /// `Conflict`. The echoed book is decoded if present and well formed.
    async fn accepted(
        response: Response,
        url: &str,
        fallback: &str,
        failure: FailureBody,
    ) -> AppResult<Option<Book>> {
        if !response.status().is_success() {
            return Err(rejection(response, url, fallback, failure).await);
        }

        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not read accepted response from {}: {}", url, e);
                return Ok(None);
            }
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Book>(&raw) {
            Ok(book) => Ok(Some(book)),
            Err(e) => {
                tracing::debug!("Accepted response from {} is not a book: {}", url, e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let url = self.books_url.as_str();
        let response = self.send::<()>(Method::GET, url, None, "list books").await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Listing books failed with HTTP {}", status.as_u16());
            return Err(AppError::Fetch(FETCH_FAILED.to_string()));
        }

        response
            .json::<Vec<Book>>()
            .await
            .map_err(|e| transport_error(e, url, "decode book list"))
    }

    async fn create_book(&self, draft: &BookDraft) -> AppResult<Option<Book>> {
        let url = self.books_url.as_str();
        let response = self.send(Method::POST, url, Some(draft), "create book").await?;
        Self::accepted(response, url, SAVE_FAILED, FailureBody::MessageOrJson).await
    }

    async fn update_book(&self, id: BookId, draft: &BookDraft) -> AppResult<Option<Book>> {
        let url = self.book_url(id);
        let response = self.send(Method::PUT, &url, Some(draft), "update book").await?;
        Self::accepted(response, &url, SAVE_FAILED, FailureBody::MessageOrJson).await
    }

    async fn delete_book(&self, id: BookId) -> AppResult<()> {
        let url = self.book_url(id);
        let response = self.send::<()>(Method::DELETE, &url, None, "delete book").await?;

        // 204 carries no body; only failures are read
        if !response.status().is_success() {
            return Err(rejection(response, &url, DELETE_FAILED, FailureBody::Message).await);
        }
        Ok(())
    }

    async fn borrow_book(&self, id: BookId, request: &BorrowRequest) -> AppResult<Option<Book>> {
        let url = format!("{}/borrow", self.book_url(id));
        let response = self.send(Method::PUT, &url, Some(request), "borrow book").await?;
        Self::accepted(response, &url, BORROW_FAILED, FailureBody::Message).await
    }

    async fn return_book(&self, id: BookId) -> AppResult<Option<Book>> {
        let url = format!("{}/return", self.book_url(id));
        let response = self.send::<()>(Method::PUT, &url, None, "return book").await?;
        Self::accepted(response, &url, RETURN_FAILED, FailureBody::Message).await
    }
}

async fn rejection(response: Response, url: &str, fallback: &str, failure: FailureBody) -> AppError {
    let status = response.status();
    // An unreadable body is treated like an empty one
    let raw = response.text().await.unwrap_or_default();
    let body = ErrorBody::parse(&raw);

    let message = match failure {
        FailureBody::Message => body.message_or(fallback),
        FailureBody::MessageOrJson => body.message_or_json(fallback),
    };

    tracing::warn!("HTTP {} from {}: {}", status.as_u16(), url, message);
    AppError::Conflict(message)
}

fn transport_error(e: reqwest::Error, url: &str, operation: &str) -> AppError {
    let message = if e.is_timeout() {
        format!("Failed to {}: request timed out", operation)
    } else if e.is_connect() {
        format!("Failed to {}: could not connect to {}", operation, url)
    } else if e.is_decode() {
        format!("Failed to {}: unexpected response format", operation)
    } else {
        format!("Failed to {}: {}", operation, e)
    };

    tracing::warn!("{} ({:?})", message, e);
    AppError::Fetch(message)
}
