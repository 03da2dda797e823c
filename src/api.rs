// Data access layer for the Paralympics REST API.
//
// Every read is memoized per (path, params) key for the lifetime of the
// process; authoring writes go through uncached and the caller clears the
// whole cache afterwards. A failed call is surfaced immediately, never
// retried.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{GamesRecord, NewQuestion, NewResponse, Question, QuizResponse};
use crate::names;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed for {url}: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected payload from {url}: {source}")]
    Payload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    cache: Arc<Mutex<HashMap<String, Value>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> color_eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(names::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').into(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Drop every memoized result. Called after authoring writes new data.
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().expect("api cache poisoned");
        let dropped = cache.len();
        cache.clear();
        tracing::debug!("invalidated api cache ({dropped} entries)");
    }

    pub async fn games(&self) -> Result<Vec<GamesRecord>, ApiError> {
        self.get_cached(names::GAMES_PATH, &[]).await
    }

    /// Number of questions available, taken as the length of `GET /question`.
    pub async fn questions_count(&self) -> Result<u32, ApiError> {
        let questions: Vec<Question> = self.get_cached(names::QUESTION_PATH, &[]).await?;
        Ok(questions.len() as u32)
    }

    pub async fn question(&self, id: u32) -> Result<Question, ApiError> {
        let path = format!("{}/{id}", names::QUESTION_PATH);
        self.get_cached(&path, &[]).await
    }

    pub async fn responses(&self, question_id: u32) -> Result<Vec<QuizResponse>, ApiError> {
        let qid = question_id.to_string();
        self.get_cached(names::RESPONSE_SEARCH_PATH, &[("question_id", qid.as_str())])
            .await
    }

    pub async fn create_question(&self, question_text: &str) -> Result<Question, ApiError> {
        let body = NewQuestion {
            question_text: question_text.to_string(),
        };
        self.post_json(names::QUESTION_PATH, &body).await
    }

    pub async fn create_response(&self, response: &NewResponse) -> Result<QuizResponse, ApiError> {
        self.post_json(names::RESPONSE_PATH, response).await
    }

    async fn get_cached<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let key = cache_key(path, params);

        let cached = {
            let cache = self.cache.lock().expect("api cache poisoned");
            cache.get(&key).cloned()
        };

        let url = format!("{}{path}", self.base_url);
        let value = match cached {
            Some(value) => value,
            None => {
                let resp = self
                    .http
                    .get(&url)
                    .query(params)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|source| ApiError::Unavailable {
                        url: url.clone(),
                        source,
                    })?;
                let value: Value = resp.json().await.map_err(|source| ApiError::Unavailable {
                    url: url.clone(),
                    source,
                })?;

                self.cache
                    .lock()
                    .expect("api cache poisoned")
                    .insert(key, value.clone());
                value
            }
        };

        serde_json::from_value(value).map_err(|source| ApiError::Payload { url, source })
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| ApiError::Unavailable {
                url: url.clone(),
                source,
            })?;

        let value: Value = resp.json().await.map_err(|source| ApiError::Unavailable {
            url: url.clone(),
            source,
        })?;
        serde_json::from_value(value).map_err(|source| ApiError::Payload { url, source })
    }
}

fn cache_key(path: &str, params: &[(&str, &str)]) -> String {
    let mut key = path.to_string();
    for (i, (name, value)) in params.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}
