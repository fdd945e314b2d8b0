//! Command execution with tracing instrumentation.
//!
//! This module provides the [`CloudStackClient`] struct for executing signed
//! commands and driving async jobs to completion.

use std::time::{Duration, Instant};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Span, debug, instrument};
use url::Url;

use super::signing;
use crate::envelope;
use crate::error::{ApiError, ClientError, JobError};
use crate::method::Transport;
use crate::options::ListOption;
use crate::params::{QueryParams, escape};
use crate::types::AsyncJobResult;

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default total wait for an async job in seconds.
const DEFAULT_ASYNC_TIMEOUT_SECS: u64 = 300;

/// Backoff never grows beyond this many poll steps.
const MAX_BACKOFF_STEPS: u32 = 15;

/// Environment variables read by [`CloudStackClient::from_env`].
pub const ENV_API_URL: &str = "CLOUDSTACK_API_URL";
pub const ENV_API_KEY: &str = "CLOUDSTACK_API_KEY";
pub const ENV_SECRET_KEY: &str = "CLOUDSTACK_SECRET_KEY";

/// Builder for configuring a [`CloudStackClient`].
#[derive(Debug)]
pub struct CloudStackClientBuilder {
    base_url: String,
    api_key: String,
    secret: String,
    timeout: Duration,
    async_timeout: Duration,
    poll_step: Duration,
    wait_for_jobs: bool,
    http_get_only: bool,
    default_options: Vec<ListOption>,
}

impl CloudStackClientBuilder {
    fn new(base_url: String, api_key: String, secret: String) -> Self {
        Self {
            base_url,
            api_key,
            secret,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            async_timeout: Duration::from_secs(DEFAULT_ASYNC_TIMEOUT_SECS),
            poll_step: Duration::from_secs(1),
            wait_for_jobs: true,
            http_get_only: false,
            default_options: Vec::new(),
        }
    }

    /// Sets the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the total time to wait for an async job before giving up.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = CloudStackClient::builder(url, key, secret)
    ///     .async_timeout(Duration::from_secs(900))
    ///     .build()?;
    /// ```
    pub fn async_timeout(mut self, timeout: Duration) -> Self {
        self.async_timeout = timeout;
        self
    }

    /// Sets the backoff unit between job status polls.
    pub fn poll_step(mut self, step: Duration) -> Self {
        self.poll_step = step;
        self
    }

    /// Whether async commands wait for their job to finish.
    ///
    /// When disabled, async commands return the immediate response that
    /// carries the `jobid`.
    pub fn wait_for_jobs(mut self, wait: bool) -> Self {
        self.wait_for_jobs = wait;
        self
    }

    /// Forces GET for every command.
    pub fn http_get_only(mut self, get_only: bool) -> Self {
        self.http_get_only = get_only;
        self
    }

    /// Adds a list option applied to every lookup helper call.
    pub fn default_option(mut self, option: ListOption) -> Self {
        self.default_options.push(option);
        self
    }

    /// Builds the [`CloudStackClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<CloudStackClient, ApiError> {
        let base_url = Url::parse(&self.base_url).map_err(ClientError::InvalidUrl)?;
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Request)?;

        Ok(CloudStackClient {
            http,
            base_url,
            api_key: self.api_key,
            secret: self.secret,
            async_timeout: self.async_timeout,
            poll_step: self.poll_step,
            wait_for_jobs: self.wait_for_jobs,
            http_get_only: self.http_get_only,
            default_options: self.default_options,
        })
    }
}

/// Async client for a CloudStack-style query API.
///
/// The client is immutable once built and safe to share between tasks.
///
/// ## Examples
///
/// ```rust,ignore
/// use stackgen::{CloudStackClient, QueryParams};
///
/// let client = CloudStackClient::from_env()?;
/// let raw = client.request("listZones", false, QueryParams::new()).await?;
/// println!("{} zones", raw["count"]);
/// ```
#[derive(Debug, Clone)]
pub struct CloudStackClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    secret: String,
    async_timeout: Duration,
    poll_step: Duration,
    wait_for_jobs: bool,
    http_get_only: bool,
    default_options: Vec<ListOption>,
}

impl CloudStackClient {
    /// Creates a new builder.
    ///
    /// ## Arguments
    ///
    /// * `base_url` - The API endpoint, e.g. `https://cloud.example.com/client/api`.
    /// * `api_key` - The caller's API key.
    /// * `secret` - The caller's secret key, used for signing.
    pub fn builder(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> CloudStackClientBuilder {
        CloudStackClientBuilder::new(base_url.into(), api_key.into(), secret.into())
    }

    /// Creates a client with default settings.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::builder(base_url, api_key, secret).build()
    }

    /// Creates a client from `CLOUDSTACK_API_URL`, `CLOUDSTACK_API_KEY` and
    /// `CLOUDSTACK_SECRET_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| ClientError::MissingConfig {
                name: name.to_string(),
            })
        };
        Self::new(read(ENV_API_URL)?, read(ENV_API_KEY)?, read(ENV_SECRET_KEY)?)
    }

    /// Returns the API endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List options applied to every lookup helper call, before the
    /// caller's own options.
    pub fn default_options(&self) -> &[ListOption] {
        &self.default_options
    }

    /// Whether async commands wait for job completion.
    pub fn waits_for_jobs(&self) -> bool {
        self.wait_for_jobs
    }

    /// Signs and sends a command, returning the unwrapped payload.
    ///
    /// `force_post` selects POST regardless of the command's verb; the
    /// client's GET-only mode still wins over it.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The request fails (network, timeout, etc.)
    /// - The service answers with an error envelope or non-success status
    /// - The body is not a JSON envelope
    #[instrument(
        name = "cloudstack_request",
        skip(self, params),
        fields(
            cloudstack.command = %command,
            http.method = tracing::field::Empty,
            http.url = %self.base_url,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request(
        &self,
        command: &str,
        force_post: bool,
        mut params: QueryParams,
    ) -> Result<Value, ApiError> {
        let transport = Transport::select(command, force_post, self.http_get_only);
        Span::current().record("http.method", transport.to_string().as_str());

        signing::prepare(&mut params, command, &self.api_key, Utc::now());
        let signature = signing::sign(&params, &self.secret)?;

        let mut url = self.base_url.clone();
        let request = if transport.has_body() {
            let mut form: Vec<(&str, &str)> = params.iter().collect();
            form.push(("signature", signature.as_str()));
            self.http.request(transport.to_reqwest(), url).form(&form)
        } else {
            let query = format!("{}&signature={}", params.encode(), escape(&signature));
            url.set_query(Some(&query));
            self.http.request(transport.to_reqwest(), url)
        };

        let response = request.send().await.map_err(ClientError::Request)?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.text().await.map_err(ClientError::Request)?;

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            return Err(envelope::error_from_body(status.as_u16(), &body));
        }

        Span::current().record("otel.status_code", "OK");

        let value: Value = serde_json::from_str(&body)?;
        Ok(envelope::unwrap(value)?)
    }

    /// Fetches the current status of an async job.
    pub async fn query_async_job_result(&self, job_id: &str) -> Result<AsyncJobResult, ApiError> {
        let mut params = QueryParams::new();
        params.set("jobid", job_id);
        let raw = self.request("queryAsyncJobResult", false, params).await?;
        envelope::decode(raw)
    }

    /// Polls an async job until it finishes or the async timeout elapses.
    ///
    /// Returns the job's `jobresult` on success.
    ///
    /// ## Errors
    ///
    /// - [`JobError::Failed`] with the job's own text for text results
    /// - [`JobError::Undefined`] for any other failed result
    /// - [`JobError::Timeout`] if the job is still pending after the async
    ///   timeout; the job keeps running and can be polled again
    pub async fn wait_for_job(&self, job_id: &str) -> Result<Value, ApiError> {
        let started = Instant::now();
        let mut steps: u32 = 0;

        loop {
            let job = self.query_async_job_result(job_id).await?;
            debug!(job_id, jobstatus = job.jobstatus, "polled async job");

            if !job.is_pending() {
                return match job.jobstatus {
                    AsyncJobResult::SUCCEEDED => Ok(job.jobresult),
                    _ => Err(job_failure(job_id, job).into()),
                };
            }

            let waited = started.elapsed();
            if waited >= self.async_timeout {
                return Err(JobError::Timeout {
                    job_id: job_id.to_string(),
                    waited_secs: waited.as_secs(),
                }
                .into());
            }

            if steps < MAX_BACKOFF_STEPS {
                steps += 1;
            }
            let remaining = self.async_timeout.saturating_sub(waited);
            tokio::time::sleep((self.poll_step * steps).min(remaining)).await;
        }
    }

    /// Completes an async command from its immediate response.
    ///
    /// With waiting disabled the immediate response is decoded as is.
    /// Otherwise the job is awaited and its result decoded; `unwrap_result`
    /// strips one envelope level from the job result first, which every
    /// response except the bare `success` shape needs.
    pub async fn finish_async<T: DeserializeOwned>(
        &self,
        raw: Value,
        unwrap_result: bool,
    ) -> Result<T, ApiError> {
        if !self.wait_for_jobs {
            return envelope::decode(raw);
        }

        let job_id = match raw.get("jobid") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(JobError::MissingJobId.into()),
        };

        let result = self.wait_for_job(&job_id).await?;
        let result = if unwrap_result {
            envelope::unwrap(result)?
        } else {
            result
        };
        envelope::decode(result)
    }
}

fn job_failure(job_id: &str, job: AsyncJobResult) -> JobError {
    if job.jobresulttype == "text" {
        let message = match job.jobresult {
            Value::String(text) => text,
            other => other.to_string(),
        };
        return JobError::Failed {
            job_id: job_id.to_string(),
            message,
        };
    }
    JobError::Undefined {
        job_id: job_id.to_string(),
        result: job.jobresult.to_string(),
    }
}
