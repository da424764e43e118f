//! Iamport payment gateway client
//!
//! Wraps the Iamport REST API: exchanges the API key/secret for a
//! short-lived access token, caches it, and decodes the
//! `{code, message, response}` envelope every endpoint answers with.

use crate::config::{IamportConfig, DEFAULT_BASE_URL};
use crate::error::{IamportError, IamportResult};
use crate::payments::token::AccessToken;
use crate::payments::traits::PaymentGateway;
use crate::payments::types::{
    CancelOptions, CancelTarget, PagedPayments, Payment, PaymentStatus, PreparedPayment,
};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::{form_urlencoded, Url};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

type FormFields = Vec<(&'static str, String)>;

/// Iamport REST API client
///
/// The cached token sits behind an async mutex that is held while a new
/// token is fetched, so concurrent callers share a single refresh.
pub struct IamportClient {
    api_key: String,
    api_secret: String,
    base_url: String,
    client: Client,
    token: Mutex<Option<AccessToken>>,
}

impl IamportClient {
    /// Create a client from credentials and an optional HTTP client.
    ///
    /// Missing credentials are not checked here; the first call that needs a
    /// token fails with [`IamportError::MissingApiKey`] or
    /// [`IamportError::MissingApiSecret`] instead.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        http: Option<Client>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: http.unwrap_or_default(),
            token: Mutex::new(None),
        }
    }

    pub fn with_config(config: IamportConfig) -> IamportResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("iamport-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                IamportError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("Iamport client initialized with base URL: {}", config.base_url);

        Ok(Self::new(config.api_key, config.api_secret, Some(client)).with_base_url(config.base_url))
    }

    /// Create client from `IAMPORT_*` environment variables
    pub fn from_env() -> IamportResult<Self> {
        Self::with_config(IamportConfig::from_env()?)
    }

    /// Point the client at another host, e.g. a sandbox or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the cached token, if one has been issued.
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    /// Request a fresh token and cache it, whether or not the current one is
    /// still usable.
    ///
    /// `POST /users/getToken`
    pub async fn get_token(&self) -> IamportResult<AccessToken> {
        let mut cached = self.token.lock().await;
        let token = self.request_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Value for the `Authorization` header, fetching a token first when the
    /// cached one is missing or expired.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn authorization(&self) -> IamportResult<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|token| token.is_usable()) {
            return Ok(token.token.clone());
        }

        debug!("Iamport access token missing or expired, requesting a new one");
        let token = self.request_token().await?;
        let bearer = token.token.clone();
        *cached = Some(token);

        Ok(bearer)
    }

    async fn request_token(&self) -> IamportResult<AccessToken> {
        if self.api_key.is_empty() {
            return Err(IamportError::MissingApiKey);
        }

        if self.api_secret.is_empty() {
            return Err(IamportError::MissingApiSecret);
        }

        let url = self.endpoint(&["users", "getToken"])?;
        let body = encode_form(&[
            ("imp_key", self.api_key.clone()),
            ("imp_secret", self.api_secret.clone()),
        ]);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let issued: TokenResponse = decode_response(response, None).await?;
        let expired_at = DateTime::from_timestamp(issued.expired_at, 0)
            .ok_or(IamportError::InvalidExpiry(issued.expired_at))?;

        info!(
            "Iamport access token issued: expires_at={}, server_now={}",
            expired_at, issued.now
        );

        Ok(AccessToken::new(issued.access_token, expired_at))
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> IamportResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            IamportError::config_error(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                IamportError::config_error(format!("Base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Make an authenticated request and unwrap the response envelope.
    ///
    /// `not_found` names the identifier reported when the gateway answers
    /// 404; endpoints that pass `None` treat 404 like any other failure.
    async fn execute<T>(
        &self,
        method: Method,
        url: Url,
        form: Option<FormFields>,
        not_found: Option<&'static str>,
    ) -> IamportResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let bearer = self.authorization().await?;

        debug!("Iamport request: {} {}", method, url.path());

        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, bearer);

        if let Some(fields) = form {
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encode_form(&fields));
        }

        let response = request.send().await?;
        decode_response(response, not_found).await
    }
}

fn encode_form(fields: &[(&'static str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

async fn decode_response<T>(response: Response, not_found: Option<&'static str>) -> IamportResult<T>
where
    T: DeserializeOwned + Default,
{
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        warn!("Iamport rejected authorization for {}", response.url().path());
        return Err(IamportError::Unauthorized);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(what) = not_found {
            debug!("Iamport returned 404 for {}", response.url().path());
            return Err(IamportError::NotFound { what });
        }
    }

    if status != StatusCode::OK {
        warn!("Iamport HTTP {} for {}", status, response.url().path());
        return Err(IamportError::Remote { status });
    }

    let body = response.text().await?;
    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    envelope.into_result()
}

// Iamport API response wrapper
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    message: Option<String>,
    response: Option<T>,
}

impl<T: Default> Envelope<T> {
    fn into_result(self) -> IamportResult<T> {
        if self.code != 0 {
            let message = self.message.unwrap_or_default();
            error!("Iamport API error: code={}, message={}", self.code, message);
            return Err(IamportError::api_error(self.code, message));
        }

        Ok(self.response.unwrap_or_default())
    }
}

// getToken response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenResponse {
    access_token: String,
    expired_at: i64,
    now: i64,
}

#[async_trait]
impl PaymentGateway for IamportClient {
    async fn get_payment_by_imp_uid(&self, imp_uid: &str) -> IamportResult<Payment> {
        debug!("Fetching Iamport payment: imp_uid={}", imp_uid);

        let url = self.endpoint(&["payments", imp_uid])?;
        self.execute(Method::GET, url, None, Some("imp_uid")).await
    }

    async fn get_payment_by_merchant_uid(&self, merchant_uid: &str) -> IamportResult<Payment> {
        debug!("Fetching Iamport payment: merchant_uid={}", merchant_uid);

        let url = self.endpoint(&["payments", "find", merchant_uid])?;
        self.execute(Method::GET, url, None, Some("merchant_uid")).await
    }

    async fn get_payments_by_status(
        &self,
        status: PaymentStatus,
        page: u32,
    ) -> IamportResult<PagedPayments> {
        let mut url = self.endpoint(&["payments", "status", status.as_str()])?;
        if page > 0 {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }

        let paged: PagedPayments = self
            .execute(Method::GET, url, None, Some("status or page"))
            .await?;

        debug!(
            "Iamport payments listed: status={}, page={}, total={}, returned={}",
            status,
            page,
            paged.total,
            paged.payments.len()
        );

        Ok(paged)
    }

    async fn cancel_payment(
        &self,
        target: CancelTarget,
        options: Option<&CancelOptions>,
    ) -> IamportResult<Payment> {
        info!("Cancelling Iamport payment: {}={}", target.key(), target.uid());

        let mut form = options.map(CancelOptions::form_fields).unwrap_or_default();
        form.push((target.key(), target.uid().to_string()));

        let url = self.endpoint(&["payments", "cancel"])?;
        let payment: Payment = self.execute(Method::POST, url, Some(form), None).await?;

        info!(
            "Iamport payment cancelled: imp_uid={}, cancel_amount={}, status={}",
            payment.imp_uid, payment.cancel_amount, payment.status
        );

        Ok(payment)
    }

    async fn prepare_payment(
        &self,
        merchant_uid: &str,
        amount: i64,
    ) -> IamportResult<PreparedPayment> {
        info!(
            "Preparing Iamport payment: merchant_uid={}, amount={}",
            merchant_uid, amount
        );

        let form = vec![
            ("merchant_uid", merchant_uid.to_string()),
            ("amount", amount.to_string()),
        ];

        let url = self.endpoint(&["payments", "prepare"])?;
        self.execute(Method::POST, url, Some(form), None).await
    }

    async fn get_prepared_payment(&self, merchant_uid: &str) -> IamportResult<PreparedPayment> {
        debug!("Fetching prepared Iamport payment: merchant_uid={}", merchant_uid);

        let url = self.endpoint(&["payments", "prepare", merchant_uid])?;
        self.execute(Method::GET, url, None, Some("merchant_uid")).await
    }
}
