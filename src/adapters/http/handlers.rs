//! HTTP handlers connecting Axum routes to the application handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use crate::application::handlers::access::{EvaluateAccessHandler, EvaluateAccessQuery};
use crate::application::handlers::billing::{
    DelinquencySweepHandler, DelinquencySweepQuery, ReconcileWebhookCommand,
    ReconcileWebhookHandler, SubmitProofCommand, SubmitProofError, SubmitProofHandler,
};
use crate::application::handlers::credential::{
    CheckCredentialHandler, PersistTokenCommand, PersistTokenError, PersistTokenHandler,
    RevokeTokenHandler,
};
use crate::application::handlers::support::{
    EscalationError, OpenThreadCommand, OpenThreadHandler, PollMessagesQuery, PostMessageCommand,
    PostMessageHandler,
};
use crate::domain::billing::ReconcileError;
use crate::domain::foundation::{BillingPeriod, DomainError, ThreadId, Timestamp};
use crate::domain::support::SupportError;
use crate::ports::{
    AccountDirectory, CredentialStore, PaymentLedger, ProofStorage, SupportThreadRepository,
};

use super::dto::{
    ErrorResponse, OpenThreadRequest, PersistTokenRequest, PostMessageRequest,
    ProofSubmittedResponse, SubmitProofRequest, WebhookAckResponse,
};

// ── Application state ──────────────────────────────────────────────────

/// Shared state: Arc-wrapped ports plus the webhook secret, cloned per
/// request.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn AccountDirectory>,
    pub ledger: Arc<dyn PaymentLedger>,
    pub credentials: Arc<dyn CredentialStore>,
    pub threads: Arc<dyn SupportThreadRepository>,
    pub proofs: Arc<dyn ProofStorage>,
    pub webhook_secret: String,
}

impl AppState {
    pub fn evaluate_access_handler(&self) -> EvaluateAccessHandler {
        EvaluateAccessHandler::new(self.directory.clone())
    }

    pub fn reconcile_handler(&self) -> ReconcileWebhookHandler {
        ReconcileWebhookHandler::new(
            self.webhook_secret.clone(),
            self.directory.clone(),
            self.ledger.clone(),
        )
    }

    pub fn sweep_handler(&self) -> DelinquencySweepHandler {
        DelinquencySweepHandler::new(self.directory.clone(), self.ledger.clone())
    }

    pub fn submit_proof_handler(&self) -> SubmitProofHandler {
        SubmitProofHandler::new(
            self.directory.clone(),
            self.ledger.clone(),
            self.proofs.clone(),
        )
    }

    pub fn persist_token_handler(&self) -> PersistTokenHandler {
        PersistTokenHandler::new(self.credentials.clone())
    }

    pub fn revoke_token_handler(&self) -> RevokeTokenHandler {
        RevokeTokenHandler::new(self.credentials.clone())
    }

    pub fn check_credential_handler(&self) -> CheckCredentialHandler {
        CheckCredentialHandler::new(self.credentials.clone())
    }

    pub fn open_thread_handler(&self) -> OpenThreadHandler {
        OpenThreadHandler::new(self.directory.clone(), self.threads.clone())
    }

    pub fn post_message_handler(&self) -> PostMessageHandler {
        PostMessageHandler::new(self.threads.clone())
    }
}

// ── Access gate ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AccessParams {
    #[serde(default)]
    pub identity: Option<String>,
}

/// GET /api/access - evaluate access for an identity.
///
/// Always 200; the decision (including every denial) is in the body. The
/// handler itself is total, so there is no error path to surface.
pub async fn evaluate_access(
    State(state): State<AppState>,
    Query(params): Query<AccessParams>,
) -> impl IntoResponse {
    let decision = state
        .evaluate_access_handler()
        .handle(EvaluateAccessQuery {
            identity: params.identity,
        })
        .await;
    Json(decision)
}

// ── Webhook reconciliation ─────────────────────────────────────────────

/// POST /api/webhooks/gateway - reconcile a signed gateway event.
pub async fn handle_gateway_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("X-Gateway-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ApiError::from(ReconcileError::MalformedPayload(
                "missing X-Gateway-Signature header".to_string(),
            ))
        })?;

    let outcome = state
        .reconcile_handler()
        .handle(ReconcileWebhookCommand {
            payload: body.to_vec(),
            signature_header: signature.to_string(),
        })
        .await?;

    Ok(Json(WebhookAckResponse::from(outcome)))
}

// ── Delinquency sweep ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SweepParams {
    /// Billing period as `YYYY-MM`; defaults to the current one.
    #[serde(default)]
    pub period: Option<String>,
}

/// GET /api/delinquency - accounts without coverage for a period.
pub async fn delinquency_report(
    State(state): State<AppState>,
    Query(params): Query<SweepParams>,
) -> Result<impl IntoResponse, ApiError> {
    let period = params
        .period
        .map(|raw| {
            raw.parse::<BillingPeriod>()
                .map_err(|e| ApiError::bad_request(e.to_string()))
        })
        .transpose()?;

    let report = state
        .sweep_handler()
        .handle(DelinquencySweepQuery { period })
        .await?;
    Ok(Json(report))
}

// ── Payment proof ──────────────────────────────────────────────────────

/// POST /api/payments/proof - submit a proof-of-payment file.
pub async fn submit_proof(
    State(state): State<AppState>,
    Json(request): Json<SubmitProofRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let contents = BASE64
        .decode(&request.contents)
        .map_err(|_| ApiError::bad_request("contents must be base64-encoded"))?;

    let submitted = state
        .submit_proof_handler()
        .handle(SubmitProofCommand {
            account_id: request.account_id,
            period: request.period,
            file_name: request.file_name,
            contents,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProofSubmittedResponse {
            record_id: submitted.record_id.to_string(),
            proof_reference: submitted.proof_reference,
        }),
    ))
}

// ── Credential lifecycle ───────────────────────────────────────────────

/// PUT /api/credential - validate and store a gateway token.
pub async fn persist_token(
    State(state): State<AppState>,
    Json(request): Json<PersistTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .persist_token_handler()
        .handle(PersistTokenCommand {
            token: request.token,
        })
        .await?;

    // Report the freshly stored credential, classification included.
    let report = state.check_credential_handler().handle().await?;
    Ok(Json(report))
}

/// DELETE /api/credential - revoke the stored token.
pub async fn revoke_token(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.revoke_token_handler().handle().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/credential - current credential standing.
pub async fn credential_report(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.check_credential_handler().handle().await?;
    Ok(Json(report))
}

// ── Escalation threads ─────────────────────────────────────────────────

/// POST /api/support/threads - open or reuse the billing-urgent thread.
pub async fn open_thread(
    State(state): State<AppState>,
    Json(request): Json<OpenThreadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let opened = state
        .open_thread_handler()
        .handle(OpenThreadCommand {
            account_id: request.account_id,
        })
        .await?;

    let status = if opened.reused {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(opened.thread)))
}

/// POST /api/support/threads/:id/messages - post a message.
pub async fn post_message(
    State(state): State<AppState>,
    Path(thread_id): Path<ThreadId>,
    Json(request): Json<PostMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .post_message_handler()
        .handle(PostMessageCommand {
            thread_id,
            sender: request.sender,
            sender_id: request.sender_id,
            body: request.body,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Debug, Deserialize)]
pub struct PollParams {
    /// Unix seconds of the caller's last seen message timestamp.
    pub since: i64,
}

/// GET /api/support/threads/:id/messages - poll for newer messages.
pub async fn poll_messages(
    State(state): State<AppState>,
    Path(thread_id): Path<ThreadId>,
    Query(params): Query<PollParams>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .post_message_handler()
        .poll(PollMessagesQuery {
            thread_id,
            since: Timestamp::from_unix_secs(params.since),
        })
        .await?;
    Ok(Json(messages))
}

// ── Error handling ─────────────────────────────────────────────────────

/// API error carrying the HTTP status and the wire error shape.
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        match &err {
            ReconcileError::SignatureMismatch | ReconcileError::StaleSignature => Self::new(
                StatusCode::UNAUTHORIZED,
                "SIGNATURE_REJECTED",
                err.to_string(),
            ),
            ReconcileError::MalformedPayload(_) => {
                Self::new(StatusCode::BAD_REQUEST, "MALFORMED_PAYLOAD", err.to_string())
            }
            ReconcileError::UnknownAccountReference { .. } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNKNOWN_ACCOUNT",
                err.to_string(),
            ),
            ReconcileError::InvalidState(_) => {
                Self::new(StatusCode::CONFLICT, "INVALID_STATE", err.to_string())
            }
            ReconcileError::Infrastructure(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                err.to_string(),
            ),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            err.to_string(),
        )
    }
}

impl From<PersistTokenError> for ApiError {
    fn from(err: PersistTokenError) -> Self {
        match &err {
            PersistTokenError::Invalid(_) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_TOKEN",
                err.to_string(),
            ),
            PersistTokenError::Infrastructure(inner) => inner.clone().into(),
        }
    }
}

impl From<SubmitProofError> for ApiError {
    fn from(err: SubmitProofError) -> Self {
        match &err {
            SubmitProofError::AccountNotFound => {
                Self::new(StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND", err.to_string())
            }
            SubmitProofError::Upload(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "UPLOAD_FAILED", err.to_string())
            }
            SubmitProofError::Infrastructure(inner) => inner.clone().into(),
        }
    }
}

impl From<EscalationError> for ApiError {
    fn from(err: EscalationError) -> Self {
        match &err {
            EscalationError::AccountNotFound => {
                Self::new(StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND", err.to_string())
            }
            EscalationError::ThreadNotFound => {
                Self::new(StatusCode::NOT_FOUND, "THREAD_NOT_FOUND", err.to_string())
            }
            EscalationError::Thread(SupportError::EmptyBody) => {
                Self::bad_request(err.to_string())
            }
            EscalationError::Thread(SupportError::ThreadClosed) => {
                Self::new(StatusCode::CONFLICT, "THREAD_CLOSED", err.to_string())
            }
            EscalationError::Infrastructure(inner) => inner.clone().into(),
        }
    }
}
