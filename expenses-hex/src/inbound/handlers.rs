//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use expenses_types::{
    AppError, CompanyId, DeleteOutcome, DeleteResponse, Flash, FlashKey, ImportResponse,
    PaymentFilters, PaymentId, PaymentInput, PaymentRepository, PaymentResponse,
    payment_edit_redirect, payments_index_redirect,
};

use super::import;
use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository> {
    pub service: PaymentService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_company(id: &str) -> Result<CompanyId, ApiError> {
    id.parse()
        .map_err(|_| AppError::BadRequest("Invalid company ID".into()).into())
}

fn parse_payment(id: &str) -> Result<PaymentId, ApiError> {
    id.parse()
        .map_err(|_| AppError::BadRequest("Invalid payment ID".into()).into())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List payments with filter dropdown data.
#[tracing::instrument(skip(state, filters), fields(company_id = %cid))]
pub async fn index<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(cid): Path<String>,
    Query(filters): Query<PaymentFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let listing = state.service.list(company_id, &filters).await?;
    Ok(Json(listing))
}

/// Data for the create form.
#[tracing::instrument(skip(state), fields(company_id = %cid))]
pub async fn create_form<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(cid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let form = state.service.prepare_form(company_id, None).await?;
    Ok(Json(form))
}

/// Store a new payment.
#[tracing::instrument(skip(state, input), fields(company_id = %cid, amount = input.amount))]
pub async fn store<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(cid): Path<String>,
    Json(input): Json<PaymentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let payment = state.service.create(company_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            payment,
            flash: Flash::new(FlashKey::Added, 1),
            redirect: payments_index_redirect(),
        }),
    ))
}

/// Duplicate an existing payment and point the caller at the clone's edit
/// form.
#[tracing::instrument(skip(state), fields(company_id = %cid, payment_id = %id))]
pub async fn duplicate<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((cid, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let payment_id = parse_payment(&id)?;

    let clone = state.service.duplicate(company_id, payment_id).await?;
    let redirect = payment_edit_redirect(clone.id);

    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            payment: clone,
            flash: Flash::new(FlashKey::Duplicated, 1),
            redirect,
        }),
    ))
}

/// Import payments from a CSV body.
#[tracing::instrument(skip(state, body), fields(company_id = %cid))]
pub async fn import_payments<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(cid): Path<String>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;

    let summary = state
        .service
        .bulk_import(company_id, import::read_rows(&body))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            imported: summary.imported,
            flash: Flash::new(FlashKey::Imported, summary.imported),
            redirect: payments_index_redirect(),
        }),
    ))
}

/// Data for the edit form.
#[tracing::instrument(skip(state), fields(company_id = %cid, payment_id = %id))]
pub async fn edit_form<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((cid, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let payment_id = parse_payment(&id)?;

    let form = state
        .service
        .prepare_form(company_id, Some(payment_id))
        .await?;
    Ok(Json(form))
}

/// Update an existing payment.
#[tracing::instrument(skip(state, input), fields(company_id = %cid, payment_id = %id))]
pub async fn update<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((cid, id)): Path<(String, String)>,
    Json(input): Json<PaymentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let payment_id = parse_payment(&id)?;

    let payment = state.service.update(company_id, payment_id, input).await?;

    Ok(Json(PaymentResponse {
        payment,
        flash: Flash::new(FlashKey::Updated, 1),
        redirect: payments_index_redirect(),
    }))
}

/// Delete a payment. Transfer-category payments are declined silently.
#[tracing::instrument(skip(state), fields(company_id = %cid, payment_id = %id))]
pub async fn destroy<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((cid, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let company_id = parse_company(&cid)?;
    let payment_id = parse_payment(&id)?;

    let outcome = state.service.delete(company_id, payment_id).await?;

    let flash = match outcome {
        DeleteOutcome::Deleted => Some(Flash::new(FlashKey::Deleted, 1)),
        DeleteOutcome::TransferProtected => None,
    };

    Ok(Json(DeleteResponse {
        outcome,
        flash,
        redirect: payments_index_redirect(),
    }))
}

/// Serve the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}
