//! Route handlers.
//!
//! Each handler moves its core call onto the blocking pool: stores do
//! synchronous file or SQLite I/O.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use patient_records_core::{
    Collection, NewPatient, Patient, PatientRecord, PatientUpdate, RecordsResult,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::{AppState, Records};

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    fn new(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Message plus the stored record.
#[derive(Debug, Clone, Serialize)]
pub struct PatientRes {
    pub message: String,
    pub patient: PatientRecord,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Query string of `/sort`.
#[derive(Debug, Clone, Deserialize)]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Run a core operation on the blocking pool.
async fn blocking<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&Records) -> RecordsResult<T> + Send + 'static,
    T: Send + 'static,
{
    let records = state.records.clone();
    let result = tokio::task::spawn_blocking(move || op(records.as_ref())).await?;
    Ok(result?)
}

/// GET /
pub async fn hello() -> Json<MessageRes> {
    Json(MessageRes::new("Welcome to Patient Management API"))
}

/// GET /about
pub async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(
        "A fully functional API to manage patient information.",
    ))
}

/// GET /health
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Patient records API is alive".into(),
    })
}

/// GET /view_all
pub async fn view_all(State(state): State<AppState>) -> Result<Json<Collection>, ApiError> {
    let patients = blocking(&state, |records| records.get_all()).await?;
    Ok(Json(patients))
}

/// GET /view_patient/:patient_id
pub async fn view_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    let patient = blocking(&state, move |records| records.get(&patient_id)).await?;
    Ok(Json(patient))
}

/// GET /sort?sort_by=height|weight|bmi&order=asc|desc
pub async fn sort_patients(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let Query(params) = params?;
    let sort_by = params
        .sort_by
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter sort_by"))?;

    let sorted = blocking(&state, move |records| {
        records.sort_by(&sort_by, params.order.as_deref())
    })
    .await?;
    Ok(Json(sorted))
}

/// POST /create_patient
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientRes>), ApiError> {
    let Json(draft) = payload?;
    let (id, fields) = draft
        .into_parts()
        .map_err(|e| ApiError::unprocessable(e.to_string()))?;

    let patient = blocking(&state, move |records| records.create(&id, fields)).await?;
    Ok((
        StatusCode::CREATED,
        Json(PatientRes {
            message: "Patient created successfully".into(),
            patient,
        }),
    ))
}

/// PUT /edit/:patient_id
pub async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    payload: Result<Json<PatientUpdate>, JsonRejection>,
) -> Result<Json<PatientRes>, ApiError> {
    let Json(update) = payload?;

    let patient = blocking(&state, move |records| records.update(&patient_id, &update)).await?;
    Ok(Json(PatientRes {
        message: "Patient updated successfully".into(),
        patient,
    }))
}

/// DELETE /delete/:patient_id
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    blocking(&state, move |records| records.delete(&patient_id)).await?;
    Ok(Json(MessageRes::new("Patient deleted successfully")))
}
