//! HTTP request handlers
//!
//! Every endpoint except `/health` takes a multipart upload carrying the
//! model artifact as `model_file`.

use crate::model::{ModelAdapter, ModelMetadata};
use crate::predict::{parse_record, PredictionResponse};
use crate::schema::Schema;
use crate::server::{state::AppState, HealthResponse, Result, ServerError};
use crate::service;
use crate::table::{parse_table, SampleTable, TableError, TableFormat};
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;

/// An uploaded file part
#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Bytes,
}

/// Recognized multipart fields
#[derive(Debug, Default)]
struct UploadForm {
    model_file: Option<Upload>,
    df_file: Option<Upload>,
    data: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();

            match name.as_str() {
                "model_file" | "df_file" => {
                    let bytes = field.bytes().await.map_err(|e| {
                        ServerError::Validation(format!("Failed to read {name}: {e}"))
                    })?;
                    tracing::debug!(
                        field = %name,
                        file = %file_name,
                        size = bytes.len(),
                        "received upload"
                    );

                    let upload = Upload { file_name, bytes };
                    if name == "model_file" {
                        form.model_file = Some(upload);
                    } else {
                        form.df_file = Some(upload);
                    }
                }
                "data" => {
                    let text = field.text().await.map_err(|e| {
                        ServerError::Validation(format!("Failed to read data: {e}"))
                    })?;
                    form.data = Some(text);
                }
                other => tracing::debug!(field = %other, "ignoring multipart field"),
            }
        }

        Ok(form)
    }

    fn model_file(&self) -> Result<&Upload> {
        self.model_file
            .as_ref()
            .ok_or_else(|| {
                ServerError::Validation("Missing multipart field: model_file".to_string())
            })
    }
}

/// Decode the uploaded model, reusing a cached adapter for identical bytes
fn load_model(state: &AppState, upload: &Upload) -> Result<Arc<ModelAdapter>> {
    let adapter = state
        .cache
        .get_or_load(&upload.bytes, &upload.file_name)
        .map_err(crate::Error::from)?;
    tracing::debug!(model = adapter.specific_type(), file = %upload.file_name, "model loaded");
    Ok(adapter)
}

fn load_table(upload: &Upload) -> Result<SampleTable> {
    let format = TableFormat::from_path(&upload.file_name)
        .ok_or_else(|| TableError::UnsupportedFormat(upload.file_name.clone()))
        .map_err(crate::Error::from)?;
    let table = parse_table(&upload.bytes, format).map_err(crate::Error::from)?;
    Ok(table)
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        cached_models: state.cache.len(),
    })
}

/// `POST /metadata`: identify the uploaded model
pub async fn model_metadata(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ModelMetadata>> {
    let form = UploadForm::read(multipart).await?;
    let upload = form.model_file()?;

    let adapter = load_model(&state, upload)?;
    let metadata = service::describe_model(&adapter, &upload.file_name)?;

    Ok(Json(metadata))
}

/// `POST /build_schema`: input schema, optionally classified from `df_file`
pub async fn build_schema(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Schema>> {
    let form = UploadForm::read(multipart).await?;
    let adapter = load_model(&state, form.model_file()?)?;

    let table = form.df_file.as_ref().map(load_table).transpose()?;
    let schema = service::build_schema(&adapter, table.as_ref(), state.inference())?;

    Ok(Json(schema))
}

/// `POST /predict`: predict one JSON record submitted as `data`
pub async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictionResponse>> {
    let form = UploadForm::read(multipart).await?;
    let adapter = load_model(&state, form.model_file()?)?;

    let data = form
        .data
        .as_deref()
        .ok_or_else(|| ServerError::Validation("Missing multipart field: data".to_string()))?;
    let record = parse_record(data).map_err(crate::Error::from)?;

    let response = service::predict_record(&adapter, &record)?;
    Ok(Json(response))
}
