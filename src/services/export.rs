//! Parquet export of the record store
//!
//! The artifact is rendered into a scratch file and streamed back from disk.
//! The scratch file belongs to the returned [`ExportStream`]; it is removed
//! once when the stream finishes or is dropped, whether or not the client
//! read it to the end.

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use futures::Stream;
use parquet::arrow::ArrowWriter;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tempfile::{NamedTempFile, TempPath};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{VehicleField, VehicleRecord};
use crate::repositories::VehicleStore;

/// File name offered to clients in `content-disposition`
pub const EXPORT_FILE_NAME: &str = "vin_export.parquet";

/// Media type of the export response
pub const EXPORT_MEDIA_TYPE: &str = "file/parquet";

const SCRATCH_PREFIX: &str = "vin-export-";
const SCRATCH_SUFFIX: &str = ".parquet";

/// A rendered export ready to be streamed
pub struct ExportArtifact {
    pub row_count: usize,
    pub stream: ExportStream,
}

/// Byte stream over a scratch file that deletes the file when done
pub struct ExportStream {
    inner: Option<ReaderStream<tokio::fs::File>>,
    scratch: Option<TempPath>,
}

impl ExportStream {
    fn new(file: tokio::fs::File, scratch: TempPath) -> Self {
        Self {
            inner: Some(ReaderStream::new(file)),
            scratch: Some(scratch),
        }
    }

    fn release(&mut self) {
        // Close the handle before unlinking so removal also works on Windows
        self.inner = None;
        if let Some(scratch) = self.scratch.take() {
            let path = scratch.to_path_buf();
            match scratch.close() {
                Ok(()) => debug!("Removed export scratch file {}", path.display()),
                Err(e) => warn!(
                    "Failed to remove export scratch file {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }
}

impl Stream for ExportStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };

        let poll = Pin::new(inner).poll_next(cx);
        if let Poll::Ready(None) = poll {
            this.release();
        }
        poll
    }
}

impl Drop for ExportStream {
    fn drop(&mut self) {
        self.release();
    }
}

/// Renders every cached vehicle into a single parquet file
#[derive(Clone)]
pub struct ExportService {
    store: Arc<dyn VehicleStore>,
    scratch_dir: PathBuf,
}

impl ExportService {
    pub fn new(store: Arc<dyn VehicleStore>, scratch_dir: PathBuf) -> Self {
        Self { store, scratch_dir }
    }

    /// Columns in presentation order; the VIN is not exported
    pub fn schema() -> SchemaRef {
        let fields: Vec<Field> = VehicleField::all()
            .map(|field| Field::new(field.display_name(), column_type(field), false))
            .collect();
        Arc::new(Schema::new(fields))
    }

    pub async fn export(&self) -> AppResult<ExportArtifact> {
        let records = self.store.list().await?;
        let row_count = records.len();
        let scratch_dir = self.scratch_dir.clone();

        let scratch = tokio::task::spawn_blocking(move || render(&records, &scratch_dir))
            .await
            .map_err(|e| AppError::internal(format!("Export task failed: {e}")))??;

        let file = tokio::fs::File::open(&scratch).await?;
        info!(rows = row_count, "Rendered vehicle export");

        Ok(ExportArtifact {
            row_count,
            stream: ExportStream::new(file, scratch),
        })
    }
}

fn column_type(field: VehicleField) -> DataType {
    match field {
        VehicleField::ModelYear => DataType::Int64,
        _ => DataType::Utf8,
    }
}

fn column(records: &[VehicleRecord], field: VehicleField) -> ArrayRef {
    match field {
        VehicleField::ModelYear => Arc::new(Int64Array::from_iter_values(
            records.iter().map(|record| i64::from(record.model_year)),
        )),
        _ => Arc::new(StringArray::from_iter_values(
            records.iter().map(|record| record.presented_value(field)),
        )),
    }
}

fn render(records: &[VehicleRecord], scratch_dir: &std::path::Path) -> AppResult<TempPath> {
    let schema = ExportService::schema();
    let columns = VehicleField::all()
        .map(|field| column(records, field))
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns)
        .map_err(|e| AppError::export(format!("Failed to build record batch: {e}")))?;

    let mut scratch: NamedTempFile = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .suffix(SCRATCH_SUFFIX)
        .tempfile_in(scratch_dir)?;

    let mut writer = ArrowWriter::try_new(scratch.as_file_mut(), schema, None)
        .map_err(|e| AppError::export(format!("Failed to create parquet writer: {e}")))?;
    writer
        .write(&batch)
        .map_err(|e| AppError::export(format!("Failed to write parquet rows: {e}")))?;
    writer
        .close()
        .map_err(|e| AppError::export(format!("Failed to finish parquet file: {e}")))?;

    Ok(scratch.into_temp_path())
}
