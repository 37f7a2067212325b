use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{AppError, AppResult, ReportError};

use super::Report;

/// Writes the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when the report cannot be serialized or the file
/// cannot be created or written.
pub async fn export_json(path: &str, report: &Report) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(report)
        .map_err(|err| AppError::report(ReportError::Serialize { source: err }))?;
    let file = tokio::fs::File::create(path)
        .await
        .map_err(|err| export_io_err("create report file", err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&json)
        .await
        .map_err(|err| export_io_err("write report", err))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|err| export_io_err("write report", err))?;
    writer
        .flush()
        .await
        .map_err(|err| export_io_err("flush report", err))?;
    Ok(())
}

fn export_io_err(context: &'static str, source: std::io::Error) -> AppError {
    AppError::report(ReportError::Io { context, source })
}
