use crate::db::pool::DbPool;
use crate::db::queries::load_export_rows;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::ui::messages::warning;
use crate::utils::date::range_bounds;
use std::path::Path;

/// High level export of stored utilizations.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the utilizations of `employee` (or of everyone) that touch
    /// `range`.
    ///
    /// `range` is `None`, `"all"` or a period accepted by
    /// [`range_bounds`]: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of them
    /// joined by `:`. Returns the number of exported rows.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        employee: Option<&str>,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(range_bounds(r).map_err(AppError::InvalidDate)?),
        };

        let rows = load_export_rows(&pool.conn, employee, bounds)?;

        if rows.is_empty() {
            warning("No utilizations found for the selected filters.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
