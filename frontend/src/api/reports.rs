use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{
    client::ApiClient,
    types::{ApiError, ExportFormat, ReportFilter, ReportRow},
};
use crate::utils::storage;

impl ApiClient {
    pub async fn get_report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, ApiError> {
        self.get_json("/reports", &filter.to_query()).await
    }

    /// Exports are downloads, not JSON; the browser navigates to this URL so
    /// the token travels as a query parameter instead of a header.
    pub async fn report_export_url(&self, format: ExportFormat, filter: &ReportFilter) -> String {
        let base = self.resolved_base_url().await;
        let mut params = filter.to_query();
        if let Some(token) = storage::access_token() {
            params.push(("token", token));
        }
        build_url(
            &format!("{}/reports/export/{}", base, format.path_segment()),
            &params,
        )
    }

    pub async fn open_report_export(
        &self,
        format: ExportFormat,
        filter: &ReportFilter,
    ) -> Result<(), ApiError> {
        let url = self.report_export_url(format, filter).await;
        open_in_new_tab(&url)
    }
}

fn build_url(base: &str, params: &[(&'static str, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_tab(url: &str) -> Result<(), ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::unknown("No window object"))?;
    window
        .open_with_url_and_target(url, "_blank")
        .map(|_| ())
        .map_err(|_| ApiError::unknown("Failed to open export window"))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_tab(url: &str) -> Result<(), ApiError> {
    log::debug!("export requested outside the browser: {}", url);
    Ok(())
}
