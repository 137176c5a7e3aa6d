use std::sync::Arc;

use anicama_sheets::LeadSheetRepo;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Lead sheet over the configured workbook.
    pub leads: Arc<LeadSheetRepo>,
    pub config: Arc<ServerConfig>,
}
