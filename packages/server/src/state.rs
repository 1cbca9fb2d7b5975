use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::ai::TextGenerator;
use crate::config::AppConfig;
use crate::media::CourseMediaStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub media: Arc<dyn CourseMediaStore>,
    pub ai: Arc<dyn TextGenerator>,
}
