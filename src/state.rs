use std::sync::Arc;

use sqlx::PgPool;

use crate::models::slider::{MemorySliderRepository, PgSliderRepository};
use crate::models::user::{MemoryUserRepository, PgUserRepository, UserRepository};
use crate::services::SliderService;

/// Shared application state, injected into handlers as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub sliders: SliderService,
    pub users: Arc<dyn UserRepository>,
    pub app_name: String,
}

impl AppState {
    pub fn postgres(pool: PgPool, app_name: &str) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
        let sliders = SliderService::new(Arc::new(PgSliderRepository::new(pool)), users.clone());
        Self { sliders, users, app_name: app_name.to_string() }
    }

    pub fn in_memory(app_name: &str) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new());
        let sliders = SliderService::new(Arc::new(MemorySliderRepository::new(users.clone())), users.clone());
        Self { sliders, users, app_name: app_name.to_string() }
    }
}
