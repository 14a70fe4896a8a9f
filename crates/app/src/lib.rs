pub mod app;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use error::{ApiError, AppError, Result};
pub use services::AppServices;
pub use startup::{AppPaths, ensure_app_data_dir};
