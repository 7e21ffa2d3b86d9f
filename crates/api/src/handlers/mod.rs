mod models;
mod state;
mod form;
mod health;
mod upload;

pub use models::{AppState, UploadQuery};
pub use health::health;
pub use upload::{upload_file, upload_files};
