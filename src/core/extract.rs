//! Estrattori - body JSON con errori nel formato di `AppError`

use super::AppError;
use axum_macros::FromRequest;

/// `axum::Json` whose rejection is an [`AppError`], so a malformed body gets
/// the same JSON error shape as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
