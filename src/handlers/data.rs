// GET /api/data - the current user's dataset as JSON.

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::dataset;
use crate::middleware::SessionContext;

/// GET /api/data - dataset for the authenticated session.
///
/// The gate guarantees an identity is present here. `data` is `null` when no
/// dataLink is configured or the fetch failed; the distinction is logged
/// server-side only.
pub async fn data_get(Extension(context): Extension<SessionContext>) -> Json<Value> {
    let dataset = dataset::load_user_data(context.session.as_ref()).await;

    Json(json!({
        "success": true,
        "data": dataset
    }))
}
