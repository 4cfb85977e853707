use domain::Id;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Body for POST /calendar/sync. The user id is optional at the type level
/// so a missing value maps to a 400 instead of an axum deserialization
/// rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SyncParams {
    #[schema(value_type = Option<Uuid>)]
    pub(crate) user_id: Option<Id>,
}

/// Query parameters for GET /calendar/sync/status.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct StatusParams {
    #[param(value_type = Option<Uuid>)]
    pub(crate) user_id: Option<Id>,
}
