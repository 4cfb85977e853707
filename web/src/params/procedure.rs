use domain::Id;
use domain::{IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, UpdateMap};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    #[param(value_type = Uuid)]
    pub(crate) user_id: Id,
    pub(crate) is_active: Option<bool>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        query_filter_map.insert(
            "user_id".to_string(),
            Some(Value::Uuid(Some(Box::new(self.user_id)))),
        );
        if let Some(is_active) = self.is_active {
            query_filter_map.insert("is_active".to_string(), Some(Value::Bool(Some(is_active))));
        }
        query_filter_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateParams {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) price_cents: Option<i64>,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) is_active: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert("name".to_string(), Some(Value::String(Some(Box::new(name)))));
        }
        if let Some(description) = self.description {
            update_map.insert(
                "description".to_string(),
                Some(Value::String(Some(Box::new(description)))),
            );
        }
        if let Some(price_cents) = self.price_cents {
            update_map.insert(
                "price_cents".to_string(),
                Some(Value::BigInt(Some(price_cents))),
            );
        }
        if let Some(duration_minutes) = self.duration_minutes {
            update_map.insert(
                "duration_minutes".to_string(),
                Some(Value::Int(Some(duration_minutes))),
            );
        }
        if let Some(is_active) = self.is_active {
            update_map.insert("is_active".to_string(), Some(Value::Bool(Some(is_active))));
        }
        update_map
    }
}
