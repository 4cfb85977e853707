use domain::Id;
use domain::{IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, UpdateMap};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    #[param(value_type = Uuid)]
    pub(crate) user_id: Id,
    pub(crate) email: Option<String>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        query_filter_map.insert(
            "user_id".to_string(),
            Some(Value::Uuid(Some(Box::new(self.user_id)))),
        );
        if let Some(email) = self.email {
            query_filter_map.insert(
                "email".to_string(),
                Some(Value::String(Some(Box::new(email)))),
            );
        }
        query_filter_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateParams {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
    #[schema(value_type = Object)]
    pub(crate) address: Option<serde_json::Value>,
    pub(crate) notes: Option<String>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert("name".to_string(), Some(Value::String(Some(Box::new(name)))));
        }
        if let Some(email) = self.email {
            update_map.insert(
                "email".to_string(),
                Some(Value::String(Some(Box::new(email)))),
            );
        }
        if let Some(phone) = self.phone {
            update_map.insert(
                "phone".to_string(),
                Some(Value::String(Some(Box::new(phone)))),
            );
        }
        if let Some(address) = self.address {
            update_map.insert(
                "address".to_string(),
                Some(Value::Json(Some(Box::new(address)))),
            );
        }
        if let Some(notes) = self.notes {
            update_map.insert(
                "notes".to_string(),
                Some(Value::String(Some(Box::new(notes)))),
            );
        }
        update_map
    }
}
