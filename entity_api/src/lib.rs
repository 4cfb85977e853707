use chrono::{Days, Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, Value};
use std::collections::HashMap;

pub use entity::{
    appointment_status, appointments, calendar_connections, clients, procedures, provider,
    sync_events, sync_outcome, Id,
};

pub mod appointment;
pub mod calendar_connection;
pub mod client;
pub mod error;
pub mod mutate;
pub mod procedure;
pub mod query;
pub mod sync_event;

/// `QueryFilterMap` is a data structure that serves as a bridge for translating filter parameters
/// between different layers of the application. It is essentially a wrapper around a `HashMap`
/// where the keys are filter parameter names (as `String`) and the values are optional `Value` types
/// from `sea_orm`.
///
/// This structure is particularly useful in scenarios where you need to pass filter parameters
/// from a web request down to the database query layer in a type-safe and organized manner.
///
/// # Example
///
/// ```
/// use sea_orm::Value;
/// use entity_api::QueryFilterMap;
///
/// let mut query_filter_map = QueryFilterMap::new();
/// query_filter_map.insert("client_id".to_string(), Some(Value::String(Some(Box::new("a_client_id".to_string())))));
/// let filter_value = query_filter_map.get("client_id");
/// ```
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// `IntoQueryFilterMap` is a trait that provides a method for converting a struct into a `QueryFilterMap`.
/// This is particularly useful for translating data between different layers of the application,
/// such as from web request parameters to database query filters.
///
/// Implementing this trait for a struct allows you to define how the fields of the struct should be
/// mapped to the keys and values of the `QueryFilterMap`. This ensures that the data is passed
/// in a type-safe and organized manner.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();
    // All seeded records belong to one demo professional. The platform keys
    // ownership by an externally-issued user id.
    let demo_user_id = Id::new_v4();

    let limpeza_de_pele = procedures::ActiveModel {
        user_id: Set(demo_user_id),
        name: Set("Limpeza de Pele".to_owned()),
        description: Set(Some("Limpeza de pele profunda com extração".to_owned())),
        price_cents: Set(18_000),
        duration_minutes: Set(90),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let drenagem = procedures::ActiveModel {
        user_id: Set(demo_user_id),
        name: Set("Drenagem Linfática".to_owned()),
        description: Set(None),
        price_cents: Set(12_000),
        duration_minutes: Set(60),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let ana = clients::ActiveModel {
        user_id: Set(demo_user_id),
        name: Set("Ana Souza".to_owned()),
        email: Set(Some("ana.souza@gmail.com".to_owned())),
        phone: Set(Some("+55 11 91234-5678".to_owned())),
        address: Set(Some(serde_json::json!({
            "street": "Rua Augusta, 1200",
            "city": "São Paulo",
            "state": "SP",
        }))),
        notes: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let beatriz = clients::ActiveModel {
        user_id: Set(demo_user_id),
        name: Set("Beatriz Lima".to_owned()),
        email: Set(None),
        phone: Set(Some("+55 11 99876-5432".to_owned())),
        address: Set(None),
        notes: Set(Some("Prefere atendimento no período da manhã".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    // One appointment already synced, a few pending so the first sync batch
    // has something to do.
    appointments::ActiveModel {
        user_id: Set(demo_user_id),
        client_id: Set(ana.id.clone().unwrap()),
        procedure_id: Set(Some(limpeza_de_pele.id.clone().unwrap())),
        scheduled_datetime: Set((now - Duration::days(7)).into()),
        duration_minutes: Set(Some(90)),
        notes: Set(None),
        status: Set(appointment_status::AppointmentStatus::Completed),
        calendar_synced: Set(true),
        google_event_id: Set(Some("evt-seeded-1".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    appointments::ActiveModel {
        user_id: Set(demo_user_id),
        client_id: Set(ana.id.clone().unwrap()),
        procedure_id: Set(Some(drenagem.id.clone().unwrap())),
        scheduled_datetime: Set(now
            .checked_add_days(Days::new(3))
            .unwrap()
            .into()),
        duration_minutes: Set(Some(60)),
        notes: Set(Some("Retorno".to_owned())),
        status: Set(appointment_status::AppointmentStatus::Confirmed),
        calendar_synced: Set(false),
        google_event_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    appointments::ActiveModel {
        user_id: Set(demo_user_id),
        client_id: Set(beatriz.id.clone().unwrap()),
        procedure_id: Set(None),
        scheduled_datetime: Set(now
            .checked_add_days(Days::new(5))
            .unwrap()
            .into()),
        duration_minutes: Set(None),
        notes: Set(None),
        status: Set(appointment_status::AppointmentStatus::Scheduled),
        calendar_synced: Set(false),
        google_event_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
}
