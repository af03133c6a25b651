use shared::participation::Lead;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Error;
use crate::models::LeadRecord;

/// Where participation records live. Phone digits are the unique key.
#[derive(Clone)]
pub enum LeadStore {
    Postgres(PgPool),
    Memory(Arc<Mutex<HashMap<String, LeadRecord>>>),
}

/// Keeps only the last four digits for log output.
pub fn mask_phone(phone: &str) -> String {
    let visible = phone.len().saturating_sub(4);
    format!("{}{}", "*".repeat(visible), &phone[visible..])
}

impl LeadStore {
    pub fn in_memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// Inserts the lead unless its phone is already known. Returns whether a row was created.
    pub async fn register(&self, lead: &Lead) -> Result<bool, Error> {
        let record = LeadRecord {
            id: Uuid::new_v4(),
            name: lead.name().to_string(),
            phone: lead.phone().to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        let inserted = match self {
            Self::Postgres(pool) => {
                let id: Option<Uuid> = sqlx::query_scalar(
                    r#"
                    INSERT INTO leads (id, name, phone, created_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (phone) DO NOTHING
                    RETURNING id
                    "#,
                )
                .bind(record.id)
                .bind(&record.name)
                .bind(&record.phone)
                .bind(record.created_at)
                .fetch_optional(pool)
                .await?;
                id.is_some()
            }
            Self::Memory(leads) => {
                let mut leads = leads.lock().await;
                if leads.contains_key(&record.phone) {
                    false
                } else {
                    leads.insert(record.phone.clone(), record);
                    true
                }
            }
        };

        if inserted {
            info!("New lead registered for phone {}", mask_phone(lead.phone()));
        } else {
            debug!("Phone {} already participated", mask_phone(lead.phone()));
        }
        Ok(inserted)
    }

    pub async fn has_participated(&self, phone: &str) -> Result<bool, Error> {
        match self {
            Self::Postgres(pool) => {
                let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM leads WHERE phone = $1)")
                    .bind(phone)
                    .fetch_one(pool)
                    .await?;
                Ok(exists)
            }
            Self::Memory(leads) => Ok(leads.lock().await.contains_key(phone)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_registers_each_phone_once() {
        let store = LeadStore::in_memory();
        let lead = Lead::parse("Ana", "(11) 98765-4321").unwrap();
        assert!(store.register(&lead).await.unwrap());
        assert!(!store.register(&lead).await.unwrap());
        assert!(store.has_participated("11987654321").await.unwrap());
        assert!(!store.has_participated("11912345678").await.unwrap());
    }

    #[test]
    fn masks_all_but_last_four_digits() {
        assert_eq!(mask_phone("11987654321"), "*******4321");
        assert_eq!(mask_phone("123"), "123");
    }
}
