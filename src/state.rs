use crate::{
    config::{RuntimeConfiguration, StoreConfig},
    data::{StudentStore, memory_store::MemoryStudentStore, postgres_store::PostgresStudentStore},
    error::RosterResult,
    maud_conveniences::render_nav,
};
use maud::{DOCTYPE, Markup, html};
use sqlx::postgres::PgPoolOptions;
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct RosterState {
    store: Arc<dyn StudentStore>,
}

impl RosterState {
    pub async fn new(options: PgPoolOptions, config: &RuntimeConfiguration) -> RosterResult<Self> {
        let store: Arc<dyn StudentStore> = match config.store() {
            StoreConfig::Postgres(db_config) => {
                Arc::new(PostgresStudentStore::new(options, &db_config.get_db_path()).await?)
            }
            StoreConfig::Memory => {
                warn!("Using the in-memory student store, nothing will be persisted");
                Arc::new(MemoryStudentStore::new())
            }
        };

        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Student Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (render_nav())
                    div class="w-full flex flex-col items-center justify-center p-8" {
                        (markup)
                    }
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for RosterState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
