use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
    Mutex,
};

use chrono::Duration;
use log::*;
use neonbite_engine::{
    db_types::{
        CartSnapshot,
        FulfilmentStep,
        NewCartSnapshot,
        NewOrder,
        Order,
        OrderFulfilment,
        Product,
    },
    traits::{
        CartApiError,
        CartManagement,
        CatalogApiError,
        CatalogManagement,
        NotifierError,
        OrderApiError,
        OrderManagement,
        OrderNotifier,
        StorefrontDatabase,
    },
    SqliteDatabase,
};
use sqlx::{migrate::MigrateDatabase, Sqlite};

/// Creates a fresh, fully migrated database at `url` and hands back a handle to it.
pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.migrate().await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
    db
}

pub fn random_db_path() -> String {
    format!("sqlite://{}/neonbite_test_{}.db", std::env::temp_dir().display(), rand::random::<u64>())
}

/// A notifier that records what it sends and can be flipped into a failing state, standing in for an SMTP relay
/// that is down.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    fail: Arc<AtomicBool>,
    sent: Arc<Mutex<Vec<(String, i64)>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(to, _)| to.clone()).collect()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

/// A storage handle whose cart deletion can be flipped into a failing state, standing in for a database that
/// starts erroring partway through a checkout. Everything else passes straight through to the real store.
#[derive(Clone)]
pub struct BrokenCartStore {
    db: SqliteDatabase,
    broken: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl BrokenCartStore {
    pub fn new(db: SqliteDatabase) -> Self {
        Self { db, broken: Arc::new(AtomicBool::new(true)) }
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }
}

impl CatalogManagement for BrokenCartStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products().await
    }

    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogApiError> {
        self.db.fetch_product(id).await
    }
}

impl CartManagement for BrokenCartStore {
    async fn insert_cart_snapshot(&self, cart: NewCartSnapshot) -> Result<i64, CartApiError> {
        self.db.insert_cart_snapshot(cart).await
    }

    async fn fetch_cart_snapshots(&self) -> Result<Vec<CartSnapshot>, CartApiError> {
        self.db.fetch_cart_snapshots().await
    }

    async fn delete_cart_snapshot(&self, id: i64) -> Result<bool, CartApiError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CartApiError::DatabaseError("disk I/O error".to_string()));
        }
        self.db.delete_cart_snapshot(id).await
    }
}

impl OrderManagement for BrokenCartStore {
    async fn insert_order(
        &self,
        order: NewOrder,
        cart_id: Option<i64>,
        notify_email: Option<String>,
    ) -> Result<Order, OrderApiError> {
        self.db.insert_order(order, cart_id, notify_email).await
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderApiError> {
        self.db.fetch_order(id).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        self.db.fetch_orders().await
    }

    async fn advance_fulfilment(&self, order_id: i64, step: FulfilmentStep) -> Result<(), OrderApiError> {
        self.db.advance_fulfilment(order_id, step).await
    }

    async fn fetch_fulfilment(&self, order_id: i64) -> Result<Option<OrderFulfilment>, OrderApiError> {
        self.db.fetch_fulfilment(order_id).await
    }

    async fn fetch_stalled_fulfilments(&self, older_than: Duration) -> Result<Vec<OrderFulfilment>, OrderApiError> {
        self.db.fetch_stalled_fulfilments(older_than).await
    }
}

impl StorefrontDatabase for BrokenCartStore {}

impl OrderNotifier for RecordingNotifier {
    async fn order_confirmation(&self, to: &str, order: &Order) -> Result<(), NotifierError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifierError("smtp relay down".to_string()));
        }
        self.sent.lock().unwrap().push((to.to_string(), order.id));
        Ok(())
    }
}
