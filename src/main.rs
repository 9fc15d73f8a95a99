mod admin;
mod catalog;
mod config;
mod handlers;
mod models;
mod store;

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin::AdminGate;
use config::Config;
use models::Booking;
use store::BookingStore;

pub struct AppState {
    pub store: Mutex<BookingStore>,
    pub admin: Mutex<AdminGate>,
}

impl AppState {
    pub fn new(store: BookingStore, admin: AdminGate) -> Self {
        Self {
            store: Mutex::new(store),
            admin: Mutex::new(admin),
        }
    }

    /// Every store operation runs under this lock, so the availability check
    /// and the insert in `create_booking` happen as one step
    pub fn store(&self) -> MutexGuard<'_, BookingStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn admin(&self) -> MutexGuard<'_, AdminGate> {
        self.admin.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    let mut store = BookingStore::new();
    let catalog = store.catalog();
    tracing::info!(
        "Loaded catalog: {} rooms, {} daily time slots",
        catalog.rooms.len(),
        catalog.time_slots.len()
    );

    if config.seed_demo_bookings {
        tracing::info!("Loading demo bookings");
        load_demo_bookings(&mut store)?;
    }

    let state = Arc::new(AppState::new(
        store,
        AdminGate::new(config.admin_password.clone()),
    ));

    let app = handlers::router(state);

    // Start server
    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the store with the sample bookings shipped in the binary
fn load_demo_bookings(store: &mut BookingStore) -> Result<()> {
    const DEMO_BOOKINGS: &str = include_str!("../resources/demo_bookings.json");

    let bookings: Vec<Booking> =
        serde_json::from_str(DEMO_BOOKINGS).context("Failed to parse demo_bookings.json")?;
    let count = store
        .seed(bookings)
        .context("Failed to load demo bookings")?;

    tracing::info!("Loaded {} demo booking(s)", count);
    Ok(())
}
