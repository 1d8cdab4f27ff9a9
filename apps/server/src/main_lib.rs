use std::sync::Arc;

use crate::{
    config::{Config, StoreConfig},
    domain_events::WebDomainEventSink,
    events::EventBus,
};
use franchise_crm_core::{
    clients::{ClientRepositoryTrait, ClientService, ClientServiceTrait},
    events::DomainEventSink,
    markets::{MarketRepositoryTrait, MarketService, MarketServiceTrait},
    properties::{PropertyRepositoryTrait, PropertyService, PropertyServiceTrait},
    reporting::{ReportingService, ReportingServiceTrait},
    users::{UserRepositoryTrait, UserService, UserServiceTrait},
};
use franchise_crm_storage_sqlite::{
    db::{self, write_actor},
    ClientRepository, MarketRepository, PropertyRepository, UserRepository,
};
use franchise_crm_supabase::{
    PostgrestClient, SupabaseClientRepository, SupabaseMarketRepository,
    SupabasePropertyRepository, SupabaseUserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub client_service: Arc<dyn ClientServiceTrait>,
    pub market_service: Arc<dyn MarketServiceTrait>,
    pub property_service: Arc<dyn PropertyServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub reporting_service: Arc<dyn ReportingServiceTrait>,
    pub event_bus: EventBus,
}

/// The four repositories behind whichever store was configured.
struct Repositories {
    clients: Arc<dyn ClientRepositoryTrait>,
    markets: Arc<dyn MarketRepositoryTrait>,
    properties: Arc<dyn PropertyRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
}

/// Installs the global subscriber. `log` records emitted by the library
/// crates are captured through the subscriber's log bridge.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn open_sqlite(db_path: &str) -> anyhow::Result<Repositories> {
    let db_path = db::init(db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    Ok(Repositories {
        clients: Arc::new(ClientRepository::new(pool.clone(), writer.clone())),
        markets: Arc::new(MarketRepository::new(pool.clone(), writer.clone())),
        properties: Arc::new(PropertyRepository::new(pool.clone(), writer.clone())),
        users: Arc::new(UserRepository::new(pool, writer)),
    })
}

fn open_supabase(url: &str, api_key: &str) -> anyhow::Result<Repositories> {
    let client = PostgrestClient::new(url, api_key)?;
    tracing::info!("Using hosted store at {}", url);

    Ok(Repositories {
        clients: Arc::new(SupabaseClientRepository::new(client.clone())),
        markets: Arc::new(SupabaseMarketRepository::new(client.clone())),
        properties: Arc::new(SupabasePropertyRepository::new(client.clone())),
        users: Arc::new(SupabaseUserRepository::new(client)),
    })
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let repos = match &config.store {
        StoreConfig::Sqlite { db_path } => open_sqlite(db_path)?,
        StoreConfig::Supabase { url, api_key } => open_supabase(url, api_key)?,
    };

    let event_bus = EventBus::new(256);
    let domain_event_sink: Arc<dyn DomainEventSink> =
        Arc::new(WebDomainEventSink::new(event_bus.clone()));

    let client_service = Arc::new(ClientService::new(
        repos.clients.clone(),
        domain_event_sink.clone(),
    ));
    let market_service = Arc::new(MarketService::new(
        repos.markets.clone(),
        domain_event_sink.clone(),
    ));
    let property_service = Arc::new(PropertyService::new(
        repos.properties.clone(),
        domain_event_sink.clone(),
    ));
    let user_service = Arc::new(UserService::new(repos.users.clone(), domain_event_sink));
    let reporting_service = Arc::new(ReportingService::new(
        repos.clients,
        repos.markets,
        repos.properties,
        repos.users,
    ));

    Ok(Arc::new(AppState {
        client_service,
        market_service,
        property_service,
        user_service,
        reporting_service,
        event_bus,
    }))
}
