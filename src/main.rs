mod api;
mod app_state;
mod db;
mod env_config;
mod layers;
mod logger;
mod services;
mod utils;

use app_state::models::AppState;
use axum::Router;
use db::postgres::postgres_service::PostgresService;
use env_config::models::{app_config::AppConfig, app_env::AppEnv, app_setting::AppSettings};
use layers::{create_cors, create_trace};
use services::update_control::monitor::StalenessMonitor;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing::{debug, error, info};
use utils::time_provider::{SystemTimeProvider, TimeProvider};

#[tokio::main]
async fn main() {
    // Инициализация приложения
    let settings: Arc<AppSettings> = Arc::new(initialize_application());

    // Подключение к базе данных
    let postgres_service = initialize_database_connection(settings.clone()).await;

    // Настройка адреса сервера
    let server_address: SocketAddr = format!(
        "{}:{}",
        settings.app_env.server_address, settings.app_env.server_port,
    )
    .parse()
    .expect("Invalid server address configuration");

    info!("Server will listen on: {}", server_address);

    // Создание глобального состояния приложения
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let app_state: Arc<AppState> =
        match AppState::new(settings.clone(), &postgres_service, time_provider.clone()) {
            Ok(state) => Arc::new(state),
            Err(err) => {
                error!("Invalid system status configuration: {}", err);
                panic!("Cannot continue with invalid configuration");
            }
        };

    // Запуск фоновых сервисов
    initialize_background_services(app_state.clone(), time_provider);

    // Создание API роутера
    let app_router = create_application_router(app_state);

    // Запуск HTTP сервера
    start_http_server(app_router, server_address).await;

    info!("Server stopped");
}

/// Инициализирует настройки и логирование приложения
fn initialize_application() -> AppSettings {
    let environment = AppEnv::new();
    let config = AppConfig::new(&environment.env);
    let app_settings = AppSettings {
        app_config: config,
        app_env: environment,
    };

    logger::init_logger(
        &app_settings.app_config.log.level,
        &app_settings.app_config.log.format,
        app_settings.app_env.is_production(),
    )
    .expect("Failed to initialize logger");

    info!("Starting Market Feed Gate application...");
    info!("Current environment: {}", app_settings.app_env.env);

    if app_settings.app_env.is_local() {
        info!("Running in local development mode");
        debug!("Configuration details: {:#?}", app_settings.app_config);
    } else {
        info!("Running in {} mode", app_settings.app_env.env);
    }

    app_settings
}

/// Устанавливает соединение с PostgreSQL
async fn initialize_database_connection(settings: Arc<AppSettings>) -> PostgresService {
    info!("Initializing database connection...");

    match PostgresService::new(&settings).await {
        Ok(service) => {
            info!("PostgreSQL connection established successfully");
            service
        }
        Err(err) => {
            error!("Failed to connect to PostgreSQL: {}", err);
            panic!("Cannot continue without PostgreSQL connection");
        }
    }
}

/// Создает API роутер со всеми эндпоинтами и middleware
fn create_application_router(app_state: Arc<AppState>) -> Router {
    let cors = create_cors(&app_state.settings.app_config.cors);

    api::router(app_state).layer(cors).layer(create_trace())
}

/// Запускает HTTP сервер на указанном адресе
async fn start_http_server(app: Router, addr: SocketAddr) {
    info!("Starting HTTP server on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind to address {}: {}", addr, err);
            panic!("Cannot start server: {}", err);
        }
    };

    info!("Server started successfully, now accepting connections");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
        panic!("Server failed: {}", err);
    }
}

/// Ожидает Ctrl+C для корректной остановки
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    info!("Shutdown signal received");
}

/// Инициализирует и запускает все фоновые сервисы
fn initialize_background_services(
    app_state: Arc<AppState>,
    time_provider: Arc<dyn TimeProvider>,
) {
    let monitor = StalenessMonitor::new(
        app_state.update_control_service.clone(),
        app_state.settings.app_config.staleness_monitor.clone(),
        time_provider,
    );

    if monitor.start().is_some() {
        info!("Staleness monitor started");
    }

    info!("Background services initialized successfully");
}
