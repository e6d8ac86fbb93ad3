pub mod api_update_control_repository;
pub mod health_check_repository;
pub mod market_data_repository;
