pub mod api_update_control;
pub mod market_data;
