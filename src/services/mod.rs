pub mod market_data;
pub mod system_status;
pub mod update_control;
