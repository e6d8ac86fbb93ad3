pub mod time_provider;
