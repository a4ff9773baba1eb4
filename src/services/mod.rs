pub mod indicators;
pub mod price_service;
pub mod signal_service;
