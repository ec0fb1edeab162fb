// Adapters layer: concrete implementations for external systems (storage, sinks, http).

pub mod http;
pub mod sinks;
pub mod storage;
