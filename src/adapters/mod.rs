// Adapters layer: concrete implementations of the domain ports (HTTP API client, file storage).

pub mod http;
pub mod storage;
