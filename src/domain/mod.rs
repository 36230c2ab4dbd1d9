// Domain layer: faculty records and the ports (API, storage, config) the rest of the crate talks through.

pub mod model;
pub mod ports;
