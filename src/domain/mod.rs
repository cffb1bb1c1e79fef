// Domain layer: request and table models plus the ports adapters implement.

pub mod model;
pub mod ports;
pub mod table;
