// Domain layer: request/response models and the ports the core drives.

pub mod model;
pub mod ports;
