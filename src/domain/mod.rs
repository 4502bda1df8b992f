// Domain layer: models and ports. Adapters and use cases depend on this, never the other way round.

pub mod model;
pub mod ports;
