// Domain layer: scanner data views and the API port the keywords depend on.

pub mod model;
pub mod ports;
