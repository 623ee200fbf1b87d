// Domain layer: plain records and the ports (traits) the pipelines are written against.

pub mod model;
pub mod ports;
