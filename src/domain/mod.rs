// Domain layer: value types and ports (interfaces) shared by the exercises.

pub mod model;
pub mod order;
pub mod pokemon;
pub mod ports;
