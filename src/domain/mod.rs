// Domain layer: seat model and the ports the allocator talks through.

pub mod model;
pub mod ports;
