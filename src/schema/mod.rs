pub mod params;
pub mod registry;

pub use params::{ParamDomain, ParamSpec, ParameterSchema, RepairFn};
pub use registry::SchemaRegistry;
