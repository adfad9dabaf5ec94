//! Tool abstractions and the normalizer tools

pub mod normalizers;
pub mod tool;

pub use normalizers::{
    NormalizeActivityTool, NormalizeBudgetTool, NormalizeFlightTool, NormalizeHotelPricingTool,
    NormalizeHotelSearchTool,
};
pub use tool::{Tool, ToolRegistry};
