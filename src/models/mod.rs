pub mod analysis;
pub mod requests;
pub mod stock;

pub use analysis::*;
pub use requests::*;
pub use stock::*;
