pub mod instrument;
pub mod price;

pub use instrument::*;
pub use price::*;
