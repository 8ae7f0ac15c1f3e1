pub mod dropper;
pub mod audit;
pub mod imputer;
pub mod encoder;
pub mod scaler;
pub mod split;

pub use dropper::*;
pub use audit::*;
pub use imputer::*;
pub use encoder::*;
pub use scaler::*;
pub use split::*;
