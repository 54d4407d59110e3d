//! Concrete physical models
//!
//! - [`GaussianControl`]: forcing assembled from a control vector (inverse design)
//! - [`GaussianManufactured`]: steady manufactured solution
//! - [`OscillatingManufactured`]: unsteady manufactured solution

pub mod control;
pub mod manufactured;

pub use control::{CONTROL_SHARPNESS, GaussianControl};
pub use manufactured::{GaussianManufactured, OscillatingManufactured};
