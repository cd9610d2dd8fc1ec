pub mod panel;
pub mod passenger;
pub mod proximity;

pub use panel::{ButtonPanel, PanelLayout};
pub use passenger::Passenger;
pub use proximity::{EdgeDetector, ProximityCall};
