pub mod macros;
pub mod structs;

pub use structs::ButtonId;
pub use structs::Direction;
pub use structs::ElevatorSnapshot;
pub use structs::ElevatorState;
