pub mod call_queue;
pub mod dispatcher;
pub mod fsm;
mod dispatcher_tests;

pub use call_queue::CallQueue;
pub use dispatcher::Admission;
pub use fsm::ElevatorFSM;
