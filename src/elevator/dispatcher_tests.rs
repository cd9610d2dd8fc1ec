/*
 * Unit tests for the call admission policy
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_admit_same_floor_by_state
 * - test_admit_sets_target_when_free
 * - test_admit_queues_behind_target
 * - test_admit_drops_duplicates
 * - test_admit_keeps_fifo_when_target_is_empty
 * - test_call_queue_advance_is_fifo
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::elevator::dispatcher::admit;
    use crate::elevator::{Admission, CallQueue};
    use crate::shared::ElevatorState::{
        DoorsClosing, DoorsOpen, DoorsOpening, Idle, Moving, Stopped,
    };

    #[test]
    fn test_admit_same_floor_by_state() {
        // Purpose: Verify that a request for the current floor is handled through the doors

        // Arrange
        let calls = CallQueue::new();

        // Act + Assert
        assert_eq!(admit(Idle, 3, &calls, 3), Admission::OpenDoors);
        assert_eq!(admit(DoorsClosing, 3, &calls, 3), Admission::OpenDoors);
        assert_eq!(admit(DoorsOpen, 3, &calls, 3), Admission::HoldDoors);
        assert_eq!(admit(DoorsOpening, 3, &calls, 3), Admission::AlreadyServing);
        assert_eq!(admit(Moving, 3, &calls, 3), Admission::AlreadyServing);
        assert_eq!(admit(Stopped, 3, &calls, 3), Admission::AlreadyServing);
    }

    #[test]
    fn test_admit_sets_target_when_free() {
        // Purpose: Verify that a new floor becomes the target while idle or in a door cycle

        // Arrange
        let calls = CallQueue::new();

        // Act + Assert
        for state in [Idle, DoorsOpening, DoorsOpen, DoorsClosing] {
            assert_eq!(admit(state, 0, &calls, 4), Admission::SetTarget);
        }
    }

    #[test]
    fn test_admit_queues_behind_target() {
        // Purpose: Verify that a new floor is queued when a target is already set

        // Arrange
        let mut calls = CallQueue::new();
        calls.set_target(5);

        // Act + Assert
        assert_eq!(admit(Moving, 0, &calls, 6), Admission::Enqueue);
        assert_eq!(admit(Stopped, 0, &calls, 6), Admission::Enqueue);
        assert_eq!(admit(DoorsOpen, 0, &calls, 6), Admission::Enqueue);
    }

    #[test]
    fn test_admit_drops_duplicates() {
        // Purpose: Verify that floors already targeted or queued are dropped

        // Arrange
        let mut calls = CallQueue::new();
        calls.set_target(5);
        calls.enqueue(6);

        // Act + Assert
        assert_eq!(admit(Moving, 0, &calls, 5), Admission::Duplicate);
        assert_eq!(admit(Moving, 0, &calls, 6), Admission::Duplicate);
        assert!(!calls.enqueue(6));
        assert!(!calls.set_target(5));
    }

    #[test]
    fn test_admit_keeps_fifo_when_target_is_empty() {
        // Purpose: Verify that a request never jumps ahead of floors already waiting

        // Arrange
        let mut calls = CallQueue::new();
        calls.enqueue(6);

        // Act
        let admission = admit(Idle, 0, &calls, 2);

        // Assert
        assert_eq!(admission, Admission::Enqueue);
    }

    #[test]
    fn test_call_queue_advance_is_fifo() {
        // Purpose: Verify that the queue hands out floors in request order

        // Arrange
        let mut calls = CallQueue::new();
        calls.set_target(1);
        calls.enqueue(4);
        calls.enqueue(2);

        // Act + Assert
        assert_eq!(calls.advance(), Some(4));
        assert_eq!(calls.pending().collect::<Vec<u8>>(), vec![2]);
        assert_eq!(calls.advance(), Some(2));
        assert_eq!(calls.advance(), None);
        assert!(!calls.has_target());
    }
}
