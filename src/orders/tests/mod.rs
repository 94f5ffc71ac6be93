//! Unit tests for the order entity and lifecycle state machine.
