//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the workers against
//! mock adapters (or the host simulation drivers). All tests run on the
//! host with no real hardware required.

mod driver_stack_tests;
mod mock_hw;
mod shared_state_tests;
mod worker_tests;
