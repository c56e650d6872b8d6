// Test modules for reqres-contracts crate
//
// Each source file has a corresponding test file that focuses on the
// behaviour that file owns. HTTP round trips live in the integration tests
// under tests/, where a mock server is available.

pub mod helpers;
