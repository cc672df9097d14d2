//! Integration Tests Module
//!
//! End-to-end tests for the task extraction engine. Tests cover the
//! local heuristic pipeline, the agent-relay protocol, and the remote
//! service strategy against a scripted transport.

// Local strategy pipeline tests
mod extraction_test;


// Remote service strategy tests (scripted transport, no network)
mod remote_test;
