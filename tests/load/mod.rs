//! Concurrency tests

mod concurrent_scoring;
