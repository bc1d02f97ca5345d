//! End-to-end adapter tests
