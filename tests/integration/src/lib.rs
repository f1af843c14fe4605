//! End-to-end tests for samlsp live under `tests/`.
