//! Host crate for the cross-crate integration tests under `tests/`.
