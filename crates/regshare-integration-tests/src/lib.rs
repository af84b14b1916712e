//! Empty library; this crate exists solely to host the `tests/` directory.
