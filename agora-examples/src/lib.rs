//! See the `examples/` directory for runnable demos.
