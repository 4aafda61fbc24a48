//! Living Matrix: a headless host around the `matrix_core` engine.

pub mod app;

pub mod model {
    pub use matrix_core::*;
}

pub use matrix_data as data;
