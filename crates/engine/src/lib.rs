pub mod board;
pub mod curve;
pub mod distance;
pub mod error;
pub mod estimator;
pub mod timeline;
