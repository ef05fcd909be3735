//! Library surface of the `lendscore` binary, split out so integration
//! tests can drive the training and prediction flows directly.
pub mod predict;
pub mod train;
