pub mod batch;
pub mod local;
