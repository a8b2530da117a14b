pub mod enclosed;
pub mod export;
pub mod shadow;
pub mod snapshot;
pub mod solar;
pub mod sweep;
pub mod zones;
