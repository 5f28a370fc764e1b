pub mod permissions;
pub mod policy;
pub mod settings;
pub mod storage;
