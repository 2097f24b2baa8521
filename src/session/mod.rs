pub mod fingerprint;
pub mod request;
pub mod service;
