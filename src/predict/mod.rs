pub mod compose;
pub mod engine;
pub mod halo;
pub mod local;
pub mod nonlocal;
