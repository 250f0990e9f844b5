// crates/actionscope-core/src/helpers/mod.rs

pub mod time;
