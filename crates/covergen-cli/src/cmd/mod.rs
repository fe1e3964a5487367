// crates/covergen-cli/src/cmd/mod.rs

pub mod generate;
pub mod normalize;
pub mod resolve;
pub mod template;
