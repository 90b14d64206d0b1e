pub mod extraction;
pub mod imputation;
pub mod risk;
pub mod processor;
