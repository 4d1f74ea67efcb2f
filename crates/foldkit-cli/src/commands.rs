pub mod convert;
pub mod fetch;
pub mod generate;
pub mod inspect;
pub mod measure;
pub mod predict;
pub mod solve;
pub mod validate;
