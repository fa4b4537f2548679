pub mod approval_dto;

pub use approval_dto::*;
