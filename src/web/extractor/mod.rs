mod json;

pub use json::{FromValidated, Json};
