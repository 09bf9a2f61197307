pub mod constants;
pub mod literal_utils;
pub mod string_utils;
pub mod validation;
