pub mod lenient;
pub mod time_utils;
