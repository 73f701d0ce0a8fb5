pub mod log_utils;
pub mod path_utils;
