pub mod validators;
pub mod network_utils;
pub mod report_formatter;
