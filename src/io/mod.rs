pub mod excel_write;
pub mod object_store;

use chrono::{DateTime, Local};

/// Timestamp embedded in generated file and object names (`DD-MM-YYYY_HH-MM-SS`).
pub fn file_timestamp(now: DateTime<Local>) -> String {
    now.format("%d-%m-%Y_%H-%M-%S").to_string()
}
