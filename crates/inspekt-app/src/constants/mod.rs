//! Report constants

/// Fill for rows due within 3 months (or overdue)
pub const CRITICAL_FILL: u32 = 0x007500;
/// Fill for rows due in 4 to 12 months
pub const WARNING_FILL: u32 = 0xFFA500;
/// Fill for rows due in more than 12 months
pub const NORMAL_FILL: u32 = 0xB30000;

/// Output file name prefix, followed by the report date
pub const REPORT_FILE_PREFIX: &str = "vehicles";
/// Name of the single worksheet
pub const SHEET_NAME: &str = "vehicles";

/// Column width used for every report column
pub const COLUMN_WIDTH: f64 = 16.0;
