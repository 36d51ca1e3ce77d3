/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "TextComparator";
pub const APP_NAME: &str = "Text Comparator";

// JSON formatting
pub const DEFAULT_JSON_INDENT: usize = 4;

// Input cache
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

// Reports
pub const REPORTS_DIR: &str = "reports";
pub const REPORT_TITLE: &str = "Text File Comparison Report";
pub const REPORT_RULE_WIDTH: usize = 30;

/// Progress percentages reported by the background worker
pub const PROGRESS_FIRST_READ: u8 = 25;
pub const PROGRESS_SECOND_READ: u8 = 50;
pub const PROGRESS_ALIGNED: u8 = 75;
pub const PROGRESS_DONE: u8 = 100;
