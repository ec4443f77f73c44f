use std::path::PathBuf;

pub const SPARK_URL: &str = "https://query1.finance.yahoo.com/v7/finance/spark";
pub const LOOKBACK_RANGE: &str = "2d";
pub const SESSION_INTERVAL: &str = "1d";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const OUTPUT_FILE_NAME: &str = "closing_data_table.html";
pub const PNG_FILE_NAME: &str = "closing_data_table.png";
pub const HTML2CANVAS_URL: &str = "https://html2canvas.hertzen.com/dist/html2canvas.min.js";
pub const FONT_IMPORT_URL: &str =
    "https://fonts.googleapis.com/css2?family=IBM+Plex+Sans&display=swap";

/// Europe/Istanbul has been fixed at UTC+03:00 since 2016.
pub const SOURCE_UTC_OFFSET_SECS: i64 = 3 * 3600;
/// Static shift from Istanbul wall-clock to the US Eastern approximation.
pub const CONVERSION_SHIFT_HOURS: i64 = 7;
/// Inclusive gate window in the converted frame, as seconds from midnight.
pub const WINDOW_OPEN_SECS: u32 = 17 * 3600;
pub const WINDOW_CLOSE_SECS: u32 = 23 * 3600 + 59 * 60 + 59;

pub const EXIT_REJECTED: i32 = 2;
pub const EXIT_FAILURE: i32 = 1;

pub fn markets_instruments() -> Vec<(&'static str, &'static str)> {
    vec![
        ("XU100.IS", "BIST 100"),
        ("^GSPC", "S&P 500"),
        ("^STOXX", "Euro Stoxx 600"),
        ("USDTRY=X", "USD/TRY"),
        ("EURTRY=X", "EUR/TRY"),
        ("GC=F", "Altın (ons)"),
    ]
}

pub fn global_instruments() -> Vec<(&'static str, &'static str)> {
    vec![
        ("^IXIC", "Nasdaq"),
        ("^GDAXI", "DAX"),
        ("^FTSE", "FTSE 100"),
        ("^N225", "Nikkei 225"),
        ("BZ=F", "Brent"),
        ("BTC-USD", "Bitcoin"),
    ]
}

pub fn default_output_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
