pub const DEFAULT_PADDING: i64 = 50;
pub const DEFAULT_COMBINE_NEARBY: bool = true;
pub const DEFAULT_SQUISH: bool = false;
pub const DEFAULT_OUT_PREFIX: &str = "igv";

pub const SNAPSHOT_EXTENSION: &str = "png";
pub const BATCH_SCRIPT_EXTENSION: &str = "bat";
