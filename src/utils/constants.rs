// 10 MiB ceiling on the decoded image
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

// base64 inflates by 4/3, so the json body needs headroom above MAX_IMAGE_SIZE
pub const SERVER_REQUEST_BODY_LIMIT: usize = 15 * 1024 * 1024;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 60;
pub const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 30;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Image uploaded successfully";
