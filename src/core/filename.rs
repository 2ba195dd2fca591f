use crate::core::data_uri::ImageType;
use chrono::Utc;
use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// 36^13 > 2^64, so any u64 fits in 13 digits
const SEGMENT_LEN: usize = 13;

fn to_base36(mut value: u64) -> String {
    let mut digits = [b'0'; SEGMENT_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36_DIGITS[(value % 36) as usize];
        value /= 36;
    }
    digits.iter().map(|&b| b as char).collect()
}

/// Two base36 segments drawn from the 122 random bits of a v4 uuid.
pub fn random_token() -> String {
    let (high, low) = Uuid::new_v4().as_u64_pair();
    format!("{}{}", to_base36(high), to_base36(low))
}

/// `{epoch-millis}-{token}.{ext}`. The extension comes from the validated
/// image type only, never from anything the client sent.
pub fn generate_filename(image_type: ImageType) -> String {
    generate_filename_at(Utc::now().timestamp_millis(), image_type)
}

pub fn generate_filename_at(epoch_millis: i64, image_type: ImageType) -> String {
    format!(
        "{}-{}.{}",
        epoch_millis,
        random_token(),
        image_type.extension()
    )
}
