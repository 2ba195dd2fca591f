use anyhow::{Context, Error};
use dotenv::dotenv;
use std::env;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    env::var(key).with_context(|| format!("missing environment variable {key}"))
}

// unset and blank values both count as absent
pub fn get_optional_env_var(key: &str) -> Option<String> {
    dotenv().ok();
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn get_env_var_or(key: &str, default: &str) -> String {
    get_optional_env_var(key).unwrap_or_else(|| default.to_string())
}

pub fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{get_env_var, parse_or};

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or(Some("8080".to_string()), 3000u16), 8080);
        assert_eq!(parse_or(Some("nope".to_string()), 3000u16), 3000);
        assert_eq!(parse_or::<u64>(None, 60), 60);
    }

    #[test]
    fn test_missing_var_names_the_key() {
        let err = get_env_var("PIXDROP_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("PIXDROP_SURELY_UNSET_VARIABLE"));
    }
}
