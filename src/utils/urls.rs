use url::{ParseError, Url};

pub fn to_url(host: &str) -> Result<Url, ParseError> {
    Url::parse(host)
}

// joins path segments onto a base url, keeping any path the base already has
pub fn join_url(base: &str, segments: &[&str]) -> Result<Url, ParseError> {
    let mut url = to_url(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?;
        path.pop_if_empty();
        for segment in segments {
            for part in segment.split('/').filter(|p| !p.is_empty()) {
                path.push(part);
            }
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn test_join_url() {
        let url = join_url("https://cdn.example.com", &["images", "a.png"]).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/images/a.png");

        let url = join_url("http://localhost:9000/", &["bucket", "images/a.png"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/bucket/images/a.png");

        let url = join_url("https://example.com/base/", &["x.gif"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/base/x.gif");

        assert!(join_url("not a url", &["x"]).is_err());
    }
}
