#[cfg(test)]
mod tests {
    use hyper::HeaderMap;
    use crate::middleware::{add_cors_headers, cache_control, cors_headers};

    #[test]
    fn test_add_cors_headers() {
        let mut headers = HeaderMap::new();
        add_cors_headers(&mut headers);

        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "GET, OPTIONS"
        );
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "Content-Type"
        );
    }

    #[test]
    fn test_add_cors_headers_overwrites() {
        let mut headers = HeaderMap::new();
        headers.insert("access-control-allow-origin", "https://example.com".parse().unwrap());
        add_cors_headers(&mut headers);

        assert_eq!(headers.get_all("access-control-allow-origin").iter().count(), 1);
        assert_eq!(cors_headers().len(), 3);
    }

    #[test]
    fn test_cache_control() {
        assert_eq!(cache_control(), "public, max-age=60");
    }
}
