pub const INVALID_PARAMETERS: &str = "Invalid Url Parameters";
pub const UPSTREAM_ERROR: &str = "OpenLibrary server returned an Error";
pub const INVALID_JSON: &str = "OpenLibrary returned an Invalid JSON";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// Status and raw body text returned by the search upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> UpstreamResponse {
        UpstreamResponse {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(response(200).is_success());
        assert!(response(299).is_success());
        assert!(!response(199).is_success());
        assert!(!response(300).is_success());
        assert!(!response(502).is_success());
    }
}
