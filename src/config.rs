
/// Compile-time override for the backend origin, e.g.
/// `CARELOOP_BACKEND_URL=https://api.example.com trunk build`.
const BACKEND_URL_OVERRIDE: Option<&str> = option_env!("CARELOOP_BACKEND_URL");

#[cfg(debug_assertions)]
const DEFAULT_BACKEND_URL: &str = "http://localhost:8081"; // Development URL when running locally

#[cfg(not(debug_assertions))]
const DEFAULT_BACKEND_URL: &str = "https://careloopai-production.up.railway.app";

pub fn get_backend_url() -> &'static str {
    BACKEND_URL_OVERRIDE
        .map(|url| url.trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL)
}

pub fn endpoint(path: &str) -> String {
    format!("{}/{}", get_backend_url(), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_a_single_slash() {
        let base = get_backend_url();
        assert_eq!(endpoint("/auth/logout"), format!("{}/auth/logout", base));
        assert_eq!(endpoint("api/v1/chatbot/ask"), format!("{}/api/v1/chatbot/ask", base));
    }

    #[test]
    fn backend_url_has_no_trailing_slash() {
        assert!(!get_backend_url().ends_with('/'));
    }
}
