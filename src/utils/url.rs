//! URL construction for the generative-language endpoints.
//!
//! Base URLs are normalized so user-supplied overrides with trailing
//! slashes never produce double slashes in the final request URL.

/// Normalize a base URL by removing trailing slashes.
///
/// # Examples
///
/// ```
/// use gemterm::utils::url::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url("https://generativelanguage.googleapis.com/v1beta/"),
///     "https://generativelanguage.googleapis.com/v1beta"
/// );
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Endpoint for fetching a model's metadata; used as the session probe.
pub fn model_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{}", normalize_base_url(base_url), model)
}

/// Endpoint for a non-streaming content generation call.
///
/// # Examples
///
/// ```
/// use gemterm::utils::url::generate_content_url;
///
/// assert_eq!(
///     generate_content_url("https://generativelanguage.googleapis.com/v1beta", "gemini-1.0-pro"),
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.0-pro:generateContent"
/// );
/// ```
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    format!("{}:generateContent", model_url(base_url, model))
}
