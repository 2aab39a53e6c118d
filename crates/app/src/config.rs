/// Base URL of the REST backend, fixed at build time.
///
/// Override with the `API_URL` environment variable when building;
/// defaults to a local development backend.
pub fn api_base_url() -> String {
    option_env!("API_URL")
        .unwrap_or("http://localhost:8000/api")
        .to_string()
}
