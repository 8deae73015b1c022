//! Environment configuration for the GitHub issue plugin.

pub const GITHUB_API_BASE_DEFAULT: &str = "https://api.github.com";
pub const GITHUB_REQUEST_TIMEOUT_MS_DEFAULT: u64 = 30_000;
pub const GITHUB_RETRY_MAX_ATTEMPTS_DEFAULT: usize = 3;
pub const GITHUB_RETRY_BASE_DELAY_MS_DEFAULT: u64 = 500;

#[derive(Debug, Clone)]
/// Public struct `GithubPluginConfig` used across Rook components.
pub struct GithubPluginConfig {
    pub access_token: String,
    pub api_base: String,
    /// Raw `owner/repo` slug; parsed when the plugin is constructed.
    pub default_repository: Option<String>,
    pub skip_acknowledged_issues: bool,
    pub request_timeout_ms: u64,
    pub retry_max_attempts: usize,
    pub retry_base_delay_ms: u64,
}

impl GithubPluginConfig {
    /// Reads the process environment once. Absent values fall back to the
    /// defaults above; an absent default repository is not an error.
    pub fn from_env() -> Self {
        Self {
            access_token: non_empty_env("GITHUB_ACCESS_TOKEN").unwrap_or_default(),
            api_base: non_empty_env("GITHUB_BASE_URL")
                .unwrap_or_else(|| GITHUB_API_BASE_DEFAULT.to_string()),
            default_repository: non_empty_env("GITHUB_DEFAULT_REPO"),
            skip_acknowledged_issues: env_flag("GITHUB_SKIP_ACKNOWLEDGED_ISSUES"),
            request_timeout_ms: GITHUB_REQUEST_TIMEOUT_MS_DEFAULT,
            retry_max_attempts: GITHUB_RETRY_MAX_ATTEMPTS_DEFAULT,
            retry_base_delay_ms: GITHUB_RETRY_BASE_DELAY_MS_DEFAULT,
        }
    }
}

impl Default for GithubPluginConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_base: GITHUB_API_BASE_DEFAULT.to_string(),
            default_repository: None,
            skip_acknowledged_issues: false,
            request_timeout_ms: GITHUB_REQUEST_TIMEOUT_MS_DEFAULT,
            retry_max_attempts: GITHUB_RETRY_MAX_ATTEMPTS_DEFAULT,
            retry_base_delay_ms: GITHUB_RETRY_BASE_DELAY_MS_DEFAULT,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{env_flag, GithubPluginConfig, GITHUB_API_BASE_DEFAULT};

    #[test]
    fn unit_default_config_targets_the_public_endpoint() {
        let config = GithubPluginConfig::default();
        assert_eq!(config.api_base, GITHUB_API_BASE_DEFAULT);
        assert!(config.default_repository.is_none());
        assert!(!config.skip_acknowledged_issues);
    }

    #[test]
    fn unit_env_flag_accepts_common_truthy_spellings() {
        std::env::set_var("ROOK_TEST_FLAG_TRUTHY", "Yes");
        std::env::set_var("ROOK_TEST_FLAG_FALSY", "off");
        assert!(env_flag("ROOK_TEST_FLAG_TRUTHY"));
        assert!(!env_flag("ROOK_TEST_FLAG_FALSY"));
        assert!(!env_flag("ROOK_TEST_FLAG_UNSET"));
        std::env::remove_var("ROOK_TEST_FLAG_TRUTHY");
        std::env::remove_var("ROOK_TEST_FLAG_FALSY");
    }
}
