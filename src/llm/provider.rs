//! Provider-specific URL and authentication handling.

/// Supported LLM providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// `OpenAI` (api.openai.com)
    OpenAI,
    /// Azure `OpenAI` Service
    AzureOpenAI {
        /// Deployment name (required for Azure)
        deployment_name: String,
        /// API version (e.g., "2024-08-01-preview")
        api_version: String,
    },
    /// Any other OpenAI-compatible endpoint.
    Generic,
}

/// How the API key travels with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `api-key: <key>` (Azure)
    ApiKeyHeader,
}

impl Provider {
    /// Detect provider from base URL.
    ///
    /// Azure deployments need a deployment name that the URL does not carry;
    /// the model name is used in its place.
    #[must_use]
    pub fn detect_from_url(base_url: &str, model: &str) -> Self {
        let lower = base_url.to_lowercase();

        if lower.contains("openai.azure.com") {
            Self::AzureOpenAI {
                deployment_name: model.to_string(),
                api_version: "2024-08-01-preview".to_string(),
            }
        } else if lower.contains("api.openai.com") {
            Self::OpenAI
        } else {
            Self::Generic
        }
    }

    #[must_use]
    pub fn auth_scheme(&self) -> AuthScheme {
        match self {
            Self::AzureOpenAI { .. } => AuthScheme::ApiKeyHeader,
            Self::OpenAI | Self::Generic => AuthScheme::Bearer,
        }
    }

    /// Build the chat completions URL for this provider.
    #[must_use]
    pub fn build_chat_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');

        match self {
            Self::AzureOpenAI {
                deployment_name,
                api_version,
            } => format!(
                "{base}/openai/deployments/{deployment_name}/chat/completions?api-version={api_version}"
            ),
            Self::OpenAI | Self::Generic => format!("{base}/v1/chat/completions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_openai() {
        let provider = Provider::detect_from_url("https://api.openai.com", "gpt-3.5-turbo");
        assert_eq!(provider, Provider::OpenAI);
        assert_eq!(provider.auth_scheme(), AuthScheme::Bearer);
    }

    #[test]
    fn test_detect_azure_uses_model_as_deployment() {
        let provider =
            Provider::detect_from_url("https://my-resource.openai.azure.com", "buddy-35");
        assert_eq!(
            provider,
            Provider::AzureOpenAI {
                deployment_name: "buddy-35".to_string(),
                api_version: "2024-08-01-preview".to_string(),
            }
        );
        assert_eq!(provider.auth_scheme(), AuthScheme::ApiKeyHeader);
    }

    #[test]
    fn test_detect_generic() {
        let provider = Provider::detect_from_url("http://localhost:11434", "llama3");
        assert_eq!(provider, Provider::Generic);
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let url = Provider::OpenAI.build_chat_url("https://api.openai.com/");
        assert_eq!(url, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_build_url_azure() {
        let provider = Provider::AzureOpenAI {
            deployment_name: "gpt-4".to_string(),
            api_version: "2024-08-01-preview".to_string(),
        };
        let url = provider.build_chat_url("https://my-resource.openai.azure.com");
        assert_eq!(
            url,
            "https://my-resource.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2024-08-01-preview"
        );
    }
}
