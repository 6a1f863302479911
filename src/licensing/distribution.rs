use crate::models::Platform;

/// Builds Keygen Dist download links for the latest release of one product.
#[derive(Debug, Clone)]
pub struct Distribution {
    base_url: String,
    account_id: String,
    product_id: String,
    policy_id: String,
}

impl Distribution {
    pub fn new(base_url: &str, account_id: &str, product_id: &str, policy_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.to_string(),
            product_id: product_id.to_string(),
            policy_id: policy_id.to_string(),
        }
    }

    /// `{base}/v1/{account}/{product}/latest/{platform}/zip?key=..&policy=..`
    ///
    /// An unknown platform drops the platform segment; the link is still built.
    pub fn download_link(&self, platform: Platform, key: &str) -> String {
        let mut segments = vec![
            "v1",
            self.account_id.as_str(),
            self.product_id.as_str(),
            "latest",
        ];
        segments.extend(platform.segment());
        segments.push("zip");

        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s))
            .collect::<Vec<_>>()
            .join("/");

        append_query_params(
            &format!("{}/{}", self.base_url, path),
            &[("key", key), ("policy", &self.policy_id)],
        )
    }
}

fn append_query_params(base_url: &str, params: &[(&str, &str)]) -> String {
    let query_string: String = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", base_url, query_string)
}
