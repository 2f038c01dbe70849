use crate::{access_nested_map, Arrive, AsyncMemo, Blame, Fetch};
use serde_json::Value;

/// Default base url for the GitHub REST API.
pub const GITHUB_API: &str = "https://api.github.com";

/// The `GithubOrgClient` struct reads public information about a GitHub organization.
///
/// The client owns its [`Fetch`] implementation and two memo slots, one for the organization
/// document and one for the repository listing.  Each is fetched at most once per client: the
/// first read goes to the network, later reads come from the slot.  A failed fetch is handed back
/// unchanged and nothing is cached, so the next read tries again.
///
/// ```
/// use dawdle::{CannedFetch, GithubOrgClient};
/// use serde_json::json;
///
/// # tokio_test(async {
/// let repos_url = "https://api.github.com/orgs/google/repos";
/// let fetch = CannedFetch::new()
///     .with_response("https://api.github.com/orgs/google", json!({"repos_url": repos_url}))
///     .with_response(repos_url, json!([{"name": "truth"}]));
/// let client = GithubOrgClient::new("google", fetch);
/// assert_eq!(client.public_repos(None).await?, vec!["truth".to_string()]);
/// # Ok::<(), dawdle::Blame>(())
/// # });
/// # fn tokio_test<F: std::future::Future<Output = Result<(), dawdle::Blame>>>(f: F) {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f).unwrap();
/// # }
/// ```
#[derive(Debug, derive_getters::Getters)]
pub struct GithubOrgClient<F> {
    api_url: String,
    org_name: String,
    #[getter(skip)]
    fetch: F,
    #[getter(skip)]
    org: AsyncMemo<Value>,
    #[getter(skip)]
    repos: AsyncMemo<Value>,
}

impl<F: Fetch> GithubOrgClient<F> {
    /// Creates a client for `org_name` against the public GitHub API.
    pub fn new(org_name: impl Into<String>, fetch: F) -> Self {
        Self::with_api_url(GITHUB_API, org_name, fetch)
    }

    /// Creates a client against a different API root, such as a mock server in tests or a
    /// GitHub Enterprise host.  A trailing slash on `api_url` is ignored.
    pub fn with_api_url(
        api_url: impl Into<String>,
        org_name: impl Into<String>,
        fetch: F,
    ) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            org_name: org_name.into(),
            fetch,
            org: AsyncMemo::new(),
            repos: AsyncMemo::new(),
        }
    }

    /// Borrows the fetcher, mostly so tests can inspect a [`crate::CannedFetch`].
    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    /// The url of the organization document.
    pub fn org_url(&self) -> String {
        format!("{}/orgs/{}", self.api_url, self.org_name)
    }

    /// The organization document, fetched on first read and memoized.
    #[tracing::instrument(skip(self), fields(org = %self.org_name))]
    pub async fn org(&self) -> Arrive<&Value> {
        self.org
            .get_or_try_init(|| async {
                let url = self.org_url();
                tracing::info!("Fetching {url}");
                self.fetch.get_json(&url).await
            })
            .await
    }

    /// The `repos_url` field of the organization document.
    ///
    /// Will [`Blame::KeyNotFound`] if the document has no `repos_url`, and [`Blame::Shape`] if
    /// it does but the value is not a string.
    pub async fn public_repos_url(&self) -> Arrive<String> {
        let org = self.org().await?;
        let url = access_nested_map(org, ["repos_url"])?;
        url.as_str().map(str::to_string).ok_or_else(|| Blame::Shape {
            field: "repos_url".to_string(),
            expected: "a string",
        })
    }

    /// The repository listing found at [`GithubOrgClient::public_repos_url`], memoized.
    #[tracing::instrument(skip(self), fields(org = %self.org_name))]
    pub async fn repos_payload(&self) -> Arrive<&Value> {
        self.repos
            .get_or_try_init(|| async {
                let url = self.public_repos_url().await?;
                tracing::info!("Fetching {url}");
                self.fetch.get_json(&url).await
            })
            .await
    }

    /// Names of the organization's public repositories, in the order the API lists them.
    ///
    /// When `license` is given, only repositories whose `license.key` matches are kept.
    /// Will [`Blame::KeyNotFound`] if a kept entry has no `name`, and [`Blame::Shape`] if the
    /// listing is not an array or a name is not a string.
    #[tracing::instrument(skip(self), fields(org = %self.org_name))]
    pub async fn public_repos(&self, license: Option<&str>) -> Arrive<Vec<String>> {
        let payload = self.repos_payload().await?;
        let repos = payload.as_array().ok_or_else(|| Blame::Shape {
            field: "repos".to_string(),
            expected: "an array",
        })?;
        let names = repos
            .iter()
            .filter(|repo| license.map_or(true, |key| Self::has_license(repo, key)))
            .map(|repo| -> Arrive<String> {
                let name = access_nested_map(repo, ["name"])?;
                name.as_str().map(str::to_string).ok_or_else(|| Blame::Shape {
                    field: "name".to_string(),
                    expected: "a string",
                })
            })
            .collect::<Arrive<Vec<String>>>()?;
        tracing::trace!("{} repos listed.", names.len());
        Ok(names)
    }

    /// Whether `repo` declares `license_key` under `license.key`.
    ///
    /// A repository with no license, or a license with no key, simply does not match.
    pub fn has_license(repo: &Value, license_key: &str) -> bool {
        match access_nested_map(repo, ["license", "key"]) {
            Ok(key) => key.as_str() == Some(license_key),
            Err(_) => false,
        }
    }
}
