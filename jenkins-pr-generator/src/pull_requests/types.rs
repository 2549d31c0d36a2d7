//! Response shapes of the pull request APIs.

use serde::Deserialize;

/// Element of a GitHub / GitHub Enterprise `pulls` listing.
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubPull {
    pub number: u64,
}

/// A page of the Bitbucket `pullrequests` listing.
#[derive(Debug, Deserialize)]
pub(crate) struct BitbucketPage {
    pub values: Vec<BitbucketPull>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BitbucketPull {
    pub id: u64,
    pub source: BitbucketSource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BitbucketSource {
    pub branch: BitbucketBranch,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BitbucketBranch {
    pub name: String,
}
