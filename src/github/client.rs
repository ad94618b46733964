use crate::error::{PinakesError, Result};
use crate::github::types::{FileEntry, FileKind, RepoSummary};
use octocrab::{models, params, Octocrab};

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.personal_token(token.to_string());
        }
        let octo = builder.build().map_err(classify)?;
        Ok(Self { octo })
    }

    /// One listing request, one page. Caching is the caller's concern.
    pub async fn fetch_repo_page(
        &self,
        org: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepoSummary>> {
        let result = self
            .octo
            .orgs(org)
            .list_repos()
            .repo_type(params::repos::Type::Public)
            .sort(params::repos::Sort::Updated)
            .per_page(per_page.clamp(1, 100))
            .page(page.max(1))
            .send()
            .await
            .map_err(classify)?;

        Ok(result.items.iter().map(summary_from).collect())
    }

    pub async fn fetch_root_files(&self, full_name: &str, branch: &str) -> Result<Vec<FileEntry>> {
        let (owner, name) = split_full_name(full_name)?;
        let result = self
            .octo
            .repos(owner, name)
            .get_content()
            .r#ref(branch)
            .send()
            .await
            .map_err(classify)?;

        Ok(result.items.iter().map(file_from).collect())
    }

    pub async fn rate_limit(&self) -> Option<u32> {
        self.octo
            .ratelimit()
            .get()
            .await
            .ok()
            .map(|r| r.rate.remaining as u32)
    }
}

fn summary_from(repo: &models::Repository) -> RepoSummary {
    RepoSummary {
        full_name: repo.full_name.clone().unwrap_or_else(|| repo.name.clone()),
        name: repo.name.clone(),
        description: repo.description.clone(),
        stars: repo.stargazers_count.unwrap_or(0),
        forks: repo.forks_count.unwrap_or(0),
        watchers: repo.watchers_count.unwrap_or(0),
        language: repo
            .language
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::to_string),
        created_at: repo.created_at.unwrap_or_default(),
        updated_at: repo.updated_at.unwrap_or_default(),
        url: repo
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
        default_branch: repo
            .default_branch
            .clone()
            .unwrap_or_else(|| "main".to_string()),
    }
}

fn file_from(content: &models::repos::Content) -> FileEntry {
    FileEntry {
        name: content.name.clone(),
        kind: if content.r#type == "dir" {
            FileKind::Directory
        } else {
            FileKind::File
        },
        url: content.html_url.clone().unwrap_or_default(),
    }
}

fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(PinakesError::Network(format!(
            "invalid repository identifier: {full_name}"
        ))),
    }
}

fn classify(err: octocrab::Error) -> PinakesError {
    match err {
        octocrab::Error::GitHub { source, .. } => PinakesError::HttpStatus {
            status: source.status_code.as_u16(),
            message: source.message,
        },
        other => PinakesError::Network(other.to_string()),
    }
}
