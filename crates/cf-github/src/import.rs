//! Repository import pipeline
//!
//! Walks an organization's repositories and turns each one into a catalog
//! project through the service layer. One bad repository never aborts the
//! batch; it is counted and its error recorded instead.

use std::time::Duration;

use async_trait::async_trait;
use cf_core::ServiceResult;
use cf_db::SqlRunner;
use cf_services::{CreateProject, ProjectService, ProjectTechStackService, TechStackService};

#[cfg(test)]
use mockall::automock;

use crate::client::{FetchHalt, RepoSource};
use crate::error::GithubError;
use crate::heuristics::{
    derive_project_code, derive_status, format_project_name, suggest_stack_codes,
};
use crate::models::Repository;

const ITEM_DELAY: Duration = Duration::from_millis(100);

/// Catalog operations the import pipeline needs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSink: Send + Sync {
    async fn project_code_exists(&self, project_code: &str) -> ServiceResult<bool>;
    async fn create_project(&self, request: CreateProject) -> ServiceResult<()>;
    async fn tech_stack_codes(&self) -> ServiceResult<Vec<String>>;
    async fn assign_tech_stacks(
        &self,
        project_code: &str,
        tech_stack_codes: Vec<String>,
    ) -> ServiceResult<()>;
}

/// Counters for one import run
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub total_repositories: usize,
    pub imported: usize,
    pub failed: usize,
    pub skipped_existing: usize,
    pub skipped_archived: usize,
    pub errors: Vec<String>,
}

/// Drives the fetch-derive-create pipeline
pub struct ImportService<S, C> {
    source: S,
    sink: C,
}

impl<S: RepoSource, C: CatalogSink> ImportService<S, C> {
    pub fn new(source: S, sink: C) -> Self {
        Self { source, sink }
    }

    /// Imports every repository of `organization` as a project.
    ///
    /// A fetch halt (missing org, rate limit) adds one summary error but
    /// the repositories gathered before it are still processed. Only
    /// transport failures return `Err`.
    pub async fn import_organization(
        &self,
        organization: &str,
    ) -> Result<ImportSummary, GithubError> {
        tracing::info!(organization, "starting repository import");
        let mut summary = ImportSummary::default();

        let outcome = self.source.org_repositories(organization).await?;
        summary.total_repositories = outcome.repositories.len();
        match outcome.halt {
            FetchHalt::Completed => {}
            FetchHalt::OrgNotFound => summary
                .errors
                .push(format!("Organization {organization} not found.")),
            FetchHalt::Forbidden => summary.errors.push(
                "GitHub API access forbidden; rate limit exceeded or token invalid.".to_string(),
            ),
            FetchHalt::Failed(status) => summary
                .errors
                .push(format!("GitHub API request failed with status {status}.")),
        }

        for repository in &outcome.repositories {
            self.import_repository(repository, &mut summary).await;
            tokio::time::sleep(ITEM_DELAY).await;
        }

        tracing::info!(
            imported = summary.imported,
            failed = summary.failed,
            skipped = summary.skipped_existing + summary.skipped_archived,
            "repository import finished"
        );
        Ok(summary)
    }

    async fn import_repository(&self, repository: &Repository, summary: &mut ImportSummary) {
        if repository.archived {
            summary.skipped_archived += 1;
            tracing::info!(repository = %repository.name, "skipping archived repository");
            return;
        }

        let project_code = derive_project_code(&repository.name);
        let exists = self
            .sink
            .project_code_exists(&project_code)
            .await
            .into_data()
            .unwrap_or(false);
        if exists {
            summary.skipped_existing += 1;
            tracing::info!(project_code = %project_code, "project already exists, skipping");
            return;
        }

        let request = CreateProject {
            project_code: project_code.clone(),
            project_name: format_project_name(&repository.name),
            repo_url: Some(repository.html_url.clone()),
            start_date: repository.created_at.map(|t| t.date_naive()),
            end_date: repository.updated_at.map(|t| t.date_naive()),
            project_description: Some(
                repository
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Repository: {}", repository.full_name)),
            ),
            status: Some(derive_status(repository)),
            teams: Vec::new(),
        };

        let created = self.sink.create_project(request).await;
        if created.is_success() {
            summary.imported += 1;
            tracing::info!(project_code = %project_code, "repository imported");
            let has_language = repository
                .language
                .as_deref()
                .map(|language| !language.trim().is_empty())
                .unwrap_or(false);
            if has_language {
                self.assign_stacks(&project_code, repository).await;
            }
        } else {
            summary.failed += 1;
            let message = created.message().unwrap_or("unknown error").to_string();
            tracing::error!(
                repository = %repository.name,
                message = %message,
                "repository import failed"
            );
            summary
                .errors
                .push(format!("{}: {}", repository.name, message));
        }
    }

    /// Association failures are logged, never counted against the project.
    async fn assign_stacks(&self, project_code: &str, repository: &Repository) {
        let suggested = suggest_stack_codes(repository.language.as_deref(), &repository.topics);
        if suggested.is_empty() {
            return;
        }
        let Some(known) = self.sink.tech_stack_codes().await.into_data() else {
            tracing::warn!(project_code = %project_code, "could not load tech stack catalog");
            return;
        };
        let valid: Vec<String> = suggested
            .into_iter()
            .filter(|code| known.iter().any(|k| k == code))
            .collect();
        if valid.is_empty() {
            return;
        }
        let count = valid.len();
        let result = self.sink.assign_tech_stacks(project_code, valid).await;
        if result.is_success() {
            tracing::info!(project_code = %project_code, count, "tech stacks associated");
        } else {
            tracing::warn!(
                project_code = %project_code,
                message = result.message().unwrap_or("unknown error"),
                "failed to associate tech stacks"
            );
        }
    }
}

/// `CatalogSink` over the real feature services
pub struct ServiceSink {
    projects: ProjectService,
    tech_stacks: TechStackService,
    project_tech_stacks: ProjectTechStackService,
}

impl ServiceSink {
    pub fn new(sql: SqlRunner) -> Self {
        Self {
            projects: ProjectService::new(sql.clone()),
            tech_stacks: TechStackService::new(sql.clone()),
            project_tech_stacks: ProjectTechStackService::new(sql),
        }
    }
}

#[async_trait]
impl CatalogSink for ServiceSink {
    async fn project_code_exists(&self, project_code: &str) -> ServiceResult<bool> {
        self.projects.code_exists(project_code).await
    }

    async fn create_project(&self, request: CreateProject) -> ServiceResult<()> {
        self.projects.create(request).await.erased()
    }

    async fn tech_stack_codes(&self) -> ServiceResult<Vec<String>> {
        self.tech_stacks.all().await.map(|stacks| {
            stacks
                .into_iter()
                .map(|stack| stack.tech_stack_code)
                .collect()
        })
    }

    async fn assign_tech_stacks(
        &self,
        project_code: &str,
        tech_stack_codes: Vec<String>,
    ) -> ServiceResult<()> {
        self.project_tech_stacks
            .assign(project_code, tech_stack_codes)
            .await
            .erased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FetchOutcome, MockRepoSource};

    fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: format!("acme/{name}"),
            html_url: format!("https://github.com/acme/{name}"),
            clone_url: format!("https://github.com/acme/{name}.git"),
            ..Repository::default()
        }
    }

    fn source_returning(repositories: Vec<Repository>, halt: FetchHalt) -> MockRepoSource {
        let mut source = MockRepoSource::new();
        source.expect_org_repositories().returning(move |_| {
            Ok(FetchOutcome {
                repositories: repositories.clone(),
                halt: halt.clone(),
            })
        });
        source
    }

    #[tokio::test]
    async fn test_import_skips_archived_and_existing() {
        let mut archived = repo("old-tool");
        archived.archived = true;
        // "alpha-app" and "alpha.app" derive the same project code.
        let source = source_returning(
            vec![archived, repo("alpha-app"), repo("alpha.app")],
            FetchHalt::Completed,
        );

        let mut sink = MockCatalogSink::new();
        let mut already_seen = false;
        sink.expect_project_code_exists()
            .times(2)
            .returning(move |_| {
                let result = ServiceResult::success(already_seen);
                already_seen = true;
                result
            });
        sink.expect_create_project()
            .times(1)
            .withf(|request| request.project_code == "PROJ_ALPHA_APP")
            .returning(|_| ServiceResult::success(()));

        let summary = ImportService::new(source, sink)
            .import_organization("acme")
            .await
            .unwrap();

        assert_eq!(summary.total_repositories, 3);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped_archived, 1);
        assert_eq!(summary.skipped_existing, 1);
        assert_eq!(summary.failed, 0);
        assert!(summary.errors.is_empty());
    }

    #[tokio::test]
    async fn test_import_records_create_failures() {
        let source = source_returning(vec![repo("broken-app")], FetchHalt::Completed);

        let mut sink = MockCatalogSink::new();
        sink.expect_project_code_exists()
            .returning(|_| ServiceResult::success(false));
        sink.expect_create_project()
            .returning(|_| ServiceResult::failure("Failed to create project."));

        let summary = ImportService::new(source, sink)
            .import_organization("acme")
            .await
            .unwrap();

        assert_eq!(summary.imported, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.errors,
            vec!["broken-app: Failed to create project.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_import_preserves_partial_results_on_halt() {
        // Rate-limited after the first page; that page still imports.
        let source = source_returning(vec![repo("page-one-app")], FetchHalt::Forbidden);

        let mut sink = MockCatalogSink::new();
        sink.expect_project_code_exists()
            .returning(|_| ServiceResult::success(false));
        sink.expect_create_project()
            .times(1)
            .returning(|_| ServiceResult::success(()));

        let summary = ImportService::new(source, sink)
            .import_organization("acme")
            .await
            .unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].contains("forbidden"));
    }

    #[tokio::test]
    async fn test_import_assigns_only_known_stacks() {
        let mut with_language = repo("shop-ui");
        with_language.language = Some("C#".to_string());
        with_language.topics = vec!["react".to_string()];
        let source = source_returning(vec![with_language], FetchHalt::Completed);

        let mut sink = MockCatalogSink::new();
        sink.expect_project_code_exists()
            .returning(|_| ServiceResult::success(false));
        sink.expect_create_project()
            .returning(|_| ServiceResult::success(()));
        // Catalog only knows TS001; the React suggestion is dropped.
        sink.expect_tech_stack_codes()
            .returning(|| ServiceResult::success(vec!["TS001".to_string()]));
        sink.expect_assign_tech_stacks()
            .times(1)
            .withf(|code, stacks| code == "PROJ_SHOP_UI" && stacks == &["TS001".to_string()])
            .returning(|_, _| ServiceResult::success(()));

        let summary = ImportService::new(source, sink)
            .import_organization("acme")
            .await
            .unwrap();

        assert_eq!(summary.imported, 1);
    }

    #[tokio::test]
    async fn test_import_uses_description_fallback() {
        let source = source_returning(vec![repo("no-desc")], FetchHalt::Completed);

        let mut sink = MockCatalogSink::new();
        sink.expect_project_code_exists()
            .returning(|_| ServiceResult::success(false));
        sink.expect_create_project()
            .withf(|request| {
                request.project_description.as_deref() == Some("Repository: acme/no-desc")
                    && request.project_name == "No Desc"
            })
            .returning(|_| ServiceResult::success(()));

        let summary = ImportService::new(source, sink)
            .import_organization("acme")
            .await
            .unwrap();

        assert_eq!(summary.imported, 1);
    }
}
