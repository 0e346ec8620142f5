use crate::dependency_analysis::domain::{
    BuildTool, GradleProject, MavenProject, Project, Repository,
};
use crate::ports::inbound::ScanningAnalysis;
use crate::ports::outbound::{ReportRow, ReportSink};
use crate::shared::Result;
use async_trait::async_trait;

/// FindRepositoryOrderUseCase - reports the order in which a project's
/// repositories are consulted
///
/// Maven always falls back to Maven Central, so it is listed last for Maven
/// projects that do not declare it.
pub struct FindRepositoryOrderUseCase;

impl FindRepositoryOrderUseCase {
    pub fn new() -> Self {
        Self
    }

    fn effective_order(project: &dyn Project) -> Vec<Repository> {
        let mut repositories = Vec::new();
        for repository in project.repositories() {
            let seen = repositories
                .iter()
                .any(|r: &Repository| r.normalized_uri() == repository.normalized_uri());
            if !seen {
                repositories.push(repository.clone());
            }
        }
        if project.build_tool() == BuildTool::Maven
            && !repositories.iter().any(Repository::is_maven_central)
        {
            repositories.push(Repository::maven_central());
        }
        repositories
    }

    fn rewrite_project(&self, project: &mut dyn Project, sink: &dyn ReportSink) {
        let key = project.project_key();
        for (index, repository) in Self::effective_order(project).into_iter().enumerate() {
            let rank = index + 1;
            project.add_marker(&format!("Repository #{}: {}", rank, repository.uri));
            sink.insert_row(ReportRow::RepositoryOrder {
                project: key.clone(),
                rank,
                id: repository.id.unwrap_or_default(),
                uri: repository.uri,
            });
        }
    }
}

impl Default for FindRepositoryOrderUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScanningAnalysis for FindRepositoryOrderUseCase {
    type Accumulator = ();

    fn name(&self) -> &'static str {
        "repository-order"
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn initial_value(&self) -> Self::Accumulator {}

    fn rewrite_maven(&self, project: &mut MavenProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }

    fn rewrite_gradle(&self, project: &mut GradleProject, _accumulator: &(), sink: &dyn ReportSink) {
        self.rewrite_project(project, sink);
    }
}
