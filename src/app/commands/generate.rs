//! Context generation for a project record file.

use std::path::Path;

use crate::app::AppContext;
use crate::domain::{AppError, ProjectRecord};
use crate::ports::DocumentStore;

/// Options for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Force the legacy single-template path.
    pub legacy: bool,
    /// MCP servers to advertise in the tools section.
    pub mcp_servers: Vec<String>,
}

/// Read a project record from a JSON file.
pub fn load_project<D: DocumentStore>(
    ctx: &AppContext<D>,
    path: &Path,
) -> Result<ProjectRecord, AppError> {
    let path = ctx.root().join(path);
    ProjectRecord::from_json(&ctx.store().read(&path)?)
}

/// Execute the generate command.
///
/// Rejects records without a name, template and slice; everything after
/// that point produces text.
pub fn execute<D: DocumentStore>(
    ctx: &AppContext<D>,
    project: &ProjectRecord,
    options: &GenerateOptions,
) -> Result<String, AppError> {
    let integrator = ctx.integrator().with_mcp_servers(options.mcp_servers.clone());
    if !integrator.validate_project(Some(project)) {
        return Err(AppError::InvalidProject(
            "a project needs a name, template and slice".to_string(),
        ));
    }

    if options.legacy {
        return Ok(integrator.generate_context_from_project(project));
    }
    Ok(integrator.generate(project, &ctx.engine()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryDocumentStore;

    const PROJECT: &str = r#"{
        "id": "p1",
        "name": "Test Project",
        "template": "react-nextjs",
        "slice": "foundation",
        "instruction": "implementation",
        "isMonorepo": false,
        "customData": {"recentEvents": "Added authentication system"}
    }"#;

    fn context() -> AppContext<MemoryDocumentStore> {
        AppContext::new("/work", MemoryDocumentStore::new().with_file("/work/project.json", PROJECT))
            .unwrap()
    }

    #[test]
    fn loads_project_relative_to_root() {
        let project = load_project(&context(), Path::new("project.json")).unwrap();

        assert_eq!(project.name, "Test Project");
        assert_eq!(project.custom_data.recent_events.as_deref(), Some("Added authentication system"));
    }

    #[test]
    fn legacy_flag_uses_builtin_template() {
        let ctx = context();
        let project = load_project(&ctx, Path::new("project.json")).unwrap();

        let output =
            execute(&ctx, &project, &GenerateOptions { legacy: true, ..Default::default() }).unwrap();

        assert!(output.contains("Ready for implementation work on foundation slice."));
    }

    #[test]
    fn engine_path_is_default() {
        let ctx = context();
        let project = load_project(&ctx, Path::new("project.json")).unwrap();

        let output = execute(&ctx, &project, &GenerateOptions::default()).unwrap();

        assert!(output.starts_with("We are continuing work on our project"));
        assert!(output.contains("### Current Events\nAdded authentication system"));
    }

    #[test]
    fn rejects_incomplete_project() {
        let project = ProjectRecord { name: "Only a name".into(), ..ProjectRecord::default() };

        let result = execute(&context(), &project, &GenerateOptions::default());

        assert!(matches!(result, Err(AppError::InvalidProject(_))));
    }
}
