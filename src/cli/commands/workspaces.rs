//! Implementation of the `motion-relay workspaces` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::motion::{MotionClient, MotionClientConfig};
use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Workspace;
use crate::domain::ports::MotionApi;

#[derive(Args, Debug)]
pub struct WorkspacesArgs {
    /// Motion API key
    pub api_key: String,

    /// Override the Motion API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct WorkspaceListOutput {
    pub workspaces: Vec<Workspace>,
    pub total: usize,
}

impl CommandOutput for WorkspaceListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["name", "id"]);
        for workspace in &self.workspaces {
            table.add_row(vec![workspace.name.as_str(), workspace.id.as_str()]);
        }
        render_list("workspace", &table, self.total)
    }
}

pub async fn execute(args: WorkspacesArgs, json_mode: bool) -> Result<()> {
    let mut config = MotionClientConfig::new(args.api_key);
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }

    let client = MotionClient::new(config).context("Failed to build Motion client")?;
    let workspaces = client
        .list_workspaces()
        .await
        .context("Failed to list Motion workspaces")?;

    let total = workspaces.len();
    output(&WorkspaceListOutput { workspaces, total }, json_mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_output_lists_workspaces() {
        let out = WorkspaceListOutput {
            workspaces: vec![
                Workspace {
                    id: "ws_1".to_string(),
                    name: "Personal".to_string(),
                },
                Workspace {
                    id: "ws_2".to_string(),
                    name: "Team".to_string(),
                },
            ],
            total: 2,
        };
        let human = out.to_human();
        assert!(human.starts_with("2 workspaces:"));
        assert!(human.contains("Personal"));
        assert!(human.contains("ws_2"));

        let json: serde_json::Value = serde_json::from_str(&out.render(true).unwrap()).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["workspaces"][0]["id"], "ws_1");
    }
}
