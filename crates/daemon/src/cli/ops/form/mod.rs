use clap::{Args, Subcommand};

pub mod get;
pub mod publish;

use crate::cli::op::Op;
use formcore_daemon::http_server::api::client::ApiError;
use formcore_daemon::http_server::api::v0::form::create::CreateRequest;
use formcore_daemon::http_server::api::v0::form::list::ListRequest;

crate::command_enum! {
    (Create, CreateRequest),
    (List, ListRequest),
    (Get, get::Get),
    (Publish, publish::Publish),
}

// Rename the generated Command to FormCommand for clarity
pub type FormCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Form {
    #[command(subcommand)]
    pub command: FormCommand,
}

#[async_trait::async_trait]
impl Op for Form {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[async_trait::async_trait]
impl Op for CreateRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.clone()).await?;
        Ok(format!(
            "created form {} ({})",
            response.form.name, response.form.id
        ))
    }
}

#[async_trait::async_trait]
impl Op for ListRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.clone()).await?;
        if response.items.is_empty() {
            return Ok("no forms".to_string());
        }

        let mut lines = Vec::new();
        for form in &response.items {
            let status = if form.is_published {
                "published"
            } else {
                "draft"
            };
            lines.push(format!("{}  {}  [{}]", form.id, form.name, status));
        }
        lines.push(format!(
            "page {}/{} ({} total)",
            response.page,
            response.total_pages.max(1),
            response.total
        ));
        Ok(lines.join("\n"))
    }
}
