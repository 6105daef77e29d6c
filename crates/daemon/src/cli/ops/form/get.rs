use clap::Args;
use uuid::Uuid;

use formcore_daemon::http_server::api::client::ApiError;
use formcore_daemon::http_server::api::v0::form::get::GetRequest;

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Form ID (or use --name)
    #[arg(long, group = "form_identifier")]
    pub form_id: Option<Uuid>,

    /// Form name (or use --form-id)
    #[arg(long, group = "form_identifier")]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FormGetError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Either --form-id or --name must be provided")]
    NoFormIdentifier,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = FormGetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let form_id = if let Some(id) = self.form_id {
            id
        } else if let Some(ref name) = self.name {
            ctx.client.resolve_form_name(name).await?
        } else {
            return Err(FormGetError::NoFormIdentifier);
        };

        let detail = ctx.client.call(GetRequest { form_id }).await?;

        let mut lines = Vec::new();
        lines.push(format!("form:       {}", detail.form.name));
        lines.push(format!("id:         {}", detail.form.id));
        lines.push(format!("owner:      {}", detail.form.owner_id));
        lines.push(format!("published:  {}", detail.form.is_published));
        lines.push(format!("visibility: {:?}", detail.form.visibility));
        if let Some(version) = &detail.version {
            lines.push(format!("draft:      v{}", version.version));
        }
        if !detail.fields.is_empty() {
            lines.push("fields:".to_string());
            for field in &detail.fields {
                lines.push(format!("  {}  ({})", field.key, field.field_type));
            }
        }
        Ok(lines.join("\n"))
    }
}
