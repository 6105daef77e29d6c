use clap::Args;
use uuid::Uuid;

use formcore_daemon::http_server::api::client::ApiError;
use formcore_daemon::http_server::api::v0::form::publish::PublishRequest;

#[derive(Args, Debug, Clone)]
pub struct Publish {
    /// Form ID (or use --name)
    #[arg(long, group = "form_identifier")]
    pub form_id: Option<Uuid>,

    /// Form name (or use --form-id)
    #[arg(long, group = "form_identifier")]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FormPublishError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Either --form-id or --name must be provided")]
    NoFormIdentifier,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Publish {
    type Error = FormPublishError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let form_id = if let Some(id) = self.form_id {
            id
        } else if let Some(ref name) = self.name {
            ctx.client.resolve_form_name(name).await?
        } else {
            return Err(FormPublishError::NoFormIdentifier);
        };

        let response = ctx.client.call(PublishRequest { form_id }).await?;
        Ok(format!("published form {}", response.form.id))
    }
}
