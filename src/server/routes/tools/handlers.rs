use crate::error::ToolboardError;
use crate::sanitize::ToolForm;
use crate::server::notice::{Notice, NoticeMailbox};
use crate::server::router::ToolboardState;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Redirect},
};
use tracing::{info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while loading tools. Please try again.";
pub const SAVED_MESSAGE: &str = "Tool added successfully.";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save the tool right now. Please try again.";

/// GET /
///
/// Renders the tool list together with any pending notices. A failed fetch
/// still renders the page, with an empty list and an error notice.
pub async fn list_tools(
    State(state): State<ToolboardState>,
    mailbox: NoticeMailbox,
) -> Result<impl IntoResponse, ToolboardError> {
    let (mailbox, mut notices) = mailbox.take();

    let tools = match state.repository.fetch_all().await {
        Ok(tools) => tools,
        Err(_) => {
            notices.push(Notice::error(FETCH_FAILED_MESSAGE));
            Vec::new()
        }
    };

    let body = state.view.render_index(&tools, &notices)?;
    Ok((mailbox, Html(body)))
}

/// POST /add
///
/// Always answers with a redirect to `/`; the outcome travels as a notice.
pub async fn add_tool(
    State(state): State<ToolboardState>,
    mailbox: NoticeMailbox,
    form: Result<Form<ToolForm>, FormRejection>,
) -> impl IntoResponse {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable tool submission; treating as empty");
            ToolForm::default()
        }
    };

    let notice = match form.validate() {
        Err(reason) => {
            info!(%reason, "Tool submission rejected");
            Notice::error(reason.to_string())
        }
        Ok(tool) => match state.repository.insert_with_retry(&tool).await {
            Ok(_) => Notice::success(SAVED_MESSAGE),
            Err(_) => Notice::error(SAVE_FAILED_MESSAGE),
        },
    };

    (mailbox.push(notice), Redirect::to("/"))
}
