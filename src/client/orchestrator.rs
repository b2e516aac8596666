use log::{debug, warn};

use super::api::{ClientError, ServiceApi};
use super::form::ServiceForm;
use crate::model::ServiceRecord;

/// Whether a form submission creates a record or updates the bound one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    View,
    Edit {
        id: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Load,
    Search(String),
    Submit(ServiceForm),
    Edit(i32),
    Cancel,
    /// `confirmed` is the answer to the confirmation prompt.
    Delete { id: i32, confirmed: bool },
}

/// Everything the page shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub mode: FormMode,
    pub form: ServiceForm,
    pub rows: Vec<ServiceRecord>,
    pub notice: Option<Notice>,
}

impl PageState {
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::View => "Add Service",
            FormMode::Edit { .. } => "Update Service",
        }
    }

    fn error(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(Notice::Error(message.into()));
        self
    }

    fn success(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(Notice::Success(message.into()));
        self
    }

    fn reset_form(mut self) -> Self {
        self.mode = FormMode::View;
        self.form = ServiceForm::default();
        self
    }
}

/// Message for a failed call: the server's own message when it rejected the
/// request, otherwise `transport`.
fn failure_message(err: &ClientError, fallback: &str, transport: &str) -> String {
    warn!("service api call failed: {err}");
    match err {
        ClientError::Rejected {
            message: Some(message),
            ..
        } => message.clone(),
        ClientError::Rejected { message: None, .. } | ClientError::MissingData => {
            fallback.to_string()
        }
        ClientError::Transport(_) | ClientError::InvalidUrl(_) => transport.to_string(),
    }
}

/// Applies one user action. Failed calls leave mode, form and rows as they
/// were and only set the notice.
pub async fn update(state: PageState, action: Action, api: &dyn ServiceApi) -> PageState {
    debug!("handling {action:?} in {:?}", state.mode);
    let state = PageState {
        notice: None,
        ..state
    };

    match action {
        Action::Load => reload(state, api).await,
        Action::Search(query) => search(state, query.trim(), api).await,
        Action::Submit(form) => submit(state, form, api).await,
        Action::Edit(id) => edit(state, id, api).await,
        Action::Cancel => state.reset_form(),
        Action::Delete { confirmed: false, .. } => state,
        Action::Delete { id, confirmed: true } => delete(state, id, api).await,
    }
}

async fn reload(mut state: PageState, api: &dyn ServiceApi) -> PageState {
    match api.list_all().await {
        Ok(rows) => {
            state.rows = rows;
            state
        }
        Err(err) => {
            let message = failure_message(
                &err,
                "Failed to load services",
                "Failed to load services. Please check your connection.",
            );
            state.error(message)
        }
    }
}

async fn search(mut state: PageState, query: &str, api: &dyn ServiceApi) -> PageState {
    if query.is_empty() {
        return state.error("Please enter a vehicle number to search");
    }

    match api.search(query).await {
        Ok(rows) if rows.is_empty() => {
            state.rows = rows;
            state.error("No services found for this vehicle number")
        }
        Ok(rows) => {
            state.rows = rows;
            state
        }
        Err(ClientError::Rejected { .. }) => state.error("Search failed"),
        Err(err) => {
            warn!("search failed: {err}");
            state.error("Search failed. Please try again.")
        }
    }
}

async fn submit(mut state: PageState, form: ServiceForm, api: &dyn ServiceApi) -> PageState {
    state.form = form;
    let request = match state.form.validate() {
        Ok(request) => request,
        Err(err) => return state.error(err.to_string()),
    };

    let (result, done, fallback, transport) = match state.mode {
        FormMode::View => (
            api.create(&request).await,
            "Service added successfully!",
            "Failed to add service",
            "Network error. Please check your connection.",
        ),
        FormMode::Edit { id } => (
            api.update(id, &request).await,
            "Service updated successfully!",
            "Failed to update service",
            "Update failed. Please try again.",
        ),
    };

    match result {
        Ok(_) => reload(state.reset_form().success(done), api).await,
        Err(err) => {
            let message = failure_message(&err, fallback, transport);
            state.error(message)
        }
    }
}

async fn edit(mut state: PageState, id: i32, api: &dyn ServiceApi) -> PageState {
    match api.get(id).await {
        Ok(Some(record)) => {
            state.form = ServiceForm::from_record(&record);
            state.mode = FormMode::Edit { id };
            state
        }
        Ok(None) => state.error("Service not found"),
        Err(err) => {
            let message = failure_message(
                &err,
                "Service not found",
                "Failed to load service. Please check your connection.",
            );
            state.error(message)
        }
    }
}

async fn delete(state: PageState, id: i32, api: &dyn ServiceApi) -> PageState {
    match api.delete(id).await {
        Ok(()) => reload(state.success("Service deleted successfully!"), api).await,
        Err(err) => {
            let message = failure_message(
                &err,
                "Failed to delete service",
                "Delete failed. Please try again.",
            );
            state.error(message)
        }
    }
}
