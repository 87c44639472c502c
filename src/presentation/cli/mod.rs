//! Command dispatch for the `blogdesk` binary. Every command prints its
//! result as pretty JSON on stdout; logs and errors go to stderr.

mod io;
mod print;

use std::sync::Arc;

use tracing::debug;

use crate::application::backend::{BlogBackend, ListQuery};
use crate::application::error::AppError;
use crate::application::listing::ListSynchronizer;
use crate::application::submission::BlogWorkflow;
use crate::config::{Command, CreateArgs, Settings, UpdateArgs};
use crate::infra::http::HttpBlogBackend;

use io::{apply_draft_args, read_image};
use print::print_json;

/// Wire the HTTP backend, list synchronizer and workflow from settings.
pub fn build_workflow(settings: &Settings) -> Result<BlogWorkflow, AppError> {
    let backend: Arc<dyn BlogBackend> = Arc::new(HttpBlogBackend::new(&settings.backend)?);
    let query = ListQuery {
        locale: settings.listing.locale.clone(),
        page: settings.listing.first_page,
        size: settings.listing.page_size.get(),
    };
    let listing = Arc::new(ListSynchronizer::new(backend.clone(), query));
    Ok(BlogWorkflow::new(backend, listing, settings.locales.clone()))
}

pub async fn execute(settings: &Settings, command: Command) -> Result<(), AppError> {
    let workflow = build_workflow(settings)?;
    debug!(locales = settings.locales.len(), "workflow ready");

    match command {
        Command::List(_) => {
            let page = workflow.refresh_list().await?;
            print_json(&page)
        }
        Command::Get(args) => {
            let entity = workflow.load(args.id).await?;
            print_json(&entity)
        }
        Command::Create(args) => create(&workflow, args).await,
        Command::Update(args) => update(&workflow, args).await,
        Command::Activate(args) => {
            let outcome = workflow.toggle_active(args.id).await?;
            print_json(&outcome)
        }
    }
}

async fn create(workflow: &BlogWorkflow, args: CreateArgs) -> Result<(), AppError> {
    let mut session = workflow.new_session();
    apply_draft_args(&mut session, args.draft).await?;
    if let Some(path) = args.image.as_deref() {
        let image = read_image(path).await?;
        session.draft_mut().attach_image(image);
    }

    let outcome = workflow.submit_create(&mut session).await?;
    print_json(&outcome)
}

async fn update(workflow: &BlogWorkflow, args: UpdateArgs) -> Result<(), AppError> {
    let mut session = workflow.open_session(args.id).await?;
    apply_draft_args(&mut session, args.draft).await?;

    let outcome = workflow.submit_update(args.id, &mut session).await?;
    print_json(&outcome)
}
