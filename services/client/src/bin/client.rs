//! services/client/src/bin/client.rs
//!
//! A small console shell over the client library: wires the transport,
//! adapters and session store together the way a UI host would, then runs a
//! single command against the backend.

use client_lib::{
    adapters::{
        HttpAuthAdapter, HttpDocumentAdapter, HttpPromptHistoryAdapter, HttpQueryAdapter,
        HttpUserAdminAdapter,
    },
    config::Config,
    error::ClientError,
    menu::MenuModel,
    store::SessionStore,
    transport::Transport,
    upload::UploadWorkflow,
};
use docquery_core::domain::{
    DocumentMetadata, LoginRequest, PromptFilters, SelectedFile,
};
use docquery_core::ports::{
    AuthService, DocumentService, Navigator, PromptHistoryService, QueryService,
    SessionInvalidation, UserAdminService,
};
use docquery_core::upload::UploadPhase;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The console has no router; it reports where the app would navigate.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn to_login(&self, return_url: Option<&str>) {
        match return_url {
            Some(url) => println!("-> would navigate to login (returnUrl: {})", url),
            None => println!("-> would navigate to login"),
        }
    }

    fn to_unauthorized(&self) {
        println!("-> would navigate to the unauthorized view");
    }
}

fn usage() {
    eprintln!("Usage: client <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status              show the current session and menu");
    eprintln!("  query <question>    ask the index a question");
    eprintln!("  transcripts         list ingested documents");
    eprintln!("  users               list accounts (admin)");
    eprintln!("  history             show recent prompt history (admin)");
    eprintln!("  upload <paths...>   upload files with default metadata");
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        usage();
        return Ok(());
    };

    // --- 2. Build the Transport and Service Adapters ---
    let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);
    let transport = Arc::new(Transport::new(
        config.api_base_url.clone(),
        config.http_timeout,
        navigator.clone(),
    )?);

    let auth: Arc<dyn AuthService> = Arc::new(HttpAuthAdapter::new(transport.clone()));
    let documents: Arc<dyn DocumentService> =
        Arc::new(HttpDocumentAdapter::new(transport.clone()));
    let query: Arc<dyn QueryService> = Arc::new(HttpQueryAdapter::new(transport.clone()));
    let users: Arc<dyn UserAdminService> = Arc::new(HttpUserAdminAdapter::new(transport.clone()));
    let history: Arc<dyn PromptHistoryService> =
        Arc::new(HttpPromptHistoryAdapter::new(transport.clone()));

    // --- 3. Build the Session Store and Close the Wiring Loop ---
    let store = Arc::new(SessionStore::new(auth));
    let invalidation: Arc<dyn SessionInvalidation> = store.clone();
    transport.attach_session(invalidation);

    // --- 4. Bootstrap, Then Log In if Credentials Were Provided ---
    store.bootstrap().await;
    if !store.current_session().is_authenticated {
        if let (Some(email), Some(password)) = (&config.email, &config.password) {
            info!("no existing session; logging in as {}", email);
            let request = LoginRequest {
                email: email.clone(),
                password: password.clone(),
            };
            if let Err(error) = store.login(&request).await {
                eprintln!("Login failed: {}", error);
                return Err(error.into());
            }
        }
    }

    // --- 5. Run the Requested Command ---
    match command {
        "status" => {
            let session = store.current_session();
            if let Some(user) = &session.user {
                println!("Logged in as {} ({})", user.display_name(), user.access_level);
            } else {
                println!("Not logged in");
            }
            let menu = MenuModel::for_session(&session);
            println!("  documents:      {}", menu.show_documents);
            println!("  upload:         {}", menu.show_upload);
            println!("  query:          {}", menu.show_query);
            println!("  manage users:   {}", menu.show_manage_users);
            println!("  prompt history: {}", menu.show_prompt_history);
        }
        "query" => {
            let question = args[1..].join(" ");
            if question.is_empty() {
                usage();
                return Ok(());
            }
            let answer = query.submit_query(&question).await?;
            println!("{}", answer.answer);
            if let Some(sources) = answer.sources {
                for source in sources {
                    println!("  source: {}", source);
                }
            }
        }
        "transcripts" => {
            let transcripts = documents.list_transcripts().await?;
            for t in &transcripts {
                println!(
                    "#{:<5} {:<40} trainer: {:<20} active: {}",
                    t.id,
                    t.title.as_deref().unwrap_or("(untitled)"),
                    t.trainer_name,
                    t.active
                );
            }
            println!("{} transcript(s)", transcripts.len());
        }
        "users" => {
            let page = users.list_users().await?;
            for user in &page.users {
                println!(
                    "#{:<5} {:<30} level: {:<12} query: {}",
                    user.id,
                    user.display_name(),
                    user.access_level,
                    user.query_permission
                );
            }
            println!("{} account(s)", page.total);
        }
        "history" => {
            let page = history.fetch_history(&PromptFilters::default()).await?;
            for record in &page.queries {
                println!(
                    "[{}] {} <{}>: {}",
                    record.created_at, record.user_name, record.user_email, record.query
                );
            }
            println!(
                "{} quer(ies) over the last {} day(s)",
                page.total, page.filters.days
            );
        }
        "upload" => {
            let paths = &args[1..];
            if paths.is_empty() {
                usage();
                return Ok(());
            }

            let mut files = Vec::with_capacity(paths.len());
            for path in paths {
                let content = tokio::fs::read(path).await?;
                let name = std::path::Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.clone());
                files.push(SelectedFile {
                    name,
                    content: content.into(),
                });
            }

            let mut workflow = UploadWorkflow::new(documents);
            workflow.select_files(files);

            let mut uploaded = 0usize;
            let mut skipped = 0usize;
            while !workflow.is_complete() {
                let Some(file) = workflow.current_file() else {
                    break;
                };
                let metadata = DocumentMetadata {
                    title: Some(file.name.clone()),
                    ..DocumentMetadata::default()
                };
                match workflow.submit_metadata(metadata).await {
                    Ok(UploadPhase::ErrorRecovery) => {
                        // A real shell would re-show the form pre-filled;
                        // the console reports the failure and moves on.
                        let message = workflow.upload_error().unwrap_or("unknown error");
                        warn!("upload failed: {}", message);
                        skipped += 1;
                        if workflow.skip_current().is_err() {
                            break;
                        }
                    }
                    Ok(_) => uploaded += 1,
                    Err(state_error) => {
                        eprintln!("upload stopped: {}", state_error);
                        break;
                    }
                }
            }
            println!("{} uploaded, {} failed", uploaded, skipped);
        }
        _ => usage(),
    }

    Ok(())
}
