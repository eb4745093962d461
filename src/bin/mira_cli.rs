//!
//! mira CLI binary
//! ---------------
//! Terminal client for the MIRA recruitment backend. Signs in through the same
//! captcha flow as the web front end, keeps the signed-in user in a local session
//! document, and applies the page role guards before admin-only calls.

use std::env;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mira::api::matching::MatchingOptions;
use mira::api::UploadFile;
use mira::cli::render::print_value;
use mira::cli::{default_navbar, pending_toast, spawn_toast_printer, CliNavigator, Command, HELP};
use mira::guard::NavBar;
use mira::{AccessGuard, ApiClient, ClientConfig, Notifier, Role, SessionStore, ToastKind};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--base-url <url>] [--session-dir <dir>]              # interactive\n  {program} [--base-url <url>] [--session-dir <dir>] -c \"<command>\"   # one-shot\n\nFlags:\n  --base-url <url>      API base including the /api prefix (env MIRA_API_BASE_URL, default http://localhost:5001/api)\n  --session-dir <dir>   Where the signed-in user is kept (env MIRA_SESSION_DIR, default .mira)\n  -c, --command <cmd>   Run one command and exit\n  -h, --help            Show this help\n\n{HELP}"
    );
}

struct App {
    api: ApiClient,
    session: SessionStore,
    notifier: Notifier,
    navigator: CliNavigator,
    navbar: NavBar,
}

impl App {
    fn guard(&self) -> AccessGuard<'_> { AccessGuard::new(&self.session, &self.navigator, &self.notifier) }

    fn admin_only(&self) -> bool { self.guard().require_role([Role::Admin]).is_authorized() }

    /// Returns false when the loop should stop.
    async fn run(&self, cmd: Command) -> Result<bool> {
        match cmd {
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
            Command::Captcha => {
                let c = self.api.auth().get_captcha().await?;
                println!("captcha: {}", c.captcha);
            }
            Command::Login { email, password, role, captcha } => {
                match self.api.auth().sign_in(&self.session, &email, &password, role, &captcha).await {
                    Ok(user) => self.notifier.show(format!("Welcome, {}", user.full_name), ToastKind::Success),
                    Err(e) => self.notifier.show(e.message(), ToastKind::Error),
                };
            }
            Command::Signup { role, email, password, captcha, full_name } => {
                match self.api.auth().signup(&full_name, &email, &password, role, &captcha).await {
                    Ok(r) => self.notifier.show(format!("{} ({})", r.message, r.user_id), ToastKind::Success),
                    Err(e) => self.notifier.show(e.message(), ToastKind::Error),
                };
            }
            Command::Logout => {
                if let Err(e) = self.api.auth().sign_out(&self.session).await {
                    self.notifier.show(e.message(), ToastKind::Error);
                }
                self.guard().require_auth(&self.navbar);
            }
            Command::WhoAmI => {
                let me = self.api.auth().get_current_user().await?;
                println!("{} <{}> [{}]", me.user.full_name, me.user.email, me.user.role);
            }
            Command::Nav => {
                let outcome = self.guard().require_auth(&self.navbar);
                if let Some(nav) = outcome.nav() {
                    for item in self.navbar.items() {
                        if nav.is_visible(&item.id) { println!("  {:<16} {}", item.label, item.href); }
                    }
                }
            }
            Command::Adverts { status } => {
                if self.admin_only() { print_value(&self.api.advertisements().get_all(status.as_deref()).await?); }
            }
            Command::Items { status } => {
                if self.admin_only() { print_value(&self.api.items().get_all(status.as_deref()).await?); }
            }
            Command::Experts { category } => {
                if self.admin_only() { print_value(&self.api.experts().get_all(category.as_deref()).await?); }
            }
            Command::Score { item, expert, use_llm } => {
                if self.guard().require_role([Role::Admin, Role::Expert]).is_authorized() {
                    print_value(&self.api.matching().get_score_breakdown(&item, &expert, use_llm).await?);
                }
            }
            Command::GeneratePanel { item, size } => {
                if self.admin_only() {
                    let mut opts = MatchingOptions::default();
                    if let Some(n) = size { opts = opts.with_panel_size(n); }
                    print_value(&self.api.matching().generate_panel(&item, &opts).await?);
                }
            }
            Command::Upload { path } => {
                if self.admin_only() {
                    let file = UploadFile::from_path(&path).await?;
                    print_value(&self.api.pdf().upload(file).await?);
                }
            }
            Command::Preview { path } => {
                if self.admin_only() {
                    let file = UploadFile::from_path(&path).await?;
                    print_value(&self.api.pdf().preview(file).await?);
                }
            }
            Command::Seed => {
                if self.admin_only() {
                    self.api.seed_database().await?;
                    self.notifier.show("Database seeded", ToastKind::Success);
                }
            }
            Command::Users => {
                if self.admin_only() { print_value(&self.api.admin().list_users().await?); }
            }
        }
        Ok(true)
    }

    async fn run_line(&self, line: &str) -> bool {
        let cmd = match Command::parse(line) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                return true;
            }
        };
        match self.run(cmd).await {
            Ok(go_on) => go_on,
            Err(e) => {
                eprintln!("error: {:#}", e);
                true
            }
        }
    }
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mira_cli").to_string();
    let mut base_url: Option<String> = None;
    let mut session_dir: Option<String> = None;
    let mut one_shot: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            "--base-url" => { i += 1; base_url = args.get(i).cloned(); }
            "--session-dir" => { i += 1; session_dir = args.get(i).cloned(); }
            "-c" | "--command" => { i += 1; one_shot = args.get(i).cloned(); }
            other => {
                eprintln!("unknown argument: {}", other);
                print_usage(&program);
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = base_url {
        config = ClientConfig { base_url: ClientConfig::new(url)?.base_url, ..config };
    }
    if let Some(dir) = session_dir {
        config = config.with_session_dir(dir);
    }
    info!(target: "mira", base_url = %config.base_url, session_dir = %config.session_dir.display(), "mira_cli starting");

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let _enter = rt.enter();

    let app = App {
        api: ApiClient::new(&config)?,
        session: SessionStore::open_dir(&config.session_dir)
            .with_context(|| format!("cannot open session dir {}", config.session_dir.display()))?,
        notifier: Notifier::new(),
        navigator: CliNavigator::new(&config),
        navbar: default_navbar()?,
    };
    if let Some(line) = one_shot {
        rt.block_on(app.run_line(&line));
        // No printer task in one-shot mode: the runtime is dropped right after.
        if let Some(toast) = pending_toast(&app.notifier) {
            eprintln!("{}", toast);
        }
        return Ok(());
    }

    let printer = spawn_toast_printer(&app.notifier);
    let mut editor = DefaultEditor::new()?;
    println!("mira interpreter. Type 'help' for commands.");
    if let Some(u) = app.session.get_user() {
        println!("signed in as {} [{}]", u.email, u.role);
    }
    loop {
        match editor.readline("mira> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() { continue; }
                let _ = editor.add_history_entry(line);
                if !rt.block_on(app.run_line(line)) { break; }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    printer.abort();
    Ok(())
}
