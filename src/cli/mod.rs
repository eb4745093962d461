//! Interactive front end helpers: command parsing, redirect handling and toast output.

pub mod render;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::guard::{Destination, NavBar, NavError, NavItem, Navigator};
use crate::identity::{Role, UnknownRole};
use crate::notify::{Notifier, ToastPhase};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error(transparent)]
    Role(#[from] UnknownRole),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Captcha,
    Login { email: String, password: String, role: Role, captcha: String },
    Signup { role: Role, email: String, password: String, captcha: String, full_name: String },
    Logout,
    WhoAmI,
    Nav,
    Adverts { status: Option<String> },
    Items { status: Option<String> },
    Experts { category: Option<String> },
    Score { item: String, expert: String, use_llm: bool },
    GeneratePanel { item: String, size: Option<u32> },
    Upload { path: String },
    Preview { path: String },
    Seed,
    Users,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((head, args)) = parts.split_first() else {
            return Err(CommandError::Usage("<command> [args...]"));
        };
        let opt = |i: usize| args.get(i).map(|s| s.to_string());
        let cmd = match head.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "captcha" => Command::Captcha,
            "login" => match args {
                [email, password, role, captcha] => Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                    role: role.parse()?,
                    captcha: captcha.to_string(),
                },
                _ => return Err(CommandError::Usage("login <email> <password> <role> <captcha>")),
            },
            "signup" => match args {
                [role, email, password, captcha, name @ ..] if !name.is_empty() => Command::Signup {
                    role: role.parse()?,
                    email: email.to_string(),
                    password: password.to_string(),
                    captcha: captcha.to_string(),
                    full_name: name.join(" "),
                },
                _ => return Err(CommandError::Usage("signup <role> <email> <password> <captcha> <full name>")),
            },
            "logout" => Command::Logout,
            "whoami" | "me" => Command::WhoAmI,
            "nav" => Command::Nav,
            "adverts" | "advertisements" => Command::Adverts { status: opt(0) },
            "items" => Command::Items { status: opt(0) },
            "experts" => Command::Experts { category: opt(0) },
            "score" => match args {
                [item, expert] => Command::Score { item: item.to_string(), expert: expert.to_string(), use_llm: true },
                [item, expert, flag] if *flag == "--no-llm" => {
                    Command::Score { item: item.to_string(), expert: expert.to_string(), use_llm: false }
                }
                _ => return Err(CommandError::Usage("score <itemId> <expertId> [--no-llm]")),
            },
            "generate-panel" => match args {
                [item] => Command::GeneratePanel { item: item.to_string(), size: None },
                [item, size] => match size.parse::<u32>() {
                    Ok(n) => Command::GeneratePanel { item: item.to_string(), size: Some(n) },
                    Err(_) => return Err(CommandError::Usage("generate-panel <itemId> [3|5|7]")),
                },
                _ => return Err(CommandError::Usage("generate-panel <itemId> [3|5|7]")),
            },
            "upload" => Command::Upload { path: opt(0).ok_or(CommandError::Usage("upload <file>"))? },
            "preview" => Command::Preview { path: opt(0).ok_or(CommandError::Usage("preview <file>"))? },
            "seed" => Command::Seed,
            "users" => Command::Users,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }
}

pub const HELP: &str = "\
Commands:
  captcha                                          fetch a new captcha challenge
  login <email> <password> <role> <captcha>        sign in and persist the session
  signup <role> <email> <password> <captcha> <name...>
  logout                                           sign out (local session always cleared)
  whoami                                           ask the backend who is signed in
  nav                                              show navigation entries for the current role
  adverts [status]                                 list advertisements (admin)
  items [status]                                   list items (admin)
  experts [category]                               list experts (admin)
  score <itemId> <expertId> [--no-llm]             score breakdown for one expert
  generate-panel <itemId> [3|5|7]                  ask the matcher for a panel (admin)
  upload <file> | preview <file>                   send an advertisement PDF (admin)
  seed                                             reset demo data (admin)
  users                                            list user accounts (admin)
  help | quit";

/// Navigation entries of the web front end with their role metadata.
pub fn default_navbar() -> Result<NavBar, NavError> {
    Ok(NavBar::new(vec![
        NavItem::new("home", "Home", "home.html"),
        NavItem::new("advertisements", "Advertisements", "advertisements.html").with_roles("admin")?,
        NavItem::new("items", "Items", "items.html").with_roles("admin")?,
        NavItem::new("experts", "Experts", "experts.html").with_roles("admin")?,
        NavItem::new("panels", "Panels", "panels.html").with_roles("admin,expert")?,
        NavItem::new("invitations", "My Invitations", "invitations.html").with_roles("expert")?,
        NavItem::new("profile", "Profile", "profile.html"),
    ]))
}

/// Terminal stand-in for page navigation: remembers and announces the target page.
pub struct CliNavigator {
    login_page: String,
    home_page: String,
    last: Mutex<Option<Destination>>,
}

impl CliNavigator {
    pub fn new(config: &ClientConfig) -> Self {
        Self { login_page: config.login_page.clone(), home_page: config.home_page.clone(), last: Mutex::new(None) }
    }

    pub fn page(&self, to: Destination) -> &str {
        match to {
            Destination::Login => &self.login_page,
            Destination::Home => &self.home_page,
        }
    }

    pub fn take_last(&self) -> Option<Destination> { self.last.lock().take() }
}

impl Navigator for CliNavigator {
    fn redirect(&self, to: Destination) {
        println!("-> {}", self.page(to));
        *self.last.lock() = Some(to);
    }
}

/// The toast currently on screen, formatted for the terminal.
pub fn pending_toast(notifier: &Notifier) -> Option<String> {
    notifier.current().map(|t| render::format_toast(&t))
}

/// Print each toast once when it appears.
pub fn spawn_toast_printer(notifier: &Notifier) -> JoinHandle<()> {
    let mut rx = notifier.subscribe();
    tokio::spawn(async move {
        let mut last_id = 0u64;
        while rx.changed().await.is_ok() {
            let toast = rx.borrow_and_update().clone();
            if let Some(t) = toast {
                if t.id != last_id && t.phase == ToastPhase::Entering {
                    last_id = t.id;
                    eprintln!("{}", render::format_toast(&t));
                }
            }
        }
    })
}
