use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::auth::{FirebaseAuth, IdentityProvider};
use crate::backend::BackendClient;
use crate::components::Button;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::notice::Notice;
use crate::pages::{Dashboard, EditProfile, ForgotPassword, Login, Signup};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to ./nusantasty.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: Option<String>,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Send a password reset email
    ForgotPassword {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Update display name and profile photo
    EditProfile {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Show who is signed in
    Whoami,
    /// Sign out and forget the stored session
    Logout,
    /// Get recipe recommendations once and print them
    Recommend {
        /// Comma separated, e.g. "tomato, onion, garlic"
        ingredients: String,
    },
    /// Interactive dashboard
    Dashboard,
}

/// A line typed at the dashboard prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    Recommend(String),
    Save(String),
    Remove(String),
    Clear,
    Show,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl DashboardCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_lowercase().as_str(), rest) {
            ("recommend" | "r", ingredients) => DashboardCommand::Recommend(ingredients.to_string()),
            ("save" | "s", id) if !id.is_empty() => DashboardCommand::Save(id.to_string()),
            ("remove" | "rm", id) if !id.is_empty() => DashboardCommand::Remove(id.to_string()),
            ("clear", "") => DashboardCommand::Clear,
            ("show" | "ls", "") => DashboardCommand::Show,
            ("logout", "") => DashboardCommand::Logout,
            ("help" | "?", "") => DashboardCommand::Help,
            ("quit" | "exit" | "q", "") => DashboardCommand::Quit,
            _ => DashboardCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}

const DASHBOARD_HELP: &str = "\
Commands:
  recommend [ingredients]   generate recipes, e.g. `recommend tomato, onion`
  save <recipe id>          save a recipe to your collection
  remove <recipe id>        hide a recipe from this list
  clear                     clear ingredients and recipes
  show                      redraw the dashboard
  logout                    sign out
  quit                      leave the dashboard";

/// Line reader over stdin for prompting missing form values
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    async fn read(&mut self, label: &str) -> Result<Option<String>, ClientError> {
        eprint!("{}: ", label);
        Ok(self.lines.next_line().await?)
    }

    async fn value(&mut self, given: Option<String>, label: &str) -> Result<String, ClientError> {
        match given {
            Some(value) => Ok(value),
            None => Ok(self.read(label).await?.unwrap_or_default()),
        }
    }
}

fn show(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{}", notice);
    } else {
        println!("{}", notice);
    }
}

fn show_busy(button: &Button) {
    let mut busy = button.clone();
    busy.set_disabled(true);
    eprintln!("{}", busy);
}

/// Load configuration, build the collaborators and run one subcommand
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    let backend = BackendClient::new(&config)?;

    // Signing up goes through the backend only, no API key needed
    if let Command::Signup { email, password } = cli.command {
        return Ok(signup(&mut Prompt::new(), email, password, &backend).await?);
    }

    let auth = FirebaseAuth::new(&config)?;
    if let Err(e) = auth.restore().await {
        warn!("Continuing signed out: {}", e);
    }
    run_with(cli.command, &auth, &backend).await?;
    Ok(())
}

async fn signup(
    prompt: &mut Prompt,
    email: Option<String>,
    password: Option<String>,
    backend: &BackendClient,
) -> Result<(), ClientError> {
    let mut page = Signup::new();
    page.email.set_value(prompt.value(email, "Email").await?);
    page.password
        .set_value(prompt.value(password, "Password").await?);
    show_busy(page.submit_button());
    show(&page.submit(backend).await);
    Ok(())
}

/// Run a subcommand against already constructed collaborators
pub async fn run_with(
    command: Command,
    auth: &dyn IdentityProvider,
    backend: &BackendClient,
) -> Result<(), ClientError> {
    let mut prompt = Prompt::new();
    match command {
        Command::Login { email, password } => {
            let mut page = Login::new();
            page.email.set_value(prompt.value(email, "Email").await?);
            page.password
                .set_value(prompt.value(password, "Password").await?);
            show_busy(page.submit_button());
            show(&page.submit(auth).await);
        }
        Command::Signup { email, password } => signup(&mut prompt, email, password, backend).await?,
        Command::ForgotPassword { email } => {
            let mut page = ForgotPassword::new();
            page.email.set_value(prompt.value(email, "Email").await?);
            show_busy(page.submit_button());
            page.submit(auth).await;
            print!("{}", page.render());
        }
        Command::EditProfile { name, photo } => {
            let mut page = EditProfile::new();
            page.name.set_value(prompt.value(name, "Name").await?);
            if let Some(photo) = photo {
                page.select_photo(&photo).await?;
            }
            show_busy(page.submit_button());
            page.submit(auth, backend).await;
            print!("{}", page.render());
        }
        Command::Whoami => match auth.current_user().await {
            Some(user) => println!(
                "{} ({})",
                user.email.as_deref().unwrap_or("no email"),
                user.uid
            ),
            None => println!("Not signed in"),
        },
        Command::Logout => {
            let mut page = Dashboard::new();
            show(&page.logout(auth).await);
        }
        Command::Recommend { ingredients } => {
            let mut page = Dashboard::new();
            page.ingredients.set_value(ingredients);
            if let Some(notice) = page.recommend(auth, backend).await {
                show(&notice);
            }
            print!("{}", page.render());
        }
        Command::Dashboard => run_dashboard(&mut prompt, auth, backend).await?,
    }
    Ok(())
}

async fn run_dashboard(
    prompt: &mut Prompt,
    auth: &dyn IdentityProvider,
    backend: &BackendClient,
) -> Result<(), ClientError> {
    let mut page = Dashboard::new();
    print!("{}", page.render());
    println!("Type `help` for commands.");

    while let Some(line) = prompt.read(">").await? {
        let Some(command) = DashboardCommand::parse(&line) else {
            continue;
        };
        match command {
            DashboardCommand::Recommend(ingredients) => {
                page.ingredients.set_value(ingredients);
                eprintln!("Generating...");
                if let Some(notice) = page.recommend(auth, backend).await {
                    show(&notice);
                }
                print!("{}", page.render());
            }
            DashboardCommand::Save(id) => show(&page.save_recipe(&id, auth, backend).await),
            DashboardCommand::Remove(id) => {
                page.remove_recipe(&id);
                print!("{}", page.render());
            }
            DashboardCommand::Clear => {
                page.clear();
                print!("{}", page.render());
            }
            DashboardCommand::Show => print!("{}", page.render()),
            DashboardCommand::Logout => show(&page.logout(auth).await),
            DashboardCommand::Help => println!("{}", DASHBOARD_HELP),
            DashboardCommand::Quit => break,
            DashboardCommand::Unknown(line) => {
                eprintln!("Unknown command: {} (type `help`)", line)
            }
        }
    }
    info!("Leaving dashboard");
    Ok(())
}
