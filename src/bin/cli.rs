//! Wydatki CLI
//!
//! Command-line client for the expense tracker:
//! - Log in, register, reset or change the password
//! - Manage categories
//! - Pick initial categories
//! - Show the weekly dashboard and the expense list

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wydatki::api::{ApiClient, ReqwestTransport, LOGIN_PATH};
use wydatki::categories::CategoryStore;
use wydatki::clock::TokioClock;
use wydatki::config::{self, Config};
use wydatki::dashboard::{format_amount, DashboardLoader, PanelState, SummaryView, TipsView};
use wydatki::expenses::{list_expenses, ExpenseFilter};
use wydatki::lifetime::Lifetime;
use wydatki::onboarding::SuggestionPicker;
use wydatki::page::{ActionOutcome, CategoryPage, Control, Dialog, PageView};
use wydatki::session::guard::{self, Resolution};
use wydatki::session::{AuthState, FileStore, HistoryNavigator, TokenStore};

#[derive(Parser)]
#[command(name = "wydatki")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the Wydatki expense tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and WYDATKI_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        email: String,
        #[arg(short, long)]
        password: Option<String>,
    },

    /// End the session
    Logout,

    /// Reset a forgotten password
    ResetPassword {
        #[command(subcommand)]
        action: ResetAction,
    },

    /// Change the password of the logged-in account
    ChangePassword,

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Pick initial categories from the suggestions
    Onboarding {
        /// Suggestion ids to select (1 to 5); without it only lists suggestions
        #[arg(short, long)]
        select: Vec<String>,
    },

    /// Weekly summary and AI tips
    Dashboard,

    /// List expenses
    Expenses {
        #[arg(short, long)]
        search: Option<String>,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
        #[arg(short, long, default_value = "20")]
        limit: u32,
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show client configuration and session state
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ResetAction {
    /// Send a reset link to the address
    Request { email: String },
    /// Set a new password with the token from the link
    Confirm {
        token: String,
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    List,
    Add { name: String },
    Rename { id: String, name: String },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Everything a command needs, wired once per run
struct App {
    api: Rc<ApiClient>,
    navigator: Rc<HistoryNavigator>,
    clock: Rc<TokioClock>,
    config: Config,
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    init_logging(&config);

    let transport = Rc::new(ReqwestTransport::new(config.api.timeout())?);
    let tokens = TokenStore::new(Rc::new(FileStore::new(config.session.token_path())));
    let navigator = Rc::new(HistoryNavigator::new());
    let api = Rc::new(ApiClient::new(
        config.api.url.clone(),
        transport,
        tokens,
        navigator.clone(),
    ));

    let app = App {
        api,
        navigator,
        clock: Rc::new(TokioClock::new()),
        config,
        format: cli.format,
    };

    let logging_out = matches!(cli.command, Commands::Logout);
    let result = run(&app, cli.command).await;

    if !logging_out && app.navigator.visited(LOGIN_PATH) {
        eprintln!("Sesja wygasła. Zaloguj się ponownie: wydatki login <email>");
    }
    result
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("wydatki={}", config.logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(app: &App, command: Commands) -> Result<()> {
    let auth = AuthState::new(app.api.clone());

    match command {
        Commands::Login { email, password } => {
            let password = secret(password, "Hasło")?;
            if !auth.login(&email, &password).await {
                bail!(auth_error(&auth));
            }
            println!("Zalogowano jako {}", email.trim());
        }

        Commands::Register { email, password } => {
            let password = secret(password, "Hasło")?;
            let confirm = prompt("Powtórz hasło")?;
            if !auth.register(&email, &password, &confirm).await {
                bail!(auth_error(&auth));
            }
            println!("Konto utworzone. Wybierz kategorie: wydatki onboarding");
        }

        Commands::Logout => {
            auth.logout().await;
            println!("Wylogowano.");
        }

        Commands::ResetPassword { action } => {
            let ok = match action {
                ResetAction::Request { email } => auth.request_password_reset(&email).await,
                ResetAction::Confirm { token, password } => {
                    let password = secret(password, "Nowe hasło")?;
                    let confirm = prompt("Powtórz hasło")?;
                    auth.confirm_password_reset(&token, &password, &confirm).await
                }
            };
            if !ok {
                bail!(auth_error(&auth));
            }
            println!("{}", auth.status().notice.unwrap_or_default());
        }

        Commands::ChangePassword => {
            require_login(app, "/settings/account")?;
            let current = prompt("Obecne hasło")?;
            let new_password = prompt("Nowe hasło")?;
            let confirm = prompt("Powtórz hasło")?;
            if !auth.change_password(&current, &new_password, &confirm).await {
                bail!(auth_error(&auth));
            }
            println!("{}", auth.status().notice.unwrap_or_default());
        }

        Commands::Categories { action } => {
            require_login(app, "/categories")?;
            categories(app, action).await?;
        }

        Commands::Onboarding { select } => {
            require_login(app, "/onboarding")?;
            onboarding(app, &select).await?;
        }

        Commands::Dashboard => {
            require_login(app, "/dashboard")?;
            dashboard(app).await?;
        }

        Commands::Expenses {
            search,
            from,
            to,
            min,
            max,
            limit,
            page,
        } => {
            require_login(app, "/expenses")?;
            let filter = ExpenseFilter {
                search,
                date_from: from,
                date_to: to,
                amount_min: min,
                amount_max: max,
                limit,
                offset: 0,
            }
            .page(page);
            expenses(app, &filter).await?;
        }

        Commands::Status => {
            println!("Wydatki v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API:        {}", app.api.base_url());
            println!("Timeout:    {}s", app.config.api.request_timeout_secs);
            println!("Sesja:      {}", app.config.session.token_path().display());
            println!(
                "Zalogowano: {}",
                if auth.is_authenticated() { "tak" } else { "nie" }
            );
        }

        Commands::Config { output } => {
            let content = config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

/// Apply the route guard to the screen a command stands for
fn require_login(app: &App, route: &str) -> Result<()> {
    match guard::resolve(route, app.api.tokens().is_present()) {
        Resolution::Redirect(_) => bail!("Nie jesteś zalogowany. Użyj: wydatki login <email>"),
        Resolution::Render { title, .. } => {
            tracing::debug!(route, title, "Route allowed");
            Ok(())
        }
    }
}

async fn categories(app: &App, action: CategoryAction) -> Result<()> {
    let store = Rc::new(CategoryStore::new(app.api.clone()));
    let page = CategoryPage::new(store.clone(), app.clock.clone(), Lifetime::new());
    page.load().await;

    let outcome = match (action, page.view()) {
        (_, PageView::Error) => bail!(store.error().unwrap_or_default()),
        (CategoryAction::List, view) => return print_categories(app, &store, view),
        (CategoryAction::Add { name }, _) => {
            page.open_add(Control::AddButton);
            page.set_name(&name);
            page.submit_form().await
        }
        (CategoryAction::Rename { id, name }, _) => {
            if !page.open_edit(&id) {
                bail!("Nie znaleziono kategorii {}", id);
            }
            page.set_name(&name);
            page.submit_form().await
        }
        (CategoryAction::Delete { id, yes }, _) => {
            if !page.open_delete(&id) {
                match store.find(&id) {
                    Some(_) => bail!("Nie można usunąć kategorii domyślnej"),
                    None => bail!("Nie znaleziono kategorii {}", id),
                }
            }
            if let Dialog::Confirm(confirm) = page.dialog() {
                if !yes && !ask_yes_no(&confirm.message)? {
                    page.cancel();
                    println!("Anulowano.");
                    return Ok(());
                }
            }
            page.confirm_delete().await
        }
    };

    match (outcome, page.dialog()) {
        (ActionOutcome::Done, _) => {
            println!("Zapisano.");
            Ok(())
        }
        (ActionOutcome::Invalid, Dialog::Form(form)) => {
            Err(anyhow!(form.error.unwrap_or_default()))
        }
        (ActionOutcome::Failed, Dialog::Error(error)) => Err(anyhow!(error.message)),
        (other, _) => Err(anyhow!("Nieoczekiwany wynik: {:?}", other)),
    }
}

fn print_categories(app: &App, store: &CategoryStore, view: PageView) -> Result<()> {
    if app.format == OutputFormat::Json {
        return print_json(&store.categories());
    }

    let rows = match view {
        PageView::List(rows) => rows,
        _ => {
            println!("Brak kategorii. Dodaj pierwszą: wydatki categories add <nazwa>");
            return Ok(());
        }
    };

    println!("{:<38} {:<32} {}", "ID", "Nazwa", "");
    println!("{}", "-".repeat(80));
    for row in rows {
        println!("{:<38} {:<32} {}", row.id, row.name, row.badge.unwrap_or(""));
    }
    Ok(())
}

async fn onboarding(app: &App, select: &[String]) -> Result<()> {
    let picker = SuggestionPicker::new(app.api.clone(), Lifetime::new());
    picker.fetch_suggestions().await;
    let state = picker.state();

    if let Some(message) = &state.error_message {
        bail!(message.clone());
    }

    if select.is_empty() {
        if app.format == OutputFormat::Json {
            return print_json(&state.suggestions);
        }
        println!("{:<38} {:<24} {}", "ID", "Nazwa", "Użycia");
        println!("{}", "-".repeat(72));
        for s in &state.suggestions {
            println!("{:<38} {:<24} {}", s.id, s.name, s.usage_count);
        }
        println!();
        println!("Wybierz od 1 do 5: wydatki onboarding --select <id> ...");
        return Ok(());
    }

    for id in select {
        if !state.suggestions.iter().any(|s| &s.id == id) {
            bail!("Nieznana propozycja: {}", id);
        }
        picker.toggle_selection(id);
    }
    if let Some(warning) = picker.limit_warning() {
        eprintln!("{}", warning);
    }
    println!("{}", picker.selection_label());

    match picker.finish() {
        Some(chosen) => {
            let names: Vec<&str> = chosen.iter().map(|s| s.name.as_str()).collect();
            println!("Wybrane kategorie: {}", names.join(", "));
            Ok(())
        }
        None => bail!("Wybierz od 1 do 5 kategorii"),
    }
}

async fn dashboard(app: &App) -> Result<()> {
    let loader = DashboardLoader::new(app.api.clone(), app.clock.clone(), Lifetime::new());
    loader.load_all().await;

    let summary = loader.summary.state();
    let tips = loader.tips.state();

    if app.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Output {
            summary: Option<SummaryView>,
            tips: Option<TipsView>,
        }
        return print_json(&Output {
            summary: panel_content(summary),
            tips: panel_content(tips),
        });
    }

    println!("Podsumowanie tygodnia");
    match summary {
        PanelState::Content(view) => match view.empty_message {
            Some(message) => println!("  {}", message),
            None => {
                println!("  Suma wydatków:     {} zł", view.total_amount);
                println!("  Liczba transakcji: {}", view.transaction_count);
            }
        },
        PanelState::Error(message) => println!("  {}", message),
        PanelState::Loading => {}
    }

    println!();
    println!("Porady");
    match tips {
        PanelState::Content(view) => match view.empty_message {
            Some(message) => println!("  {}", message),
            None => {
                for tip in view.tips {
                    println!("  - {}", tip);
                }
            }
        },
        PanelState::Error(message) => println!("  {}", message),
        PanelState::Loading => {}
    }

    Ok(())
}

async fn expenses(app: &App, filter: &ExpenseFilter) -> Result<()> {
    let store = CategoryStore::new(app.api.clone());
    if let Err(e) = store.fetch_all().await {
        tracing::warn!(error = %e, "Category names unavailable");
    }

    let page = list_expenses(&app.api, filter, &store.categories()).await?;

    if app.format == OutputFormat::Json {
        return print_json(&page);
    }
    if page.expenses.is_empty() {
        println!("Brak wydatków.");
        return Ok(());
    }

    println!(
        "{:<12} {:>12} {:<20} {}",
        "Data", "Kwota", "Kategoria", "Opis"
    );
    println!("{}", "-".repeat(72));
    for e in &page.expenses {
        println!(
            "{:<12} {:>12} {:<20} {}",
            e.date,
            format_amount(e.amount),
            e.category_name,
            e.description
        );
    }
    println!();
    println!(
        "Strona {}/{} ({} wydatków)",
        page.pagination.current_page, page.pagination.total_pages, page.pagination.total
    );
    Ok(())
}

fn panel_content<T>(state: PanelState<T>) -> Option<T> {
    match state {
        PanelState::Content(value) => Some(value),
        _ => None,
    }
}

fn auth_error(auth: &AuthState) -> String {
    auth.error().unwrap_or_else(|| "Nieznany błąd".to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn secret(given: Option<String>, label: &str) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn ask_yes_no(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [t/N]", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "t" | "tak" | "y" | "yes"))
}
