use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use uuid::Uuid;

use taskhive::cli::seeder::{clear_seeded_data, seed_database};
use taskhive::client::{ApiClient, ClientError, TokenStore};
use taskhive::modules::auth::model::{LoginRequest, RegisterRequestDto};
use taskhive::modules::todos::model::{CreateTodoDto, Priority, Todo, UpdateTodoDto};

#[derive(Parser)]
#[command(name = "taskhive-cli")]
#[command(about = "Taskhive CLI - Terminal client for the Taskhive API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account and store the returned token
    Register {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Log in and store the returned token
    Login {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Discard the stored token
    Logout,
    /// Show the currently authenticated user
    Me,
    /// List todos
    List {
        /// Page number
        #[arg(long, default_value = "1")]
        page: i64,

        /// Items per page
        #[arg(long, default_value = "10")]
        limit: i64,

        /// Only todos with this completion status
        #[arg(long)]
        completed: Option<bool>,

        /// Only todos with this priority (low, medium, high)
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Only pinned todos
        #[arg(long)]
        pinned: bool,
    },
    /// Add a todo owned by the current user
    Add {
        /// Todo title
        title: String,

        /// Longer description
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// Priority (low, medium, high)
        #[arg(short = 'P', long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },
    /// Edit a todo's title, description, or priority
    Edit {
        /// Todo ID
        id: Uuid,

        /// New title
        #[arg(short = 't', long)]
        title: Option<String>,

        /// New description
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// New priority (low, medium, high)
        #[arg(short = 'P', long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },
    /// Mark a todo completed
    Done { id: Uuid },
    /// Mark a todo not completed
    Undone { id: Uuid },
    /// Pin a todo
    Pin { id: Uuid },
    /// Unpin a todo
    Unpin { id: Uuid },
    /// Delete a todo
    Rm { id: Uuid },
    /// List all users
    Users,
    /// Create an admin account directly in the database
    CreateAdmin {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users and todos
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Maximum todos per user
        #[arg(short = 't', long, default_value = "8")]
        todos: usize,
    },
    /// Remove all seeded data
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let store = TokenStore::from_env();

    let result = match cli.command {
        Commands::Register {
            email,
            first_name,
            last_name,
            password,
        } => register(&store, email, first_name, last_name, password).await,
        Commands::Login { email, password } => login(&store, email, password).await,
        Commands::Logout => logout(&store),
        Commands::Me => me(&store).await,
        Commands::List {
            page,
            limit,
            completed,
            priority,
            pinned,
        } => list(&store, page, limit, completed, priority, pinned).await,
        Commands::Add {
            title,
            description,
            priority,
        } => add(&store, title, description, priority).await,
        Commands::Edit {
            id,
            title,
            description,
            priority,
        } => edit(&store, id, title, description, priority).await,
        Commands::Done { id } => toggle(&store, id, Toggle::Complete).await,
        Commands::Undone { id } => toggle(&store, id, Toggle::Uncomplete).await,
        Commands::Pin { id } => toggle(&store, id, Toggle::Pin).await,
        Commands::Unpin { id } => toggle(&store, id, Toggle::Unpin).await,
        Commands::Rm { id } => remove(&store, id).await,
        Commands::Users => users(&store).await,
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => create_admin(first_name, last_name, email, password).await,
        Commands::Seed { users, todos } => seed(users, todos).await,
        Commands::ClearSeed => clear_seed().await,
    };

    if let Err(e) = result {
        if matches!(e, CliError::Client(ClientError::Unauthorized(_))) {
            let _ = store.clear();
            eprintln!("❌ Not authenticated. Run `taskhive-cli login` and try again.");
        } else {
            eprintln!("❌ {}", e);
        }
        std::process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{0}")]
    Other(String),
}

impl From<Box<dyn std::error::Error>> for CliError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        CliError::Other(e.to_string())
    }
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    match s.to_ascii_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        other => Err(format!(
            "invalid priority '{}', expected low, medium, or high",
            other
        )),
    }
}

fn client(store: &TokenStore) -> ApiClient {
    let mut client = ApiClient::from_env();
    client.set_token(store.load());
    client
}

fn prompt(label: &str, value: Option<String>) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(label)
            .interact_text()
            .map_err(|e| CliError::Other(format!("Failed to read input: {}", e))),
    }
}

fn prompt_password(value: Option<String>) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| CliError::Other(format!("Failed to read password: {}", e))),
    }
}

async fn register(
    store: &TokenStore,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let dto = RegisterRequestDto {
        email: prompt("Email", email)?,
        first_name: prompt("First name", first_name)?,
        last_name: prompt("Last name", last_name)?,
        password: prompt_password(password)?,
    };

    let response = ApiClient::from_env().register(&dto).await?;
    store.save(&response.token)?;
    println!(
        "✅ Registered and logged in as {} {} <{}>",
        response.user.first_name, response.user.last_name, response.user.email
    );
    Ok(())
}

async fn login(
    store: &TokenStore,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let dto = LoginRequest {
        email: prompt("Email", email)?,
        password: prompt_password(password)?,
    };

    let response = ApiClient::from_env().login(&dto).await?;
    store.save(&response.token)?;
    println!("✅ Logged in as {}", response.user.email);
    Ok(())
}

fn logout(store: &TokenStore) -> Result<(), CliError> {
    store.clear()?;
    println!("✅ Logged out");
    Ok(())
}

async fn me(store: &TokenStore) -> Result<(), CliError> {
    let user = client(store).me().await?;
    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
    println!("   id: {}", user.id);
    if let Some(bio) = &user.bio {
        println!("   bio: {}", bio);
    }
    Ok(())
}

async fn list(
    store: &TokenStore,
    page: i64,
    limit: i64,
    completed: Option<bool>,
    priority: Option<Priority>,
    pinned: bool,
) -> Result<(), CliError> {
    let api = client(store);

    if pinned {
        let todos = api.pinned_todos().await?;
        print_todos(&todos);
        return Ok(());
    }
    if let Some(priority) = priority {
        let todos = api.todos_by_priority(priority).await?;
        print_todos(&todos);
        return Ok(());
    }
    if let Some(completed) = completed {
        let todos = api.todos_by_completion(completed).await?;
        print_todos(&todos);
        return Ok(());
    }

    let response = api.list_todos(page, limit).await?;
    print_todos(&response.data);
    println!(
        "Page {}/{} ({} total)",
        response.meta.page, response.meta.total_pages, response.meta.total
    );
    Ok(())
}

async fn add(
    store: &TokenStore,
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
) -> Result<(), CliError> {
    let api = client(store);
    let user = api.me().await?;

    let todo = api
        .create_todo(&CreateTodoDto {
            title,
            description,
            priority,
            completed: None,
            pinned: None,
            user_id: user.id,
        })
        .await?;
    println!("✅ Added todo {}", todo.id);
    Ok(())
}

async fn edit(
    store: &TokenStore,
    id: Uuid,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
) -> Result<(), CliError> {
    if title.is_none() && description.is_none() && priority.is_none() {
        return Err(CliError::Other(
            "Nothing to change: pass --title, --description, or --priority".to_string(),
        ));
    }

    let todo = client(store)
        .update_todo(
            id,
            &UpdateTodoDto {
                title,
                description,
                priority,
                completed: None,
                pinned: None,
                user_id: None,
            },
        )
        .await?;
    println!("✅ Updated todo {}", todo.id);
    Ok(())
}

enum Toggle {
    Complete,
    Uncomplete,
    Pin,
    Unpin,
}

async fn toggle(store: &TokenStore, id: Uuid, action: Toggle) -> Result<(), CliError> {
    let api = client(store);
    let todo = match action {
        Toggle::Complete => api.complete_todo(id).await?,
        Toggle::Uncomplete => api.uncomplete_todo(id).await?,
        Toggle::Pin => api.pin_todo(id).await?,
        Toggle::Unpin => api.unpin_todo(id).await?,
    };
    print_todos(std::slice::from_ref(&todo));
    Ok(())
}

async fn remove(store: &TokenStore, id: Uuid) -> Result<(), CliError> {
    client(store).delete_todo(id).await?;
    println!("✅ Deleted todo {}", id);
    Ok(())
}

async fn users(store: &TokenStore) -> Result<(), CliError> {
    let users = client(store).list_users().await?;
    for user in users {
        println!("{}  {} {} <{}>", user.id, user.first_name, user.last_name, user.email);
    }
    Ok(())
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos.");
        return;
    }
    for todo in todos {
        let check = if todo.completed { "x" } else { " " };
        let pin = if todo.pinned { "📌 " } else { "" };
        let priority = todo
            .priority
            .map(|p| format!(" [{:?}]", p))
            .unwrap_or_default();
        println!("[{}] {}{}{}  ({})", check, pin, todo.title, priority, todo.id);
    }
}

async fn create_admin(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let first_name = prompt("First name", first_name)?;
    let last_name = prompt("Last name", last_name)?;
    let email = prompt("Email", email)?;
    let password = prompt_password(password)?;

    let db = connect().await?;
    taskhive::cli::create_admin(&db, &first_name, &last_name, &email, &password).await?;
    println!("✅ Admin account created for {}", email);
    Ok(())
}

async fn seed(users: usize, todos: usize) -> Result<(), CliError> {
    let db = connect().await?;
    seed_database(&db, users, todos).await?;
    Ok(())
}

async fn clear_seed() -> Result<(), CliError> {
    let db = connect().await?;
    let removed = clear_seeded_data(&db).await?;
    println!("✅ Removed {} seeded users", removed);
    Ok(())
}

async fn connect() -> Result<sqlx::PgPool, CliError> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| CliError::Other("DATABASE_URL must be set".to_string()))?;

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .map_err(|e| CliError::Other(format!("Failed to connect to database: {}", e)))
}
