//! Fake-data seeder for local development.
//!
//! Inserts users with a shared password (`password123`) and a random batch
//! of todos per user. Seeded accounts use the `@seed.taskhive.test` email
//! domain so they can be cleared without touching real data.

use bcrypt::hash;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use sqlx::{PgPool, QueryBuilder};
use std::time::Instant;
use uuid::Uuid;

use crate::modules::todos::model::Priority;

pub const SEED_EMAIL_DOMAIN: &str = "seed.taskhive.test";
pub const SEED_PASSWORD: &str = "password123";

struct UserSeed {
    first_name: String,
    last_name: String,
    email: String,
}

struct TodoSeed {
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    completed: bool,
    pinned: bool,
    user_id: Uuid,
}

/// Seeds the database with `num_users` fake users, each owning up to
/// `max_todos_per_user` todos.
///
/// The password is hashed once with a low bcrypt cost and reused; real
/// accounts created through the API still get the default cost.
pub async fn seed_database(
    db: &PgPool,
    num_users: usize,
    max_todos_per_user: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    println!("🌱 Seeding {} users...", num_users);

    let password_hash =
        hash(SEED_PASSWORD, 4).map_err(|e| format!("Failed to hash password: {}", e))?;

    let users = generate_users(num_users);
    let user_ids = insert_users_batch(db, &users, &password_hash).await?;

    let todos = generate_todos(&user_ids, max_todos_per_user);
    let todo_count = todos.len();
    insert_todos_batch(db, &todos).await?;

    println!(
        "✅ Seeded {} users and {} todos in {:?}",
        user_ids.len(),
        todo_count,
        start.elapsed()
    );
    println!("   All seeded accounts log in with password \"{}\"", SEED_PASSWORD);

    Ok(())
}

/// Deletes all seeded users; their todos go with them via the FK cascade.
pub async fn clear_seeded_data(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

fn generate_users(count: usize) -> Vec<UserSeed> {
    let mut users = Vec::with_capacity(count);
    for i in 0..count {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let email = format!(
            "{}.{}.{}@{}",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            i,
            SEED_EMAIL_DOMAIN
        );
        users.push(UserSeed {
            first_name,
            last_name,
            email,
        });
    }
    users
}

fn generate_todos(user_ids: &[Uuid], max_per_user: usize) -> Vec<TodoSeed> {
    let mut rng = rand::thread_rng();
    let mut todos = Vec::with_capacity(user_ids.len() * max_per_user);

    for &user_id in user_ids {
        let count = rng.gen_range(0..=max_per_user);
        for _ in 0..count {
            let priority = match rng.gen_range(0..4) {
                0 => Some(Priority::Low),
                1 => Some(Priority::Medium),
                2 => Some(Priority::High),
                _ => None,
            };
            let description: Option<String> = if rng.gen_bool(0.6) {
                Some(Sentence(4..10).fake())
            } else {
                None
            };
            todos.push(TodoSeed {
                title: Sentence(2..6).fake(),
                description,
                priority,
                completed: rng.gen_bool(0.3),
                pinned: rng.gen_bool(0.15),
                user_id,
            });
        }
    }
    todos
}

async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
    password_hash: &str,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<sqlx::Postgres> =
        QueryBuilder::new("INSERT INTO users (first_name, last_name, email, password) ");
    builder.push_values(users, |mut b, user| {
        b.push_bind(&user.first_name)
            .push_bind(&user.last_name)
            .push_bind(&user.email)
            .push_bind(password_hash);
    });
    builder.push(" RETURNING id");

    let rows: Vec<(Uuid,)> = builder.build_query_as().fetch_all(db).await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

async fn insert_todos_batch(
    db: &PgPool,
    todos: &[TodoSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if todos.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
        "INSERT INTO todos (title, description, priority, completed, pinned, user_id) ",
    );
    builder.push_values(todos, |mut b, todo| {
        b.push_bind(&todo.title)
            .push_bind(&todo.description)
            .push_bind(todo.priority)
            .push_bind(todo.completed)
            .push_bind(todo.pinned)
            .push_bind(todo.user_id);
    });

    builder.build().execute(db).await?;
    Ok(())
}
