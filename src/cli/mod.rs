pub mod seeder;

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Creates an admin account directly in the database. Admins are never
/// created through the API.
pub async fn create_admin(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password = hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (first_name, last_name, email, password, is_admin)
         VALUES ($1, $2, $3, $4, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
