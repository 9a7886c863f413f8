//! User Repository

use super::RepoResult;
use chrono::Utc;
use shared::models::{User, UserCreate, UserRole};
use sqlx::{Executor, Sqlite};

const SELECT_USER: &str =
    "SELECT id, emp_id, name, email, phone, team, shift, role, created_at FROM users";

/// Lookup by employee id (case-sensitive)
pub async fn find_by_emp_id<'e, E>(executor: E, emp_id: &str) -> RepoResult<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE emp_id = ?"))
        .bind(emp_id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

/// Insert a new user with role `user`
///
/// Fails with [`super::RepoError::Duplicate`] when the emp_id is taken.
pub async fn create<'e, E>(executor: E, data: &UserCreate) -> RepoResult<User>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, emp_id, name, email, phone, team, shift, role, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING id, emp_id, name, email, phone, team, shift, role, created_at",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(data.emp_id.trim())
    .bind(data.name.trim())
    .bind(data.email.trim())
    .bind(data.phone.trim())
    .bind(&data.team)
    .bind(&data.shift)
    .bind(UserRole::User)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::RepoError;

    fn user_create(emp_id: &str) -> UserCreate {
        UserCreate {
            emp_id: emp_id.into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9000000000".into(),
            team: Some("Platform".into()),
            shift: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = DbService::in_memory().await.unwrap();
        let user = create(&db.pool, &user_create("EMP001")).await.unwrap();

        assert_eq!(user.role, UserRole::User);
        assert_eq!(find_by_emp_id(&db.pool, "EMP001").await.unwrap(), Some(user));
        // emp_id is case-sensitive
        assert!(find_by_emp_id(&db.pool, "emp001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_emp_id() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, &user_create("EMP001")).await.unwrap();

        let err = create(&db.pool, &user_create("EMP001")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
