use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use crate::entities::usuario;

/// User data returned from repository (without the password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

impl From<usuario::Model> for User {
    fn from(model: usuario::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            is_active: model.is_active,
        }
    }
}

/// Fields to change on an existing user. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.is_active.is_none()
            && self.password_hash.is_none()
    }
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(User),
    NotFound,
    EmailTaken,
    NameTaken,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = usuario::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Get user by email together with the stored password hash
    pub async fn get_by_email_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        let user = usuario::Entity::find()
            .filter(usuario::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(|u| {
            let password_hash = u.password.clone();
            (User::from(u), password_hash)
        }))
    }

    /// Whether any user already holds this email or this name
    pub async fn exists_by_email_or_name(&self, email: &str, name: &str) -> Result<bool> {
        let found = usuario::Entity::find()
            .filter(
                Condition::any()
                    .add(usuario::Column::Email.eq(email))
                    .add(usuario::Column::Name.eq(name)),
            )
            .one(&self.conn)
            .await
            .context("Failed to check for existing user")?;

        Ok(found.is_some())
    }

    /// Single-statement insert; the unique constraints on `name` and `email`
    /// reject a concurrent duplicate that slipped past the pre-check.
    pub async fn insert(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let model = usuario::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password: Set(password_hash.to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Applies a partial update as one `UPDATE` statement. A collision the
    /// lookups miss is rejected by the unique constraints on `name` and `email`.
    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<UpdateOutcome> {
        let Some(user) = usuario::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(UpdateOutcome::NotFound);
        };

        if let Some(email) = &changes.email
            && self.taken_by_other(usuario::Column::Email, email, id).await?
        {
            return Ok(UpdateOutcome::EmailTaken);
        }

        if let Some(name) = &changes.name
            && self.taken_by_other(usuario::Column::Name, name, id).await?
        {
            return Ok(UpdateOutcome::NameTaken);
        }

        if changes.is_empty() {
            return Ok(UpdateOutcome::Updated(User::from(user)));
        }

        let mut active: usuario::ActiveModel = user.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password = Set(password_hash);
        }

        match active.update(&self.conn).await {
            Ok(model) => Ok(UpdateOutcome::Updated(User::from(model))),
            // deleted between the lookup and the update
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(UpdateOutcome::NotFound),
            Err(e) => Err(e).context("Failed to update user"),
        }
    }

    async fn taken_by_other(&self, column: usuario::Column, value: &str, id: i32) -> Result<bool> {
        let found = usuario::Entity::find()
            .filter(column.eq(value))
            .filter(usuario::Column::Id.ne(id))
            .one(&self.conn)
            .await
            .context("Failed to check user collision")?;

        Ok(found.is_some())
    }

    /// Hard delete. Returns `false` when no row had this id.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = usuario::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        usuario::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }
}
