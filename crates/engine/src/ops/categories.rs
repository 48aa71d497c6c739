use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, SqlErr, prelude::*};

use crate::{
    Category, EngineError, ResultEngine, ValidationError,
    categories::{self, MAX_CATEGORY_NAME_LEN, UNCATEGORIZED_NAME},
};

use super::Engine;

/// Trim `input`, falling back to "Uncategorized" when nothing is left.
pub(super) fn normalize_category_name(input: &str) -> ResultEngine<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(UNCATEGORIZED_NAME.to_string());
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::InvalidCategory.into());
    }
    Ok(trimmed.to_string())
}

impl Engine {
    /// Fetch a category by exact name, creating it if it does not exist.
    ///
    /// A new category is committed right away, independently of any write the
    /// caller performs afterwards.
    pub async fn get_or_create_category(&self, name: &str) -> ResultEngine<Category> {
        resolve_category(&self.database, name).await
    }

    /// Return every category ordered by name.
    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }
}

/// Get-or-create on an arbitrary connection, so a caller can make the
/// category part of its own transaction.
pub(super) async fn resolve_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> ResultEngine<Category> {
    let name = normalize_category_name(name)?;

    if let Some(model) = find_by_name(db, &name).await? {
        return Ok(model.into());
    }

    insert_or_refetch(db, &name).await
}

async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> ResultEngine<Option<categories::Model>> {
    Ok(categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(db)
        .await?)
}

/// Insert `name`; if a concurrent writer got there first the UNIQUE index
/// rejects the row and the winner is returned instead.
async fn insert_or_refetch<C: ConnectionTrait>(db: &C, name: &str) -> ResultEngine<Category> {
    let active = categories::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    };

    match active.insert(db).await {
        Ok(model) => {
            tracing::info!(category = %model.name, id = model.id, "category created");
            Ok(model.into())
        }
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!(category = %name, "category created concurrently, re-fetching");
            find_by_name(db, name)
                .await?
                .map(Category::from)
                .ok_or_else(|| EngineError::KeyNotFound(format!("category {name}")))
        }
        Err(err) => Err(err.into()),
    }
}
