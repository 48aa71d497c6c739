use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Expense, ExpenseForm, ResultEngine, ValidatedExpense, categories, expenses,
};

use super::{Engine, categories::resolve_category, with_tx};

fn not_found(expense_id: i32) -> EngineError {
    EngineError::KeyNotFound(format!("expense {expense_id}"))
}

async fn apply_update<C: ConnectionTrait>(
    db: &C,
    expense_id: i32,
    valid: &ValidatedExpense,
) -> ResultEngine<(expenses::Model, categories::Model)> {
    expenses::Entity::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(expense_id))?;

    let category = resolve_category(db, &valid.category_name).await?;
    let active = expenses::ActiveModel {
        id: ActiveValue::Unchanged(expense_id),
        amount_minor: ActiveValue::Set(valid.amount.cents()),
        description: ActiveValue::Set(valid.description.clone()),
        date: ActiveValue::Set(valid.date),
        category_id: ActiveValue::Set(category.id),
        ..Default::default()
    };
    let model = match active.update(db).await {
        Ok(model) => model,
        Err(DbErr::RecordNotUpdated) => return Err(not_found(expense_id)),
        Err(err) => return Err(err.into()),
    };
    Ok((model, categories::Model::from(category)))
}

impl Engine {
    /// Return a single expense with its category name.
    pub async fn expense(&self, expense_id: i32) -> ResultEngine<Expense> {
        let row = expenses::Entity::find_by_id(expense_id)
            .find_also_related(categories::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| not_found(expense_id))?;
        Expense::try_from(row)
    }

    /// Every expense, newest first: date descending, then insertion time
    /// descending.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let rows = expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;
        rows.into_iter().map(Expense::try_from).collect()
    }

    /// Validate `form` and insert it as a new expense.
    ///
    /// Nothing is written when validation fails.
    pub async fn create_expense(&self, form: &ExpenseForm) -> ResultEngine<Expense> {
        let valid = form.validate()?;
        let category = self.get_or_create_category(&valid.category_name).await?;

        let model = with_tx!(self, |db_tx| {
            let active = expenses::ActiveModel {
                amount_minor: ActiveValue::Set(valid.amount.cents()),
                description: ActiveValue::Set(valid.description.clone()),
                date: ActiveValue::Set(valid.date),
                category_id: ActiveValue::Set(category.id),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            active.insert(&db_tx).await.map_err(EngineError::from)
        })?;

        tracing::info!(
            expense_id = model.id,
            amount = %valid.amount,
            category = %category.name,
            "expense created"
        );
        Expense::try_from((model, Some(categories::Model::from(category))))
    }

    /// Validate `form` and overwrite the expense in place.
    ///
    /// A missing id is reported before the form is looked at, so no category
    /// gets created for a request that cannot succeed. The id is checked again
    /// inside the write transaction; a new category only commits together with
    /// the update.
    pub async fn update_expense(
        &self,
        expense_id: i32,
        form: &ExpenseForm,
    ) -> ResultEngine<Expense> {
        self.require_expense(expense_id).await?;

        let valid: ValidatedExpense = form.validate()?;
        let (model, category) =
            with_tx!(self, |db_tx| apply_update(&db_tx, expense_id, &valid).await)?;

        tracing::info!(expense_id, amount = %valid.amount, "expense updated");
        Expense::try_from((model, Some(category)))
    }

    /// Remove an expense permanently.
    pub async fn delete_expense(&self, expense_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_by_id(expense_id)
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                Err(not_found(expense_id))
            } else {
                Ok(())
            }
        })?;

        tracing::info!(expense_id, "expense deleted");
        Ok(())
    }

    async fn require_expense(&self, expense_id: i32) -> ResultEngine<expenses::Model> {
        expenses::Entity::find_by_id(expense_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| not_found(expense_id))
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;
    use crate::Money;

    async fn engine() -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    #[tokio::test]
    async fn expense_deleted_before_write_creates_no_category() {
        let engine = engine().await;
        let form = ExpenseForm {
            amount: "4".to_string(),
            date: "2024-05-01".to_string(),
            category: "Food".to_string(),
            ..Default::default()
        };
        let expense = engine.create_expense(&form).await.unwrap();
        // The row disappears after the handler's existence check passed.
        engine.delete_expense(expense.id).await.unwrap();

        let valid = ValidatedExpense {
            amount: Money::new(900),
            date: expense.date,
            category_name: "Brand new".to_string(),
            description: None,
        };
        let tx = engine.database().begin().await.unwrap();
        let result = apply_update(&tx, expense.id, &valid).await;
        assert!(matches!(result, Err(EngineError::KeyNotFound(_))));
        tx.rollback().await.unwrap();

        let names: Vec<String> = engine
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["Food".to_string()]);
    }

    #[tokio::test]
    async fn update_inside_tx_switches_category() {
        let engine = engine().await;
        let form = ExpenseForm {
            amount: "4".to_string(),
            date: "2024-05-01".to_string(),
            category: "Food".to_string(),
            ..Default::default()
        };
        let expense = engine.create_expense(&form).await.unwrap();

        let updated = engine
            .update_expense(
                expense.id,
                &ExpenseForm {
                    new_category: "Brand new".to_string(),
                    ..form
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category_name, "Brand new");
        assert_eq!(engine.list_categories().await.unwrap().len(), 2);
    }
}
