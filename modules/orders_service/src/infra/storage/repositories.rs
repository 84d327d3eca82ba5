//! SeaORM repository implementations
//!
//! Reads go straight to the pool. Every mutation runs in its own transaction
//! together with its read-after-write fetch; the transaction is committed on
//! success and rolled back (explicitly, or on drop when `?` bails out) on every
//! other path.

use crate::contract::{Company, NewOrder, Order, OrderCountsQuery, OrderRangeQuery, OrderType};
use crate::domain::repository::{CompanyRepository, OrderRepository, OrderTypeRepository};
use crate::domain::DailyTypeCount;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, sea_query::OnConflict, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    TransactionTrait,
};
use std::sync::Arc;

use super::entity::{company, order, order_type, DailyCountRow, OrderRow};

// ===== Company Repository =====

pub struct SeaOrmCompanyRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn list_all(&self) -> Result<Vec<Company>> {
        let results = company::Entity::find()
            .order_by_asc(company::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>> {
        let result = company::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn insert(&self, company: &Company) -> Result<Option<Company>> {
        let txn = self.db.begin().await?;

        let active: company::ActiveModel = company.into();
        let inserted = company::Entity::insert(active)
            .on_conflict(OnConflict::column(company::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&txn)
            .await?;

        if inserted == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let stored = company::Entity::find_by_id(company.id).one(&txn).await?;
        txn.commit().await?;
        Ok(stored.map(Into::into))
    }

    async fn update(&self, company: &Company) -> Result<Option<Company>> {
        let txn = self.db.begin().await?;

        let result = company::Entity::update_many()
            .col_expr(company::Column::Name, Expr::value(company.name.clone()))
            .filter(company::Column::Id.eq(company.id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let stored = company::Entity::find_by_id(company.id).one(&txn).await?;
        txn.commit().await?;
        Ok(stored.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = company::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Order Type Repository =====

pub struct SeaOrmOrderTypeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderTypeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderTypeRepository for SeaOrmOrderTypeRepository {
    async fn list_all(&self) -> Result<Vec<OrderType>> {
        let results = order_type::Entity::find()
            .order_by_asc(order_type::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OrderType>> {
        let result = order_type::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn insert(&self, order_type: &OrderType) -> Result<Option<OrderType>> {
        let txn = self.db.begin().await?;

        let active: order_type::ActiveModel = order_type.into();
        let inserted = order_type::Entity::insert(active)
            .on_conflict(OnConflict::column(order_type::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&txn)
            .await?;

        if inserted == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let stored = order_type::Entity::find_by_id(order_type.id).one(&txn).await?;
        txn.commit().await?;
        Ok(stored.map(Into::into))
    }

    async fn update(&self, order_type: &OrderType) -> Result<Option<OrderType>> {
        let txn = self.db.begin().await?;

        let result = order_type::Entity::update_many()
            .col_expr(order_type::Column::Name, Expr::value(order_type.name.clone()))
            .filter(order_type::Column::Id.eq(order_type.id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let stored = order_type::Entity::find_by_id(order_type.id).one(&txn).await?;
        txn.commit().await?;
        Ok(stored.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = order_type::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Order Repository =====

pub struct SeaOrmOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Orders joined with type and company names, aliased to [`OrderRow`] fields
fn joined_orders() -> Select<order::Entity> {
    order::Entity::find()
        .select_only()
        .column_as(order::Column::Id, "id")
        .column_as(order::Column::Date, "date")
        .column_as(order_type::Column::Name, "type_name")
        .column_as(company::Column::Name, "company_name")
        .column_as(order::Column::Price, "price")
        .column_as(order::Column::Observation, "observation")
        .join(JoinType::InnerJoin, order::Relation::OrderType.def())
        .join(JoinType::InnerJoin, order::Relation::Company.def())
}

async fn find_joined<C: ConnectionTrait>(conn: &C, id: &str) -> Result<Option<Order>, DbErr> {
    let row = joined_orders()
        .filter(order::Column::Id.eq(id))
        .into_model::<OrderRow>()
        .one(conn)
        .await?;
    Ok(row.map(Into::into))
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn list_all(&self) -> Result<Vec<Order>> {
        let rows = joined_orders()
            .order_by_asc(order::Column::Date)
            .order_by_asc(order::Column::Id)
            .into_model::<OrderRow>()
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        Ok(find_joined(&*self.db, id).await?)
    }

    async fn insert(&self, order: &NewOrder) -> Result<Option<Order>> {
        let txn = self.db.begin().await?;

        let active: order::ActiveModel = order.into();
        let inserted = order::Entity::insert(active)
            .on_conflict(OnConflict::column(order::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&txn)
            .await?;

        if inserted == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let stored = find_joined(&txn, &order.id).await?;
        txn.commit().await?;
        Ok(stored)
    }

    async fn update(&self, order: &NewOrder) -> Result<Option<Order>> {
        let txn = self.db.begin().await?;

        let result = order::Entity::update_many()
            .col_expr(order::Column::Date, Expr::value(order.date))
            .col_expr(order::Column::OrderType, Expr::value(order.order_type))
            .col_expr(order::Column::Company, Expr::value(order.company))
            .col_expr(order::Column::Price, Expr::value(order.price))
            .col_expr(order::Column::Observation, Expr::value(order.observation.clone()))
            .filter(order::Column::Id.eq(order.id.as_str()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let stored = find_joined(&txn, &order.id).await?;
        txn.commit().await?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = order::Entity::delete_by_id(id.to_string()).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_company_and_range(&self, query: &OrderRangeQuery) -> Result<Vec<Order>> {
        let rows = joined_orders()
            .filter(order::Column::Company.eq(query.company))
            .filter(order::Column::Date.between(query.start_date, query.end_date))
            .order_by_asc(order::Column::Date)
            .order_by_asc(order::Column::Id)
            .into_model::<OrderRow>()
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_day_and_type(&self, query: &OrderCountsQuery) -> Result<Vec<DailyTypeCount>> {
        let mut select = order::Entity::find()
            .select_only()
            .column_as(order::Column::Date, "date")
            .column_as(order::Column::OrderType, "order_type")
            .column_as(Expr::col((order::Entity, order::Column::Id)).count(), "orders")
            .filter(order::Column::Date.between(query.start_date, query.end_date));

        if let Some(company) = query.company {
            select = select.filter(order::Column::Company.eq(company));
        }

        let rows = select
            .group_by(order::Column::Date)
            .group_by(order::Column::OrderType)
            .order_by_asc(order::Column::Date)
            .into_model::<DailyCountRow>()
            .all(&*self.db)
            .await?;

        tracing::debug!(groups = rows.len(), "counted orders by day and type");
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
