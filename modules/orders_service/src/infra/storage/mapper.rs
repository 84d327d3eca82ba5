//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{self, DailyCountRow, OrderRow};
use crate::contract::{Company, NewOrder, Order, OrderType};
use crate::domain::DailyTypeCount;
use sea_orm::ActiveValue::Set;

// ===== Company Conversions =====

impl From<entity::company::Model> for Company {
    fn from(model: entity::company::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<&Company> for entity::company::ActiveModel {
    fn from(company: &Company) -> Self {
        Self {
            id: Set(company.id),
            name: Set(company.name.clone()),
        }
    }
}

// ===== Order Type Conversions =====

impl From<entity::order_type::Model> for OrderType {
    fn from(model: entity::order_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<&OrderType> for entity::order_type::ActiveModel {
    fn from(order_type: &OrderType) -> Self {
        Self {
            id: Set(order_type.id),
            name: Set(order_type.name.clone()),
        }
    }
}

// ===== Order Conversions =====

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            order_type: row.type_name,
            company: row.company_name,
            price: row.price,
            observation: row.observation,
        }
    }
}

impl From<&NewOrder> for entity::order::ActiveModel {
    fn from(order: &NewOrder) -> Self {
        Self {
            id: Set(order.id.clone()),
            date: Set(order.date),
            order_type: Set(order.order_type),
            company: Set(order.company),
            price: Set(order.price),
            observation: Set(order.observation.clone()),
        }
    }
}

impl From<DailyCountRow> for DailyTypeCount {
    fn from(row: DailyCountRow) -> Self {
        Self {
            date: row.date,
            order_type: row.order_type,
            orders: row.orders,
        }
    }
}
