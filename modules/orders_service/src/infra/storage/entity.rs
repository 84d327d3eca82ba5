//! SeaORM entities for database tables
//!
//! Table and column names follow the existing schema (`"Company"`,
//! `"Order_Types"`, `"Orders"` with capitalized columns).

use sea_orm::FromQueryResult;

/// Company table
pub mod company {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "Company")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
        pub id: i64,

        #[sea_orm(column_name = "Name")]
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order::Entity")]
        Orders,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Orders.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Order type catalog table
pub mod order_type {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "Order_Types")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
        pub id: i64,

        #[sea_orm(column_name = "Name")]
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order::Entity")]
        Orders,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Orders.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Orders table
pub mod order {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "Orders")]
    pub struct Model {
        /// Caller-supplied id
        #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
        pub id: String,

        #[sea_orm(column_name = "Date")]
        pub date: Date,

        /// Foreign key to `Order_Types.Id`
        #[sea_orm(column_name = "Type")]
        pub order_type: i64,

        /// Foreign key to `Company.Id`
        #[sea_orm(column_name = "Company")]
        pub company: i64,

        #[sea_orm(column_name = "Price")]
        pub price: f64,

        #[sea_orm(column_name = "Observation", nullable)]
        pub observation: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order_type::Entity",
            from = "Column::OrderType",
            to = "super::order_type::Column::Id"
        )]
        OrderType,

        #[sea_orm(
            belongs_to = "super::company::Entity",
            from = "Column::Company",
            to = "super::company::Column::Id"
        )]
        Company,
    }

    impl Related<super::order_type::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderType.def()
        }
    }

    impl Related<super::company::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Company.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Order joined with its type and company names
#[derive(Debug, Clone, FromQueryResult)]
pub struct OrderRow {
    pub id: String,
    pub date: chrono::NaiveDate,
    pub type_name: String,
    pub company_name: String,
    pub price: f64,
    pub observation: Option<String>,
}

/// Result row of the (date, type) grouped count
#[derive(Debug, Clone, FromQueryResult)]
pub struct DailyCountRow {
    pub date: chrono::NaiveDate,
    pub order_type: i64,
    pub orders: i64,
}
