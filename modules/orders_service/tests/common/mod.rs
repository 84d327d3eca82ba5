//! Common test utilities: in-memory repositories and fixtures

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use orders_service::contract::*;
use orders_service::domain::repository::{CompanyRepository, OrderRepository, OrderTypeRepository};
use orders_service::domain::{DailyTypeCount, Service};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Shared in-memory tables behind the three mock repositories.
///
/// Mirrors the relational store closely enough for service tests: ids are
/// unique, orders reference existing catalog rows, and catalog rows in use
/// cannot be deleted. `fail` turns every call into a store error.
#[derive(Default)]
pub struct MockDb {
    companies: RwLock<BTreeMap<i64, Company>>,
    order_types: RwLock<BTreeMap<i64, OrderType>>,
    orders: RwLock<HashMap<String, NewOrder>>,
    failing: AtomicBool,
}

impl MockDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().len()
    }

    pub fn print_state(&self, context: &str) {
        println!("\n========== MockDb State: {} ==========", context);
        println!("  Companies: {:?}", self.companies.read().values().collect::<Vec<_>>());
        println!("  Order types: {:?}", self.order_types.read().values().collect::<Vec<_>>());
        println!("  Orders: {}", self.orders.read().len());
        println!("==========================================\n");
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }

    fn resolve(&self, order: &NewOrder) -> Option<Order> {
        let order_type = self.order_types.read().get(&order.order_type)?.name.clone();
        let company = self.companies.read().get(&order.company)?.name.clone();
        Some(Order {
            id: order.id.clone(),
            date: order.date,
            order_type,
            company,
            price: order.price,
            observation: order.observation.clone(),
        })
    }

    fn check_references(&self, order: &NewOrder) -> Result<()> {
        if !self.order_types.read().contains_key(&order.order_type) {
            bail!("foreign key violation: Type {}", order.order_type);
        }
        if !self.companies.read().contains_key(&order.company) {
            bail!("foreign key violation: Company {}", order.company);
        }
        Ok(())
    }

    fn sorted_orders(&self, keep: impl Fn(&NewOrder) -> bool) -> Vec<Order> {
        let mut rows: Vec<NewOrder> = self.orders.read().values().filter(|o| keep(o)).cloned().collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        rows.iter().filter_map(|o| self.resolve(o)).collect()
    }
}

/// Repository handle over a shared [`MockDb`]
#[derive(Clone)]
pub struct MockRepo(pub Arc<MockDb>);

#[async_trait]
impl CompanyRepository for MockRepo {
    async fn list_all(&self) -> Result<Vec<Company>> {
        self.0.check()?;
        Ok(self.0.companies.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>> {
        self.0.check()?;
        Ok(self.0.companies.read().get(&id).cloned())
    }

    async fn insert(&self, company: &Company) -> Result<Option<Company>> {
        self.0.check()?;
        let mut rows = self.0.companies.write();
        if rows.contains_key(&company.id) {
            return Ok(None);
        }
        rows.insert(company.id, company.clone());
        Ok(Some(company.clone()))
    }

    async fn update(&self, company: &Company) -> Result<Option<Company>> {
        self.0.check()?;
        let mut rows = self.0.companies.write();
        Ok(rows.get_mut(&company.id).map(|slot| {
            *slot = company.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.0.check()?;
        if self.0.orders.read().values().any(|o| o.company == id) {
            bail!("foreign key violation: company {id} is referenced by orders");
        }
        Ok(self.0.companies.write().remove(&id).is_some())
    }
}

#[async_trait]
impl OrderTypeRepository for MockRepo {
    async fn list_all(&self) -> Result<Vec<OrderType>> {
        self.0.check()?;
        Ok(self.0.order_types.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OrderType>> {
        self.0.check()?;
        Ok(self.0.order_types.read().get(&id).cloned())
    }

    async fn insert(&self, order_type: &OrderType) -> Result<Option<OrderType>> {
        self.0.check()?;
        let mut rows = self.0.order_types.write();
        if rows.contains_key(&order_type.id) {
            return Ok(None);
        }
        rows.insert(order_type.id, order_type.clone());
        Ok(Some(order_type.clone()))
    }

    async fn update(&self, order_type: &OrderType) -> Result<Option<OrderType>> {
        self.0.check()?;
        let mut rows = self.0.order_types.write();
        Ok(rows.get_mut(&order_type.id).map(|slot| {
            *slot = order_type.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.0.check()?;
        if self.0.orders.read().values().any(|o| o.order_type == id) {
            bail!("foreign key violation: order type {id} is referenced by orders");
        }
        Ok(self.0.order_types.write().remove(&id).is_some())
    }
}

#[async_trait]
impl OrderRepository for MockRepo {
    async fn list_all(&self) -> Result<Vec<Order>> {
        self.0.check()?;
        Ok(self.0.sorted_orders(|_| true))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        self.0.check()?;
        let row = self.0.orders.read().get(id).cloned();
        Ok(row.and_then(|o| self.0.resolve(&o)))
    }

    async fn insert(&self, order: &NewOrder) -> Result<Option<Order>> {
        self.0.check()?;
        self.0.check_references(order)?;
        {
            let mut rows = self.0.orders.write();
            if rows.contains_key(&order.id) {
                return Ok(None);
            }
            rows.insert(order.id.clone(), order.clone());
        }
        Ok(self.0.resolve(order))
    }

    async fn update(&self, order: &NewOrder) -> Result<Option<Order>> {
        self.0.check()?;
        self.0.check_references(order)?;
        {
            let mut rows = self.0.orders.write();
            match rows.get_mut(&order.id) {
                Some(slot) => *slot = order.clone(),
                None => return Ok(None),
            }
        }
        Ok(self.0.resolve(order))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.0.check()?;
        Ok(self.0.orders.write().remove(id).is_some())
    }

    async fn find_by_company_and_range(&self, query: &OrderRangeQuery) -> Result<Vec<Order>> {
        self.0.check()?;
        Ok(self.0.sorted_orders(|o| {
            o.company == query.company && o.date >= query.start_date && o.date <= query.end_date
        }))
    }

    async fn count_by_day_and_type(&self, query: &OrderCountsQuery) -> Result<Vec<DailyTypeCount>> {
        self.0.check()?;
        let mut groups: BTreeMap<(NaiveDate, i64), i64> = BTreeMap::new();
        for order in self.0.orders.read().values() {
            let in_range = order.date >= query.start_date && order.date <= query.end_date;
            let company_matches = query.company.map_or(true, |c| c == order.company);
            if in_range && company_matches {
                *groups.entry((order.date, order.order_type)).or_default() += 1;
            }
        }
        Ok(groups
            .into_iter()
            .map(|((date, order_type), orders)| DailyTypeCount {
                date,
                order_type,
                orders,
            })
            .collect())
    }
}

/// Service over a fresh in-memory database
pub fn create_test_service() -> (Service, Arc<MockDb>) {
    let db = MockDb::new();
    let repo = Arc::new(MockRepo(db.clone()));
    let service = Service::new(repo.clone(), repo.clone(), repo);
    (service, db)
}

/// Company 1 "Acme", company 2 "Globex", type 1 "Repair", type 2 "Install"
pub async fn seed_catalogs(service: &Service) {
    for (id, name) in [(1, "Acme"), (2, "Globex")] {
        service
            .create_company(&CompanyInput::new(id, name))
            .await
            .expect("seed company");
    }
    for (id, name) in [(1, "Repair"), (2, "Install")] {
        service
            .create_order_type(&OrderTypeInput::new(id, name))
            .await
            .expect("seed order type");
    }
}

pub fn order_input(id: &str, day: NaiveDate, order_type: i64, company: i64, price: f64) -> OrderInput {
    OrderInput {
        id: id.to_string(),
        date: day.into(),
        order_type: order_type.into(),
        company: company.into(),
        price: price.into(),
        observation: None,
    }
}
