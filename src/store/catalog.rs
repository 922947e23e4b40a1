//! Observable snapshot of the public catalog plus transient view state.
//!
//! The store is an explicit value: callers create one per rendering context
//! and pass it around. Mutators replace the state wholesale and then notify
//! subscribers once; derived data is pulled through [`crate::store::selectors`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::domain::brand::{Brand, BrandListQuery};
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::product::{Product, ProductListQuery};
use crate::repository::{BrandReader, CategoryReader, ProductReader};
use crate::services::{ServiceError, ServiceResult};
use crate::store::selectors::{self, CategorySection};

/// Everything the catalog views render from.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub categories: Arc<Vec<Category>>,
    pub brands: Arc<Vec<Brand>>,
    pub products: Arc<Vec<Product>>,
    pub search_query: String,
    pub expanded_categories: HashSet<i32>,
    pub expanded_brands: HashSet<i32>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// The three lists fetched together by a catalog load.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub products: Vec<Product>,
}

/// Fetch active categories, active brands and available products as one unit.
pub fn fetch_snapshot<R>(repo: &R) -> ServiceResult<CatalogSnapshot>
where
    R: CategoryReader + BrandReader + ProductReader + ?Sized,
{
    let categories = repo
        .list_categories(CategoryListQuery::new().active_only())
        .map_err(ServiceError::from)?;
    let brands = repo
        .list_brands(BrandListQuery::new().active_only())
        .map_err(ServiceError::from)?;
    let (_, products) = repo
        .list_products(ProductListQuery::new().available_only())
        .map_err(ServiceError::from)?;

    Ok(CatalogSnapshot {
        categories,
        brands,
        products,
    })
}

/// Identifies one `begin_load`; only the latest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Handle returned by [`CatalogStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&CatalogState)>;

pub struct CatalogStore {
    state: Arc<CatalogState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    latest_ticket: u64,
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("latest_ticket", &self.latest_ticket)
            .finish()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// An empty store waiting for its first load.
    pub fn new() -> Self {
        Self {
            state: Arc::new(CatalogState {
                is_loading: true,
                ..CatalogState::default()
            }),
            listeners: Vec::new(),
            next_subscription: 0,
            latest_ticket: 0,
        }
    }

    /// Current state. The returned snapshot never changes; later mutations
    /// produce a new one.
    pub fn state(&self) -> Arc<CatalogState> {
        Arc::clone(&self.state)
    }

    /// Register `listener`; listeners run in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CatalogState) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn update<F>(&mut self, change: F)
    where
        F: FnOnce(&mut CatalogState),
    {
        let mut next = CatalogState::clone(&self.state);
        change(&mut next);
        self.state = Arc::new(next);

        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    /// Mark a load as started and hand out the ticket that must finish it.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        let ticket = LoadTicket(self.latest_ticket);
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });
        ticket
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Results of superseded loads are discarded and `false` is returned.
    /// A failure keeps the previously loaded lists and records the message.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: ServiceResult<CatalogSnapshot>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            log::debug!(
                "Discarding stale catalog load {} (latest is {})",
                ticket.0,
                self.latest_ticket
            );
            return false;
        }

        match result {
            Ok(snapshot) => {
                self.update(|state| {
                    state.expanded_categories =
                        snapshot.categories.iter().map(|category| category.id).collect();
                    state.expanded_brands = snapshot.brands.iter().map(|brand| brand.id).collect();
                    state.categories = Arc::new(snapshot.categories);
                    state.brands = Arc::new(snapshot.brands);
                    state.products = Arc::new(snapshot.products);
                    state.is_loading = false;
                    state.error = None;
                });
                true
            }
            Err(err) => {
                log::error!("Failed to load catalog: {err}");
                self.update(|state| {
                    state.is_loading = false;
                    state.error = Some(err.to_string());
                });
                false
            }
        }
    }

    /// Fetch the catalog from `repo` and apply it. Returns whether the store
    /// now holds fresh data; on failure the error is kept in the state and a
    /// retry is simply another call.
    pub fn load_catalog<R>(&mut self, repo: &R) -> bool
    where
        R: CategoryReader + BrandReader + ProductReader + ?Sized,
    {
        let ticket = self.begin_load();
        let result = fetch_snapshot(repo);
        self.finish_load(ticket, result)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.search_query = query);
    }

    pub fn clear_search(&mut self) {
        self.update(|state| state.search_query.clear());
    }

    pub fn toggle_category(&mut self, category_id: i32) {
        self.update(|state| {
            if !state.expanded_categories.remove(&category_id) {
                state.expanded_categories.insert(category_id);
            }
        });
    }

    pub fn toggle_brand(&mut self, brand_id: i32) {
        self.update(|state| {
            if !state.expanded_brands.remove(&brand_id) {
                state.expanded_brands.insert(brand_id);
            }
        });
    }

    /// Expand every loaded category and brand.
    pub fn expand_all(&mut self) {
        self.update(|state| {
            state.expanded_categories = state.categories.iter().map(|c| c.id).collect();
            state.expanded_brands = state.brands.iter().map(|b| b.id).collect();
        });
    }

    pub fn collapse_all(&mut self) {
        self.update(|state| {
            state.expanded_categories.clear();
            state.expanded_brands.clear();
        });
    }

    pub fn filtered_products(&self) -> Vec<&Product> {
        selectors::filtered_products(&self.state)
    }

    pub fn products_by_category(&self, category_id: i32) -> Vec<&Product> {
        selectors::products_by_category(&self.state, category_id)
    }

    pub fn products_by_brand(&self, brand_id: i32) -> Vec<&Product> {
        selectors::products_by_brand(&self.state, brand_id)
    }

    pub fn brands_by_category(&self, category_id: i32) -> Vec<&Brand> {
        selectors::brands_by_category(&self.state, category_id)
    }

    pub fn is_category_expanded(&self, category_id: i32) -> bool {
        selectors::is_category_expanded(&self.state, category_id)
    }

    pub fn is_brand_expanded(&self, brand_id: i32) -> bool {
        selectors::is_brand_expanded(&self.state, brand_id)
    }

    pub fn is_searching(&self) -> bool {
        selectors::is_searching(&self.state)
    }

    pub fn sections(&self) -> Vec<CategorySection<'_>> {
        selectors::catalog_sections(&self.state)
    }
}
