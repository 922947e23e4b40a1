//! Public catalog: builds the storefront view from a freshly loaded
//! [`CatalogStore`] and the navigation state carried in the URL.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::price::{
    FormattedPrice, Price, UNKNOWN_PRICE_DISPLAY, format_currency, formatted_prices,
    get_fraction_options, get_price_display, get_weight_options,
};
use crate::domain::product::Product;
use crate::repository::{BrandReader, CategoryReader, ProductReader};
use crate::store::catalog::CatalogStore;

/// Query parameters accepted by the public catalog page.
///
/// Expansion state travels in the URL: `collapsed` starts from a fully
/// collapsed tree, then every id listed in `toggle_category`/`toggle_brand`
/// is flipped.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Search text typed by the shopper.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub toggle_category: Vec<i32>,
    #[serde(default)]
    pub toggle_brand: Vec<i32>,
}

/// A purchasable option rendered under a price, e.g. "250 g" or "½ horma".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceOptionView {
    pub label: String,
    pub amount: i64,
    pub amount_display: String,
}

/// One price entry of a product card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceView {
    /// Wire name of the pricing scheme, absent for unknown documents.
    pub kind: Option<&'static str>,
    pub type_label: &'static str,
    pub display: String,
    pub options: Vec<PriceOptionView>,
}

impl PriceView {
    pub fn from_price(price: &Price) -> Self {
        let options = match price {
            Price::Weight(weight) => get_weight_options(weight)
                .into_iter()
                .map(|option| PriceOptionView {
                    amount_display: format_currency(option.amount),
                    label: option.label,
                    amount: option.amount,
                })
                .collect(),
            Price::Fraction(fraction) => get_fraction_options(fraction)
                .into_iter()
                .map(|option| PriceOptionView {
                    amount_display: format_currency(option.amount),
                    label: option.label,
                    amount: option.amount,
                })
                .collect(),
            Price::Unit(_) | Price::Unknown => Vec::new(),
        };

        Self {
            kind: price.type_name(),
            type_label: price.type_label(),
            display: get_price_display(price),
            options,
        }
    }
}

/// Product as rendered on the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub brand_name: Option<String>,
    pub category_name: Option<String>,
    /// Summary line of the primary price.
    pub price_display: String,
    pub prices: Vec<PriceView>,
}

impl ProductCard {
    fn new(
        product: &Product,
        brands: &HashMap<i32, &Brand>,
        categories: &HashMap<i32, &Category>,
    ) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            tags: product.tags.clone(),
            brand_name: brands.get(&product.brand_id).map(|brand| brand.name.clone()),
            category_name: categories
                .get(&product.category_id)
                .map(|category| category.name.clone()),
            price_display: product
                .primary_price()
                .map(get_price_display)
                .unwrap_or_else(|| UNKNOWN_PRICE_DISPLAY.to_string()),
            prices: product.prices.iter().map(PriceView::from_price).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrandSectionView {
    pub id: i32,
    pub name: String,
    pub logo_url: Option<String>,
    pub expanded: bool,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Serialize)]
pub struct CategorySectionView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon_name: Option<String>,
    pub expanded: bool,
    pub product_count: usize,
    pub brands: Vec<BrandSectionView>,
}

/// Data required to render the public catalog template.
#[derive(Debug, Serialize)]
pub struct CatalogPageData {
    pub search: String,
    pub is_searching: bool,
    /// Grouped tree, empty while searching.
    pub sections: Vec<CategorySectionView>,
    /// Flat search hits, empty when not searching.
    pub results: Vec<ProductCard>,
    pub collapsed: bool,
    pub expanded_categories: Vec<i32>,
    pub expanded_brands: Vec<i32>,
    /// Message of a failed load; the page offers a retry link.
    pub error: Option<String>,
}

/// Load the catalog and project it for the storefront.
///
/// A failed load is reported through [`CatalogPageData::error`] rather than
/// as an error so the page always renders.
pub fn load_catalog_page<R>(repo: &R, query: CatalogQuery) -> CatalogPageData
where
    R: CategoryReader + BrandReader + ProductReader + ?Sized,
{
    let mut store = CatalogStore::new();
    store.load_catalog(repo);

    if query.collapsed {
        store.collapse_all();
    }
    for category_id in &query.toggle_category {
        store.toggle_category(*category_id);
    }
    for brand_id in &query.toggle_brand {
        store.toggle_brand(*brand_id);
    }
    if let Some(search) = query.q.as_deref() {
        store.set_search_query(search);
    }

    build_page(&store, query.collapsed)
}

fn build_page(store: &CatalogStore, collapsed: bool) -> CatalogPageData {
    let state = store.state();
    let brands: HashMap<i32, &Brand> = state.brands.iter().map(|brand| (brand.id, brand)).collect();
    let categories: HashMap<i32, &Category> = state
        .categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let is_searching = store.is_searching();

    let results = if is_searching {
        store
            .filtered_products()
            .into_iter()
            .map(|product| ProductCard::new(product, &brands, &categories))
            .collect()
    } else {
        Vec::new()
    };

    let sections = if is_searching {
        Vec::new()
    } else {
        store
            .sections()
            .into_iter()
            .map(|section| CategorySectionView {
                id: section.category.id,
                name: section.category.name.clone(),
                slug: section.category.slug.clone(),
                icon_name: section.category.icon_name.clone(),
                expanded: section.expanded,
                product_count: section.product_count,
                brands: section
                    .brands
                    .into_iter()
                    .map(|brand_section| BrandSectionView {
                        id: brand_section.brand.id,
                        name: brand_section.brand.name.clone(),
                        logo_url: brand_section.brand.logo_url.clone(),
                        expanded: brand_section.expanded,
                        products: brand_section
                            .products
                            .into_iter()
                            .map(|product| ProductCard::new(product, &brands, &categories))
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    };

    let mut expanded_categories: Vec<i32> = state.expanded_categories.iter().copied().collect();
    expanded_categories.sort_unstable();
    let mut expanded_brands: Vec<i32> = state.expanded_brands.iter().copied().collect();
    expanded_brands.sort_unstable();

    CatalogPageData {
        search: state.search_query.clone(),
        is_searching,
        sections,
        results,
        collapsed,
        expanded_categories,
        expanded_brands,
        error: state.error.clone(),
    }
}

/// Product entry of the public JSON snapshot.
#[derive(Debug, Serialize)]
pub struct CatalogProductJson {
    #[serde(flatten)]
    pub product: Product,
    pub price_display: String,
    pub price_breakdown: Vec<FormattedPrice>,
}

/// Body of `GET /api/v1/catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogJson {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub products: Vec<CatalogProductJson>,
}

/// Public JSON snapshot of active categories/brands and available products.
pub fn load_catalog_json<R>(repo: &R) -> crate::services::ServiceResult<CatalogJson>
where
    R: CategoryReader + BrandReader + ProductReader + ?Sized,
{
    let snapshot = crate::store::catalog::fetch_snapshot(repo)?;

    let products = snapshot
        .products
        .into_iter()
        .map(|product| {
            let primary = product.primary_price();
            CatalogProductJson {
                price_display: primary
                    .map(get_price_display)
                    .unwrap_or_else(|| UNKNOWN_PRICE_DISPLAY.to_string()),
                price_breakdown: primary.map(formatted_prices).unwrap_or_default(),
                product,
            }
        })
        .collect();

    Ok(CatalogJson {
        categories: snapshot.categories,
        brands: snapshot.brands,
        products,
    })
}
