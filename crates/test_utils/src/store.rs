//! In-memory Rate Store
//!
//! A [`RateStore`] backed by hash maps, assembled with builder methods.
//! Rows keep insertion order, which is the lookup order the resolver sees.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{AddOnCode, DomainPort, Money, OccupancyCode, PerMille, PortError, ProductCode};
use domain_rating::{
    AddOnRateRow, OccupancyRule, OccupancyType, RateKind, RateStore, ResolvedRate, TerrorismSlab,
};

fn product(code: &str) -> ProductCode {
    ProductCode::parse(code).expect("fixture product code")
}

fn occupancy(code: &str) -> OccupancyCode {
    OccupancyCode::parse(code).expect("fixture occupancy code")
}

fn add_on(code: &str) -> AddOnCode {
    AddOnCode::parse(code).expect("fixture add-on code")
}

/// Rate tables held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateStore {
    basic_rates: HashMap<(ProductCode, OccupancyCode), Decimal>,
    occupancy_types: HashMap<OccupancyCode, OccupancyType>,
    occupancy_descriptions: HashMap<OccupancyCode, String>,
    terrorism_slabs: HashMap<ProductCode, Vec<TerrorismSlab>>,
    add_on_rates: HashMap<(ProductCode, AddOnCode), Vec<AddOnRateRow>>,
    offline: bool,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryRateStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a basic rate for (product, occupancy)
    pub fn with_basic_rate(
        mut self,
        product_code: &str,
        occupancy_code: &str,
        rate: Decimal,
    ) -> Self {
        self.basic_rates
            .insert((product(product_code), occupancy(occupancy_code)), rate);
        self
    }

    /// Registers an occupancy code with its type
    pub fn with_occupancy(mut self, occupancy_code: &str, occupancy_type: OccupancyType) -> Self {
        self.occupancy_types.insert(occupancy(occupancy_code), occupancy_type);
        self
    }

    /// Sets the free-text description of an occupancy code
    pub fn with_occupancy_description(mut self, occupancy_code: &str, description: &str) -> Self {
        self.occupancy_descriptions
            .insert(occupancy(occupancy_code), description.to_string());
        self
    }

    /// Adds a terrorism slab `[si_min, si_max)` for a product
    pub fn with_terrorism_slab(
        mut self,
        product_code: &str,
        occupancy_type: OccupancyType,
        si_min: Decimal,
        si_max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        self.terrorism_slabs
            .entry(product(product_code))
            .or_default()
            .push(TerrorismSlab {
                occupancy_type,
                si_min: Money::new(si_min),
                si_max: si_max.map(Money::new),
                rate: PerMille::new(rate),
            });
        self
    }

    /// Appends an add-on rate row; `rule` uses the stored rule syntax
    pub fn with_add_on_rate(
        mut self,
        product_code: &str,
        add_on_code: &str,
        rule: &str,
        value: Decimal,
        kind: RateKind,
    ) -> Self {
        let rule = OccupancyRule::parse(Some(rule)).expect("fixture occupancy rule");
        self.add_on_rates
            .entry((product(product_code), add_on(add_on_code)))
            .or_default()
            .push(AddOnRateRow {
                rule,
                rate: ResolvedRate::new(value, kind),
            });
        self
    }

    /// Makes every lookup fail with a connection error
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Number of lookups served so far, shared between clones
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn record_lookup(&self) -> Result<(), PortError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(PortError::connection("in-memory rate store is offline"));
        }
        Ok(())
    }
}

impl DomainPort for InMemoryRateStore {}

#[async_trait]
impl RateStore for InMemoryRateStore {
    async fn basic_rate(
        &self,
        product: &ProductCode,
        occupancy: &OccupancyCode,
    ) -> Result<Option<Decimal>, PortError> {
        self.record_lookup()?;
        Ok(self
            .basic_rates
            .get(&(product.clone(), occupancy.clone()))
            .copied())
    }

    async fn occupancy_type(
        &self,
        occupancy: &OccupancyCode,
    ) -> Result<Option<OccupancyType>, PortError> {
        self.record_lookup()?;
        Ok(self.occupancy_types.get(occupancy).copied())
    }

    async fn occupancy_description(
        &self,
        occupancy: &OccupancyCode,
    ) -> Result<Option<String>, PortError> {
        self.record_lookup()?;
        Ok(self.occupancy_descriptions.get(occupancy).cloned())
    }

    async fn terrorism_slabs(
        &self,
        product: &ProductCode,
        occupancy_type: OccupancyType,
    ) -> Result<Vec<TerrorismSlab>, PortError> {
        self.record_lookup()?;
        Ok(self
            .terrorism_slabs
            .get(product)
            .map(|slabs| {
                slabs
                    .iter()
                    .filter(|slab| slab.occupancy_type == occupancy_type)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn add_on_rates(
        &self,
        product: &ProductCode,
        add_on: &AddOnCode,
    ) -> Result<Vec<AddOnRateRow>, PortError> {
        self.record_lookup()?;
        Ok(self
            .add_on_rates
            .get(&(product.clone(), add_on.clone()))
            .cloned()
            .unwrap_or_default())
    }
}
