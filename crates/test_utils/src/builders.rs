//! Test Data Builders
//!
//! Builder for premium requests, so tests only spell out the fields they
//! care about.

use rust_decimal::Decimal;

use core_kernel::AddOnCode;
use domain_rating::{AddOnSelection, PremiumRequest, SumInsuredComponent};

/// Builder for constructing premium requests
pub struct PremiumRequestBuilder {
    request: PremiumRequest,
}

impl PremiumRequestBuilder {
    /// Starts a request with zero sums insured and no adjustments
    pub fn new(product_code: impl Into<String>, occupancy_code: impl Into<String>) -> Self {
        Self {
            request: PremiumRequest::new(product_code, occupancy_code),
        }
    }

    /// Sets the building sum insured
    pub fn building(mut self, amount: Decimal) -> Self {
        self.request.building_sum_insured = amount;
        self
    }

    /// Sets the contents sum insured
    pub fn contents(mut self, amount: Decimal) -> Self {
        self.request.contents_sum_insured = amount;
        self
    }

    /// Adds a named sum-insured component
    pub fn additional(mut self, label: impl Into<String>, amount: Decimal) -> Self {
        self.request.additional_sums_insured.push(SumInsuredComponent {
            label: label.into(),
            amount,
        });
        self
    }

    /// Selects an add-on with its own sum insured
    pub fn add_on(mut self, code: &str, sum_insured: Decimal) -> Self {
        let code = AddOnCode::parse(code).expect("builder add-on code");
        self.request.add_ons.push(AddOnSelection::new(code, sum_insured));
        self
    }

    /// Selects personal accident cover for the proposer
    pub fn pa_proposer(mut self) -> Self {
        self.request.personal_accident.proposer = true;
        self
    }

    /// Selects personal accident cover for the spouse
    pub fn pa_spouse(mut self) -> Self {
        self.request.personal_accident.spouse = true;
        self
    }

    /// Sets the discount percentage
    pub fn discount(mut self, percent: Decimal) -> Self {
        self.request.discount_percent = percent;
        self
    }

    /// Sets the loading percentage
    pub fn loading(mut self, percent: Decimal) -> Self {
        self.request.loading_percent = percent;
        self
    }

    pub fn build(self) -> PremiumRequest {
        self.request
    }
}
