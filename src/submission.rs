//! Estimate drafts and the estimate-creation request sent to the backend
//!
//! A draft is what staff fill in: customer details, the job attributes and
//! the commercial terms. [`prepare_request`] validates it, prices it and
//! packages both into a [`CreateEstimateRequest`]; [`submit_estimate`] then
//! hands that to an [`EstimateApi`]. Nothing here retries or persists.

use crate::client::{EstimateApi, EstimateReceipt};
use crate::error::AppError;
use crate::pricing::{
    self, ChargeLineItem, CostBreakdown, Frequency, JobEstimateInput, PricingBreakdown,
    PropertyType, ServiceType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateDraft {
    pub customer: CustomerDetails,
    pub job: JobEstimateInput,
    #[serde(default)]
    pub is_rush_job: bool,
    #[serde(default)]
    pub discount_reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub proposed_start_date: Option<NaiveDate>,
}

impl EstimateDraft {
    /// Load a draft from a `.json` file, or TOML for any other extension
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Checks that gate submission
    pub fn validate(&self) -> Result<(), AppError> {
        if self.customer.name.trim().is_empty() {
            return Err(AppError::InvalidInput("customer name is required".to_string()));
        }

        if let Some(email) = &self.customer.email {
            if !email.contains('@') {
                return Err(AppError::InvalidInput(format!(
                    "customer email '{}' is not a valid address",
                    email
                )));
            }
        }

        self.job.validate()
    }
}

/// Body of the backend's estimate-creation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstimateRequest {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub service_type: ServiceType,
    pub square_footage: u32,
    pub property_type: PropertyType,
    pub frequency: Frequency,
    pub pets: Vec<String>,
    pub is_realtor: bool,
    pub is_rush_job: bool,
    pub discount_percentage: f64,
    pub discount_reason: Option<String>,
    pub notes: Option<String>,
    pub proposed_start_date: Option<NaiveDate>,
    pub quoted_price: f64,
    pub final_price: f64,
    pub discount_amount: f64,
    pub commission_amount: f64,
    /// Hours
    pub estimated_time: f64,
    pub cost_breakdown: CostBreakdown,
    pub charge_items: Vec<ChargeLineItem>,
}

impl CreateEstimateRequest {
    /// Package a draft and its computed breakdown
    pub fn build(draft: &EstimateDraft, breakdown: &PricingBreakdown) -> Self {
        let job = &draft.job;
        let quoted_price = breakdown.sales_rep_price;
        let final_price = breakdown.cost_breakdown.price;

        Self {
            customer_name: draft.customer.name.trim().to_string(),
            customer_email: draft.customer.email.clone(),
            customer_phone: draft.customer.phone.clone(),
            customer_address: draft.customer.address.clone(),
            service_type: job.service_type,
            square_footage: job.square_footage,
            property_type: job.property_type,
            frequency: job.frequency,
            pets: job.pets.labels(),
            is_realtor: job.is_realtor,
            is_rush_job: draft.is_rush_job,
            discount_percentage: job.discount_percentage,
            discount_reason: draft.discount_reason.clone(),
            notes: draft.notes.clone(),
            proposed_start_date: draft.proposed_start_date,
            quoted_price,
            final_price,
            discount_amount: quoted_price - final_price,
            commission_amount: breakdown.sales_rep_commission,
            estimated_time: breakdown.total_time,
            cost_breakdown: breakdown.cost_breakdown.clone(),
            charge_items: breakdown.charge_items.clone(),
        }
    }
}

/// Validate and price a draft, returning the request that would be sent
pub fn prepare_request(draft: &EstimateDraft) -> Result<CreateEstimateRequest, AppError> {
    draft.validate()?;
    let breakdown = pricing::estimate(&draft.job);
    Ok(CreateEstimateRequest::build(draft, &breakdown))
}

/// Validate, price and submit a draft
///
/// Failures are logged and returned as-is; the caller decides whether to
/// resubmit.
pub async fn submit_estimate(
    api: &dyn EstimateApi,
    draft: &EstimateDraft,
) -> Result<EstimateReceipt, AppError> {
    let request = prepare_request(draft)?;

    info!(
        customer = %request.customer_name,
        service_type = %request.service_type,
        final_price = request.final_price,
        "Submitting estimate"
    );

    match api.create_estimate(&request).await {
        Ok(receipt) => {
            let reference = receipt.reference().unwrap_or_else(|| "<none>".to_string());
            info!(reference = %reference, "Estimate created");
            Ok(receipt)
        }
        Err(e) => {
            error!(
                error = %e,
                kind = e.kind(),
                transient = e.is_transient(),
                "Failed to create estimate"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::EstimateId;
    use crate::pricing::Pets;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Mutex;

    fn sample_draft() -> EstimateDraft {
        EstimateDraft {
            customer: CustomerDetails {
                name: " Dana Whitfield ".to_string(),
                email: Some("dana@example.com".to_string()),
                phone: Some("555-0142".to_string()),
                address: Some("12 Alder Way".to_string()),
            },
            job: JobEstimateInput {
                square_footage: 1447,
                property_type: PropertyType::House,
                frequency: Frequency::BiWeekly,
                service_type: ServiceType::RegularCleaning,
                pets: Pets { dogs: 2, cats: 1 },
                discount_percentage: 10.0,
                ..Default::default()
            },
            is_rush_job: true,
            discount_reason: Some("First-time customer".to_string()),
            notes: None,
            proposed_start_date: NaiveDate::from_ymd_opt(2026, 11, 2),
        }
    }

    /// Records requests and answers with a fixed result
    struct FakeApi {
        seen: Mutex<Vec<CreateEstimateRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl EstimateApi for FakeApi {
        async fn create_estimate(
            &self,
            request: &CreateEstimateRequest,
        ) -> Result<EstimateReceipt, AppError> {
            self.seen.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(AppError::Upstream {
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    message: "maintenance".to_string(),
                });
            }
            Ok(EstimateReceipt {
                id: Some(EstimateId::Number(7)),
                estimate_number: Some("EST-0007".to_string()),
            })
        }
    }

    #[test]
    fn test_build_request_fields() {
        let draft = sample_draft();
        let breakdown = pricing::estimate(&draft.job);
        let request = CreateEstimateRequest::build(&draft, &breakdown);

        assert_eq!(request.customer_name, "Dana Whitfield");
        assert_eq!(request.pets, vec!["2 dogs", "1 cat"]);
        assert_eq!(request.quoted_price, breakdown.sales_rep_price);
        assert_eq!(request.final_price, breakdown.cost_breakdown.price);
        assert!(request.discount_amount > 0.0);
        assert_eq!(request.commission_amount, breakdown.sales_rep_commission);
        assert_eq!(request.estimated_time, breakdown.total_time);
        assert_eq!(request.charge_items.len(), breakdown.charge_items.len());
    }

    #[test]
    fn test_request_json_shape() {
        let request = prepare_request(&sample_draft()).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        for key in [
            "customerName",
            "customerEmail",
            "customerPhone",
            "customerAddress",
            "serviceType",
            "squareFootage",
            "propertyType",
            "frequency",
            "pets",
            "isRealtor",
            "isRushJob",
            "discountPercentage",
            "discountReason",
            "notes",
            "proposedStartDate",
            "quotedPrice",
            "finalPrice",
            "discountAmount",
            "commissionAmount",
            "estimatedTime",
            "costBreakdown",
            "chargeItems",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["frequency"], "bi_weekly");
        assert_eq!(value["proposedStartDate"], "2026-11-02");
    }

    #[test]
    fn test_validate_requires_customer_name() {
        let mut draft = sample_draft();
        draft.customer.name = "   ".to_string();
        let err = prepare_request(&draft).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut draft = sample_draft();
        draft.customer.email = Some("dana.example.com".to_string());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_checks_job() {
        let mut draft = sample_draft();
        draft.job.discount_percentage = 75.0;
        assert!(draft.validate().unwrap_err().to_string().contains("discount"));
    }

    #[test]
    fn test_draft_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
isRushJob = false
proposedStartDate = "2026-12-01"

[customer]
name = "Lee Park"
email = "lee@example.com"

[job]
squareFootage = 980
propertyType = "apartment"
frequency = "weekly"
serviceType = "deep_clean_blue"
pets = {{ dogs = 1, cats = 1 }}
"#
        )
        .unwrap();

        let draft = EstimateDraft::from_path(file.path()).unwrap();
        assert_eq!(draft.customer.name, "Lee Park");
        assert_eq!(draft.job.square_footage, 980);
        assert_eq!(draft.job.frequency, Frequency::Weekly);
        assert_eq!(draft.job.pets.total(), 2);
        assert_eq!(draft.proposed_start_date, NaiveDate::from_ymd_opt(2026, 12, 1));
    }

    #[test]
    fn test_demo_draft_is_submittable() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/estimate_draft.toml");
        let draft = EstimateDraft::from_path(&path).unwrap();
        let request = prepare_request(&draft).unwrap();
        assert_eq!(request.pets, vec!["2 dogs", "1 cat"]);
        assert!(request.final_price < request.quoted_price);
    }

    #[test]
    fn test_draft_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = serde_json::to_string(&sample_draft()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let draft = EstimateDraft::from_path(file.path()).unwrap();
        assert_eq!(draft, sample_draft());
    }

    #[tokio::test]
    async fn test_submit_estimate_success() {
        let api = FakeApi {
            seen: Mutex::new(Vec::new()),
            fail: false,
        };
        let receipt = submit_estimate(&api, &sample_draft()).await.unwrap();
        assert_eq!(receipt.reference().as_deref(), Some("EST-0007"));
        assert_eq!(api.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_estimate_does_not_retry() {
        let api = FakeApi {
            seen: Mutex::new(Vec::new()),
            fail: true,
        };
        let err = submit_estimate(&api, &sample_draft()).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(api.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_draft_never_reaches_api() {
        let api = FakeApi {
            seen: Mutex::new(Vec::new()),
            fail: false,
        };
        let mut draft = sample_draft();
        draft.job.square_footage = 0;

        let result = tokio_test::block_on(submit_estimate(&api, &draft));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(api.seen.lock().unwrap().is_empty());
    }
}
