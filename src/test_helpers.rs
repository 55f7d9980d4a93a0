use crate::dataset::{ReviewRecord, SoftwareRecord};

/// Registry row with the given category, count and logo.
pub fn software(
    name: &str,
    category: &str,
    total_reviews: Option<f64>,
    logo: &str,
) -> SoftwareRecord {
    SoftwareRecord {
        software_name: name.to_string(),
        category: Some(category.to_string()),
        total_reviews,
        logo: logo.to_string(),
    }
}

pub fn review(name: &str, business: Option<&str>, job_title: Option<&str>) -> ReviewRecord {
    ReviewRecord {
        software_name: name.to_string(),
        business: business.map(str::to_string),
        job_title: job_title.map(str::to_string),
    }
}
