#![allow(dead_code)]

use std::path::{Path, PathBuf};

use competitor_report::config::Config;

pub const REGISTRY_CSV: &str = "\
software.name,Sub.cat1,total.reviews,logo
Acme CRM,CRM,150,acme.png
Zed CRM,CRM,,
Acme CRM,CRM,999,other.png
Ledgerly,Accounting,7.0,ledgerly.png
";

pub const REVIEWS_CSV: &str = "\
software.name,business,job_title
Acme CRM,Small-Business,Engineer
Acme CRM,Small-Business,Manager
Acme CRM,Mid-Market,
Acme CRM,,Director
Ledgerly,Enterprise,CFO
";

/// Temp directory holding `data/result_base.csv` and `data/review_base.csv`.
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new(registry: &str, reviews: &str) -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("result_base.csv"), registry).unwrap();
        std::fs::write(data.join("review_base.csv"), reviews).unwrap();
        Self { dir }
    }

    pub fn standard() -> Self {
        Self::new(REGISTRY_CSV, REVIEWS_CSV)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output(&self) -> PathBuf {
        self.path().join("data").join("industry_name.json")
    }

    /// Config pointing at this fixture's files with default analysis settings.
    pub fn config(&self) -> Config {
        Config {
            registry: self.path().join("data").join("result_base.csv"),
            reviews: self.path().join("data").join("review_base.csv"),
            output: self.output(),
            ..Config::default()
        }
    }

    pub fn read_output(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.output()).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
