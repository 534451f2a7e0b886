use std::path::Path;
use std::time::Duration;

use log::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::employee::{find_duplicate_id, Employee, EmployeeId, Gender};

/// Backing data for the mocked data-access endpoint.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDb {
    pub employees: Vec<Employee>,
    pub latency: Duration,
}

impl EmployeeDb {
    pub fn new(employees: Vec<Employee>) -> Self {
        EmployeeDb {
            employees,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

pub async fn create_db(config: &Config) -> Result<EmployeeDb, AppError> {
    let employees = match &config.seed_path {
        Some(path) => load_seed_file(path).await?,
        None => default_seed(),
    };
    info!("Seeded {} employees", employees.len());
    Ok(EmployeeDb::new(employees).with_latency(config.mock_latency))
}

pub async fn load_seed_file(path: &Path) -> Result<Vec<Employee>, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| AppError::Config(format!("Failed to read seed file {}: {}", path.display(), err)))?;
    let employees: Vec<Employee> = serde_json::from_str(&raw)
        .map_err(|err| AppError::Config(format!("Invalid seed file {}: {}", path.display(), err)))?;
    if let Some(id) = find_duplicate_id(&employees) {
        return Err(AppError::Config(format!(
            "Seed file {} repeats employee id {}",
            path.display(),
            id
        )));
    }
    Ok(employees)
}

pub fn default_seed() -> Vec<Employee> {
    let seed = [
        ("1", "Ann", "Lee", "ann.lee@example.com", Gender::Female),
        ("2", "Brian", "Okafor", "brian.okafor@example.com", Gender::Male),
        ("3", "Carmen", "Diaz", "carmen.diaz@example.com", Gender::Female),
        ("4", "Daniel", "Novak", "daniel.novak@example.com", Gender::Male),
        ("5", "Esther", "Haddad", "esther.haddad@example.com", Gender::Female),
    ];
    seed.into_iter()
        .map(|(id, first_name, last_name, email, gender)| Employee {
            id: EmployeeId::new(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            gender,
            image_url: format!("https://i.pravatar.cc/150?img={}", id),
        })
        .collect()
}
