//! Data-access collaborators that supply the full employee collection.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::employee::{find_duplicate_id, Employee};

pub const EMPLOYEES_PATH: &str = "/api/employees";

/// Anything that can return the whole employee collection in display order.
pub trait EmployeeSource {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Employee>, AppError>> + Send;
}

/// Fetches `GET {base_url}/api/employees` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEmployeeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpEmployeeSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to create HTTP client: {}", err)))?;

        Ok(HttpEmployeeSource {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), EMPLOYEES_PATH),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.api_base_url, config.fetch_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EmployeeSource for HttpEmployeeSource {
    async fn fetch_all(&self) -> Result<Vec<Employee>, AppError> {
        debug!("Fetching employees from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                error!("Employee fetch failed: {:?}", err);
                AppError::from(err)
            })?;

        let employees = response.json::<Vec<Employee>>().await.map_err(|err| {
            error!("Employee payload rejected: {:?}", err);
            AppError::FetchError(format!("Invalid employee payload: {}", err))
        })?;

        if let Some(id) = find_duplicate_id(&employees) {
            error!("Employee payload repeats id {}", id);
            return Err(AppError::FetchError(format!("Duplicate employee id {}", id)));
        }
        Ok(employees)
    }
}

/// In-memory stand-in for the data-access API. Responses can be swapped between fetches.
#[derive(Debug, Clone)]
pub struct MockEmployeeSource {
    response: Arc<Mutex<Result<Vec<Employee>, String>>>,
}

impl MockEmployeeSource {
    pub fn new(records: Vec<Employee>) -> Self {
        MockEmployeeSource {
            response: Arc::new(Mutex::new(Ok(records))),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        MockEmployeeSource {
            response: Arc::new(Mutex::new(Err(message.into()))),
        }
    }

    pub async fn respond_with(&self, records: Vec<Employee>) {
        *self.response.lock().await = Ok(records);
    }

    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.response.lock().await = Err(message.into());
    }
}

impl EmployeeSource for MockEmployeeSource {
    async fn fetch_all(&self) -> Result<Vec<Employee>, AppError> {
        self.response.lock().await.clone().map_err(AppError::FetchError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::{EmployeeId, Gender};

    fn ann() -> Employee {
        Employee {
            id: EmployeeId::new("1"),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            gender: Gender::Female,
            image_url: "http://x/1.png".to_string(),
        }
    }

    #[test]
    fn builds_collection_url() {
        let source = HttpEmployeeSource::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url(), "http://localhost:8080/api/employees");
    }

    #[tokio::test]
    async fn mock_source_switches_responses() {
        let source = MockEmployeeSource::new(vec![ann()]);
        assert_eq!(source.fetch_all().await.unwrap(), vec![ann()]);

        source.fail_with("offline").await;
        assert_eq!(
            source.fetch_all().await,
            Err(AppError::FetchError("offline".to_string()))
        );

        source.respond_with(Vec::new()).await;
        assert!(source.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_fetch_error() {
        let source = HttpEmployeeSource::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(matches!(source.fetch_all().await, Err(AppError::FetchError(_))));
    }
}
