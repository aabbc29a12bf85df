use super::{ApiClient, AppError, Credentials};
use crate::models::{BudgetItem, DashboardSummary, NewBudget, TransactionPage};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
struct BudgetList {
    #[serde(default)]
    budgets: Vec<BudgetItem>,
}

#[derive(Debug, Deserialize)]
struct BudgetCreated {
    budget: BudgetItem,
}

impl ApiClient {
    /// `GET /api/dashboard/load`.
    ///
    /// # Errors
    /// Returns the transport or backend failure; a `401` is `AppError::Unauthorized`.
    #[instrument(skip(self, credentials))]
    pub async fn load_dashboard(
        &self,
        credentials: Credentials<'_>,
    ) -> Result<DashboardSummary, AppError> {
        let request = self.get_request("/api/dashboard/load")?;
        let envelope = self
            .execute::<DashboardSummary>(request, credentials)
            .await?;
        Ok(envelope.data)
    }

    /// `GET /api/budgets/load`.
    ///
    /// # Errors
    /// Returns the transport or backend failure; a `401` is `AppError::Unauthorized`.
    #[instrument(skip(self, credentials))]
    pub async fn load_budgets(
        &self,
        credentials: Credentials<'_>,
    ) -> Result<Vec<BudgetItem>, AppError> {
        let request = self.get_request("/api/budgets/load")?;
        let envelope = self.execute::<BudgetList>(request, credentials).await?;
        Ok(envelope.data.budgets)
    }

    /// `POST /api/budgets/add`. Returns the budget as stored by the backend.
    ///
    /// # Errors
    /// Returns the transport or backend failure; a `401` is `AppError::Unauthorized`.
    #[instrument(skip(self, credentials))]
    pub async fn add_budget(
        &self,
        credentials: Credentials<'_>,
        budget: &NewBudget,
    ) -> Result<BudgetItem, AppError> {
        let request = self.post_request("/api/budgets/add")?.json(budget);
        let envelope = self.execute::<BudgetCreated>(request, credentials).await?;
        Ok(envelope.data.budget)
    }

    /// `GET /api/transactions/get-by?page=&limit=`. Pages are 1-indexed.
    ///
    /// # Errors
    /// Returns the transport or backend failure; a `401` is `AppError::Unauthorized`.
    #[instrument(skip(self, credentials))]
    pub async fn list_transactions(
        &self,
        credentials: Credentials<'_>,
        page: u32,
        limit: u32,
    ) -> Result<TransactionPage, AppError> {
        let request = self
            .get_request("/api/transactions/get-by")?
            .query(&[("page", page), ("limit", limit)]);
        let envelope = self
            .execute::<TransactionPage>(request, credentials)
            .await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, models::Frequency};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn list_transactions_sends_page_and_limit() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transactions/get-by"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "transactions": [{
                    "id": "t1",
                    "type": "income",
                    "category": "Salary",
                    "date": "2025-01-31",
                    "amount": 2500.0
                }],
                "has_more": true,
                "total": 6
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(AppConfig::new(&server.uri()).unwrap()).unwrap();
        let page = client
            .list_transactions(Credentials::Jar, 2, 5)
            .await
            .unwrap();
        assert_eq!(page.transactions.len(), 1);
        assert!(page.has_more);
        assert_eq!(page.total, Some(6));
    }

    #[tokio::test]
    async fn load_budgets_forwards_cookie_credentials() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/budgets/load"))
            .and(header("cookie", "jwt=visitor-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Budgets loaded from cache",
                "budgets": [{
                    "id": "b1",
                    "user_id": "u1",
                    "category": "Rent",
                    "frequency": "Monthly",
                    "amount": 900.0,
                    "spent": 900.0,
                    "remaining": 0.0
                }]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::stateless(AppConfig::new(&server.uri()).unwrap()).unwrap();
        let token = secrecy::SecretString::from("visitor-token".to_string());
        let budgets = client.load_budgets(Credentials::Cookie(&token)).await.unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].frequency, Frequency::Monthly);
    }

    #[tokio::test]
    async fn load_dashboard_maps_401() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/load"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "message": "Session expired. Please log in again."
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(AppConfig::new(&server.uri()).unwrap()).unwrap();
        let err = client.load_dashboard(Credentials::Jar).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Session expired. Please log in again.");
    }
}
