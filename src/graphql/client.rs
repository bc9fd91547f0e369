use crate::config::Config;
use crate::error::{Error, Result};
use crate::graphql::operations::OperationDoc;
use crate::session::SessionStore;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// `{ success, message, data }` envelope every named operation returns.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
}

/// HTTP transport for the job-board GraphQL API.
///
/// Attaches `Authorization: Bearer <token>` whenever a session token is
/// stored; the token is re-read per request so a login that happened in the
/// same process is picked up without rebuilding the client.
#[derive(Clone)]
pub struct GraphqlClient {
    http: Client,
    endpoint: Url,
    session: SessionStore,
}

impl GraphqlClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.graphql_url.clone(),
            session,
        })
    }

    /// Posts the document and returns the envelope under the operation's
    /// root field, still as raw JSON.
    async fn execute(&self, op: &OperationDoc, variables: Value) -> Result<Value> {
        let body = json!({
            "query": op.document,
            "variables": variables,
        });

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.load() {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token),
            );
        }

        tracing::debug!(operation = op.name, "executing GraphQL operation");
        let response = request.json(&body).send().await?;
        let parsed: GraphqlResponse = response.json().await?;

        if let Some(errors) = parsed.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!(operation = op.name, %message, "GraphQL error");
                return Err(Error::graphql(message));
            }
        }

        let mut data = parsed
            .data
            .ok_or_else(|| Error::Internal(format!("{}: response has no data", op.name)))?;
        let payload = data
            .get_mut(op.root)
            .map(Value::take)
            .ok_or_else(|| Error::Internal(format!("{}: missing root field {}", op.name, op.root)))?;
        Ok(payload)
    }

    /// Executes an operation and unwraps its envelope into the payload type.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        op: &OperationDoc,
        variables: Value,
    ) -> Result<T> {
        let payload = self.execute(op, variables).await?;
        let envelope: Envelope<T> = serde_json::from_value(payload)?;
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("{} failed", op.name));
            return Err(Error::api(message));
        }
        envelope
            .data
            .ok_or_else(|| Error::Internal(format!("{}: successful response without data", op.name)))
    }

    /// Executes a mutation whose envelope carries no data payload
    /// (UpdateStatus), returning the backend message.
    pub(crate) async fn acknowledge(&self, op: &OperationDoc, variables: Value) -> Result<String> {
        let payload = self.execute(op, variables).await?;
        let envelope: Envelope<Value> = serde_json::from_value(payload)?;
        let message = envelope.message.unwrap_or_default();
        if !envelope.success {
            return Err(Error::api(if message.is_empty() {
                format!("{} failed", op.name)
            } else {
                message
            }));
        }
        Ok(message)
    }
}
