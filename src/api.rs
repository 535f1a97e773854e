use reqwest::Client;

use crate::error::{Result, TuduError};
use crate::types::{NewList, TodoList};

/// Thin wrapper over the remote list store.
///
/// One request per operation against `{base_url}/lists[/{id}]`, JSON both
/// ways. No retries, no auth, no caching; any transport failure or non-2xx
/// response surfaces as an error carrying a message string.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/lists", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        // Ids are opaque server strings; encode them before they become a
        // path segment.
        format!("{}/lists/{}", self.base_url, urlencoding::encode(id))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(TuduError::Server { status, message })
    }

    pub async fn get_lists(&self) -> Result<Vec<TodoList>> {
        let response = self.client.get(self.collection_url()).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn get_list(&self, id: &str) -> Result<TodoList> {
        let response = self.client.get(self.item_url(id)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_list(&self, body: &NewList) -> Result<TodoList> {
        let response = self
            .client
            .post(self.collection_url())
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn replace_list(&self, id: &str, body: &TodoList) -> Result<TodoList> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_list(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Todo;

    #[test]
    fn collection_url_joins_base_and_resource() {
        let api = ApiClient::new("http://localhost:3000");
        assert_eq!(api.collection_url(), "http://localhost:3000/lists");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let api = ApiClient::new("http://localhost:3000/");
        assert_eq!(api.collection_url(), "http://localhost:3000/lists");
        assert_eq!(api.item_url("l1"), "http://localhost:3000/lists/l1");
    }

    #[test]
    fn item_url_encodes_opaque_ids() {
        let api = ApiClient::new("http://localhost:3000");
        assert_eq!(
            api.item_url("a b/c"),
            "http://localhost:3000/lists/a%20b%2Fc"
        );
    }

    #[test]
    fn new_list_serializes_with_empty_todos() {
        let body = NewList {
            title: "Groceries".to_string(),
            description: String::new(),
            todos: Vec::new(),
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["title"], "Groceries");
        assert_eq!(json["description"], "");
        assert!(json["todos"].as_array().unwrap().is_empty());
    }

    #[test]
    fn replacement_body_carries_the_full_list() {
        let list = TodoList {
            id: "l1".to_string(),
            title: "Groceries".to_string(),
            description: "weekly".to_string(),
            todos: vec![Todo::new("Eggs", false)],
        };
        let json: serde_json::Value = serde_json::to_value(&list).unwrap();
        assert_eq!(json["id"], "l1");
        assert_eq!(json["todos"].as_array().unwrap().len(), 1);
        assert_eq!(json["todos"][0]["title"], "Eggs");
        assert_eq!(json["todos"][0]["completed"], false);
    }
}
