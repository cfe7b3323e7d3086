#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

use readme_generator::error::Result;
use readme_generator::fetcher::RepositoryFetcher;
use readme_generator::{GitHubClient, ReadmeModel, ReadmeService};

pub mod test_helpers {
    use super::*;

    pub async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    pub fn github_client(server: &ServerGuard) -> GitHubClient {
        GitHubClient::with_base_url(&server.url(), None).expect("client builds")
    }

    pub fn repository_json(name: &str, language: Option<&str>) -> String {
        json!({
            "name": name,
            "full_name": format!("acme/{}", name),
            "description": "A small widget",
            "topics": ["widgets"],
            "license": { "key": "mit", "name": "MIT License", "spdx_id": "MIT" },
            "language": language,
            "default_branch": "main",
            "homepage": null,
            "stargazers_count": 42,
            "forks_count": 7
        })
        .to_string()
    }

    pub fn tree_json(files: &[&str], dirs: &[&str]) -> String {
        let tree: Vec<Value> = dirs
            .iter()
            .map(|d| json!({ "path": d, "type": "tree" }))
            .chain(
                files
                    .iter()
                    .map(|f| json!({ "path": f, "type": "blob", "size": 10 })),
            )
            .collect();
        json!({ "sha": "abc", "tree": tree, "truncated": false }).to_string()
    }

    pub fn content_json(text: &str) -> String {
        json!({ "content": BASE64.encode(text), "encoding": "base64" }).to_string()
    }

    /// Keep the returned mock alive for as long as it should answer
    pub async fn mock_repository(server: &mut ServerGuard, name: &str, language: Option<&str>) -> Mock {
        server
            .mock("GET", format!("/repos/acme/{}", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(repository_json(name, language))
            .create_async()
            .await
    }

    pub async fn mock_tree(server: &mut ServerGuard, name: &str, files: &[&str], dirs: &[&str]) -> Mock {
        server
            .mock("GET", format!("/repos/acme/{}/git/trees/main", name).as_str())
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(tree_json(files, dirs))
            .create_async()
            .await
    }

    pub async fn mock_file(server: &mut ServerGuard, name: &str, path: &str, text: &str) -> Mock {
        server
            .mock("GET", format!("/repos/acme/{}/contents/{}", name, path).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(content_json(text))
            .create_async()
            .await
    }

    /// Model that records prompts and answers with a fixed text
    #[derive(Default)]
    pub struct FakeModel {
        pub reply: String,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeModel {
        pub fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ReadmeModel for FakeModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    pub fn service_with_model(server: &ServerGuard, model: Arc<dyn ReadmeModel>) -> ReadmeService {
        ReadmeService::new(RepositoryFetcher::new(github_client(server)), model)
    }
}
