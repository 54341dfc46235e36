//! Product repository backed by an Elasticsearch-compatible REST API.
//!
//! All products live in one index ([`ElasticRepository::INDEX`]), one document per product,
//! with the product id as the document id and `{name, description, price}` as the source.

use crate::catalog::{CatalogError, ProductRepository};
use crate::model::Product;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

/// Stored shape of a product; the id lives in the document's `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProductDocument {
    name: String,
    description: String,
    price: f64,
}

impl ProductDocument {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }

    fn into_product(self, id: String) -> Product {
        Product::new(id, self.name, self.description, self.price)
    }
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: ProductDocument,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitList,
}

#[derive(Debug, Deserialize)]
struct HitList {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: ProductDocument,
}

fn parse_hits(body: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response
        .hits
        .hits
        .into_iter()
        .map(|hit| hit.source.into_product(hit.id))
        .collect())
}

fn ids_query(ids: &[String]) -> Value {
    // Without an explicit size the store would cap the result at its default page.
    json!({
        "size": ids.len(),
        "query": { "ids": { "values": ids } },
    })
}

fn page_query(skip: u64, take: u64) -> Value {
    json!({
        "from": skip,
        "size": take,
        "query": { "match_all": {} },
    })
}

fn search_query(text: &str, skip: u64, take: u64) -> Value {
    json!({
        "from": skip,
        "size": take,
        "query": {
            "multi_match": {
                "query": text,
                "fields": ["name", "description"],
            }
        },
    })
}

/// HTTP client for the catalog index.
#[derive(Debug, Clone)]
pub struct ElasticRepository {
    http: reqwest::Client,
    base_url: Url,
}

impl ElasticRepository {
    pub const INDEX: &'static str = "catalog";

    /// Builds a repository for `url` without contacting the store.
    pub fn new(url: &str) -> Result<Self, CatalogError> {
        let base_url = Url::parse(url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(url.to_string()));
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, base_url })
    }

    /// Succeeds when the store's root endpoint answers with a success status.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        self.http
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always writable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Runs a `_search` request and maps a non-success answer to `failure(status)`.
    ///
    /// The index is created by the first write, so until then a search finds nothing
    /// rather than failing.
    async fn search_hits(
        &self,
        body: &Value,
        failure: fn(u16) -> CatalogError,
    ) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .http
            .post(self.endpoint(&[Self::INDEX, "_search"]))
            .query(&[("ignore_unavailable", "true")])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Index missing, no hits");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %detail, "Search request rejected");
            return Err(failure(status.as_u16()));
        }

        let products = parse_hits(&response.bytes().await?)?;
        debug!(hits = products.len(), "Search answered");
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for ElasticRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn put(&self, product: &Product) -> Result<(), CatalogError> {
        let response = self
            .http
            .put(self.endpoint(&[Self::INDEX, "_doc", &product.id]))
            .query(&[("refresh", "true")])
            .json(&ProductDocument::from_product(product))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Index request rejected");
            return Err(CatalogError::IndexingFailed(status.as_u16()));
        }
        debug!("Indexed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Product, CatalogError> {
        let response = self
            .http
            .get(self.endpoint(&[Self::INDEX, "_doc", id]))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound(id.to_string())),
            status if !status.is_success() => {
                warn!(status = status.as_u16(), "Get request rejected");
                Err(CatalogError::FetchFailed(status.as_u16()))
            }
            _ => {
                let found: GetResponse = serde_json::from_slice(&response.bytes().await?)?;
                Ok(found.source.into_product(found.id))
            }
        }
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.search_hits(&ids_query(ids), CatalogError::FetchFailed)
            .await
    }

    #[instrument(skip(self))]
    async fn list_page(&self, skip: u64, take: u64) -> Result<Vec<Product>, CatalogError> {
        if take == 0 {
            return Ok(Vec::new());
        }
        self.search_hits(&page_query(skip, take), CatalogError::FetchFailed)
            .await
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, CatalogError> {
        if take == 0 {
            return Ok(Vec::new());
        }
        self.search_hits(&search_query(query, skip, take), CatalogError::SearchFailed)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_query_sizes_to_the_id_set() {
        let ids = vec!["p1".to_string(), "p2".to_string()];
        assert_eq!(
            ids_query(&ids),
            json!({"size": 2, "query": {"ids": {"values": ["p1", "p2"]}}})
        );
    }

    #[test]
    fn test_page_query_shape() {
        assert_eq!(
            page_query(20, 10),
            json!({"from": 20, "size": 10, "query": {"match_all": {}}})
        );
    }

    #[test]
    fn test_search_query_covers_name_and_description() {
        let body = search_query("blue mug", 0, 5);
        assert_eq!(body["query"]["multi_match"]["query"], "blue mug");
        assert_eq!(
            body["query"]["multi_match"]["fields"],
            json!(["name", "description"])
        );
        assert_eq!(body["from"], 0);
        assert_eq!(body["size"], 5);
    }

    #[test]
    fn test_parse_hits_reads_nested_hits() {
        let body = json!({
            "took": 3,
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{
                    "_index": "catalog",
                    "_id": "p1",
                    "_score": 1.0,
                    "_source": {"name": "Mug", "description": "Blue mug", "price": 10.0}
                }]
            }
        });
        let products = parse_hits(body.to_string().as_bytes()).unwrap();
        assert_eq!(products, vec![Product::new("p1", "Mug", "Blue mug", 10.0)]);
    }

    #[test]
    fn test_parse_hits_rejects_malformed_body() {
        let err = parse_hits(b"{\"hits\": []}").unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[test]
    fn test_document_omits_id() {
        let doc = ProductDocument::from_product(&Product::new("p1", "Mug", "Blue mug", 10.0));
        assert_eq!(
            serde_json::to_value(doc).unwrap(),
            json!({"name": "Mug", "description": "Blue mug", "price": 10.0})
        );
    }

    #[test]
    fn test_endpoint_escapes_document_ids() {
        let repo = ElasticRepository::new("http://localhost:9200").unwrap();
        let url = repo.endpoint(&[ElasticRepository::INDEX, "_doc", "a/b c"]);
        assert_eq!(url.as_str(), "http://localhost:9200/catalog/_doc/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let repo = ElasticRepository::new("http://search.internal/es/").unwrap();
        let url = repo.endpoint(&[ElasticRepository::INDEX, "_search"]);
        assert_eq!(url.as_str(), "http://search.internal/es/catalog/_search");
    }

    #[test]
    fn test_rejects_unusable_urls() {
        assert!(matches!(
            ElasticRepository::new("not a url"),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            ElasticRepository::new("mailto:ops@example.com"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_inputs_short_circuit_without_a_request() {
        // Port 9 (discard) is never an Elasticsearch; a request would fail with Transport.
        let repo = ElasticRepository::new("http://127.0.0.1:9").unwrap();
        assert!(repo.list_by_ids(&[]).await.unwrap().is_empty());
        assert!(repo.list_page(0, 0).await.unwrap().is_empty());
        assert!(repo.search("mug", 0, 0).await.unwrap().is_empty());
    }

    mod http {
        use super::*;
        use std::sync::{Arc, Mutex};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};

        /// Local HTTP server answering each connection with the next canned response.
        struct Stub {
            url: String,
            requests: Arc<Mutex<Vec<String>>>,
        }

        impl Stub {
            async fn serve(responses: Vec<(u16, String)>) -> Self {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                let url = format!("http://{}", listener.local_addr().unwrap());
                let requests = Arc::new(Mutex::new(Vec::new()));
                let seen = Arc::clone(&requests);
                tokio::spawn(async move {
                    for (status, body) in responses {
                        let (mut stream, _) = listener.accept().await.unwrap();
                        let line = read_request_line(&mut stream).await;
                        seen.lock().unwrap().push(line);
                        let reply = format!(
                            "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        stream.write_all(reply.as_bytes()).await.unwrap();
                        stream.shutdown().await.unwrap();
                    }
                });
                Self { url, requests }
            }

            fn repository(&self) -> ElasticRepository {
                ElasticRepository::new(&self.url).unwrap()
            }

            fn requests(&self) -> Vec<String> {
                self.requests.lock().unwrap().clone()
            }
        }

        /// Reads one full request (head and body) and returns its request line.
        async fn read_request_line(stream: &mut TcpStream) -> String {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&buf[..end]).to_string();
                let body_len = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    return head.lines().next().unwrap_or_default().to_string();
                }
            }
            String::from_utf8_lossy(&buf).lines().next().unwrap_or_default().to_string()
        }

        fn hits(products: &[Product]) -> String {
            let hits: Vec<Value> = products
                .iter()
                .map(|p| {
                    json!({
                        "_index": "catalog",
                        "_id": p.id,
                        "_source": {"name": p.name, "description": p.description, "price": p.price}
                    })
                })
                .collect();
            json!({"hits": {"total": {"value": hits.len()}, "hits": hits}}).to_string()
        }

        fn index_not_found() -> (u16, String) {
            let body = json!({
                "error": {"type": "index_not_found_exception", "index": "catalog"},
                "status": 404
            });
            (404, body.to_string())
        }

        #[tokio::test]
        async fn test_get_decodes_the_document() {
            let body = json!({
                "_index": "catalog",
                "_id": "p1",
                "_version": 1,
                "found": true,
                "_source": {"name": "Mug", "description": "Blue mug", "price": 10.0}
            });
            let stub = Stub::serve(vec![(200, body.to_string())]).await;

            let product = stub.repository().get_by_id("p1").await.unwrap();
            assert_eq!(product, Product::new("p1", "Mug", "Blue mug", 10.0));
            assert_eq!(stub.requests(), vec!["GET /catalog/_doc/p1 HTTP/1.1"]);
        }

        #[tokio::test]
        async fn test_get_missing_document_is_not_found() {
            let body = json!({"_index": "catalog", "_id": "p9", "found": false});
            let stub = Stub::serve(vec![(404, body.to_string())]).await;

            let err = stub.repository().get_by_id("p9").await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound(ref id) if id == "p9"));
        }

        #[tokio::test]
        async fn test_get_server_error_is_fetch_failed() {
            let stub = Stub::serve(vec![(500, "{}".to_string())]).await;

            let err = stub.repository().get_by_id("p1").await.unwrap_err();
            assert!(matches!(err, CatalogError::FetchFailed(500)));
        }

        #[tokio::test]
        async fn test_put_refreshes_and_reports_rejections() {
            let stub = Stub::serve(vec![
                (201, json!({"result": "created"}).to_string()),
                (400, json!({"error": "mapper_parsing_exception"}).to_string()),
            ])
            .await;
            let repo = stub.repository();
            let product = Product::new("p1", "Mug", "Blue mug", 10.0);

            repo.put(&product).await.unwrap();
            let err = repo.put(&product).await.unwrap_err();
            assert!(matches!(err, CatalogError::IndexingFailed(400)));

            let requests = stub.requests();
            assert_eq!(requests[0], "PUT /catalog/_doc/p1?refresh=true HTTP/1.1");
        }

        #[tokio::test]
        async fn test_search_failures_keep_their_kind() {
            let stub = Stub::serve(vec![
                (503, "{}".to_string()),
                (503, "{}".to_string()),
                (503, "{}".to_string()),
            ])
            .await;
            let repo = stub.repository();

            let err = repo.search("mug", 0, 10).await.unwrap_err();
            assert!(matches!(err, CatalogError::SearchFailed(503)));
            let err = repo.list_page(0, 10).await.unwrap_err();
            assert!(matches!(err, CatalogError::FetchFailed(503)));
            let err = repo.list_by_ids(&["p1".to_string()]).await.unwrap_err();
            assert!(matches!(err, CatalogError::FetchFailed(503)));
        }

        #[tokio::test]
        async fn test_search_tolerates_a_missing_index() {
            let stub = Stub::serve(vec![
                (200, hits(&[])),
                index_not_found(),
                index_not_found(),
                index_not_found(),
            ])
            .await;
            let repo = stub.repository();

            assert!(repo.list_page(0, 10).await.unwrap().is_empty());
            assert!(repo.list_page(0, 10).await.unwrap().is_empty());
            assert!(repo.list_by_ids(&["p1".to_string()]).await.unwrap().is_empty());
            assert!(repo.search("mug", 0, 10).await.unwrap().is_empty());

            for line in stub.requests() {
                assert_eq!(line, "POST /catalog/_search?ignore_unavailable=true HTTP/1.1");
            }
        }

        #[tokio::test]
        async fn test_search_reads_hits() {
            let products = vec![
                Product::new("p2", "Tea", "Loose leaf", 5.5),
                Product::new("p1", "Mug", "Blue mug", 10.0),
            ];
            let stub = Stub::serve(vec![(200, hits(&products))]).await;

            let found = stub.repository().search("mug tea", 0, 10).await.unwrap();
            assert_eq!(found, products);
        }
    }
}
