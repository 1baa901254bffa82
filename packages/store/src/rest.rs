//! # REST Store
//!
//! Client for a PostgREST-compatible backend. Pages and sections live
//! in `/rest/v1` tables, uploaded images in `/storage/v1` buckets, and
//! every request carries the project API key.
//!
//! Wire shapes follow the hosted schema:
//!
//! ```text
//! sales_pages      id, title, slug, is_published, primary_color, created_at
//! page_sections    id, page_id, section_type, content, order_index
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use vitrine_model::{PageId, PageMeta, Section, SectionContent, SectionId, ThemeColor};

use crate::error::StoreError;
use crate::traits::{
    object_name, NewPage, ObjectStore, PageChanges, PageRecord, PageStore, SectionRow,
};

/// PostgREST-backed [`PageStore`] and [`ObjectStore`]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: "page-images".to_string(),
        }
    }

    /// Bucket uploaded images land in. Defaults to `page-images`.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, name)
    }

    fn public_object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, name
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn page_sections(&self, id: &PageId) -> Result<Vec<Section>, StoreError> {
        let response = self
            .request(Method::GET, self.table_url("page_sections"))
            .query(&[
                ("page_id", format!("eq.{}", id)),
                ("order", "order_index.asc".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<PageSectionRow> = read_rows(check(response, None).await?).await?;
        Ok(rows.into_iter().map(PageSectionRow::into_section).collect())
    }
}

#[async_trait]
impl PageStore for RestStore {
    async fn load_page(&self, id: &PageId) -> Result<PageRecord, StoreError> {
        debug!(%id, "loading page");
        let response = self
            .request(Method::GET, self.table_url("sales_pages"))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        let rows: Vec<PageRow> = read_rows(check(response, None).await?).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        Ok(PageRecord {
            meta: row.into_meta(),
            sections: self.page_sections(id).await?,
        })
    }

    async fn load_page_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, StoreError> {
        debug!(slug, "resolving public slug");
        let response = self
            .request(Method::GET, self.table_url("sales_pages"))
            .query(&[
                ("slug", format!("eq.{}", slug)),
                ("is_published", "eq.true".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<PageRow> = read_rows(check(response, None).await?).await?;
        let row = match rows.into_iter().next() {
            Some(row) => row,
            None => return Ok(None),
        };

        let id = PageId::new(row.id.clone());
        let sections = self.page_sections(&id).await?;
        Ok(Some(PageRecord {
            meta: row.into_meta(),
            sections,
        }))
    }

    async fn list_pages(&self) -> Result<Vec<PageMeta>, StoreError> {
        let response = self
            .request(Method::GET, self.table_url("sales_pages"))
            .query(&[("order", "created_at.desc")])
            .send()
            .await?;
        let rows: Vec<PageRow> = read_rows(check(response, None).await?).await?;
        Ok(rows.into_iter().map(PageRow::into_meta).collect())
    }

    async fn create_page(&self, page: NewPage) -> Result<PageMeta, StoreError> {
        let body = NewPageRow {
            title: &page.title,
            slug: &page.slug,
            is_published: page.published,
            primary_color: page.theme_color.as_str(),
        };
        let response = self
            .request(Method::POST, self.table_url("sales_pages"))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let rows: Vec<PageRow> = read_rows(check(response, Some(page.slug.as_str())).await?).await?;
        let row = rows.into_iter().next().ok_or_else(|| StoreError::Api {
            status: 200,
            message: "create returned no representation".to_string(),
        })?;

        info!(id = %row.id, slug = %page.slug, "created page");
        Ok(row.into_meta())
    }

    async fn update_page(&self, id: &PageId, changes: PageChanges) -> Result<(), StoreError> {
        let body = PageChangesRow::from(&changes);
        let response = self
            .request(Method::PATCH, self.table_url("sales_pages"))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let rows: Vec<PageRow> = read_rows(check(response, changes.slug.as_deref()).await?).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn delete_page(&self, id: &PageId) -> Result<(), StoreError> {
        // Section rows go first; the page row is never left dangling.
        let response = self
            .request(Method::DELETE, self.table_url("page_sections"))
            .query(&[("page_id", format!("eq.{}", id))])
            .send()
            .await?;
        check(response, None).await?;

        let response = self
            .request(Method::DELETE, self.table_url("sales_pages"))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        check(response, None).await?;

        info!(%id, "deleted page");
        Ok(())
    }

    async fn insert_section(&self, page: &PageId, row: SectionRow) -> Result<String, StoreError> {
        let body = NewSectionRow {
            page_id: page.as_str(),
            section_type: row.content.kind_str(),
            content: row.content.encode(),
            order_index: row.order,
        };
        let response = self
            .request(Method::POST, self.table_url("page_sections"))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;

        // A conflict here is the page_id foreign key failing.
        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::NotFound(page.clone()));
        }
        let rows: Vec<PageSectionRow> = read_rows(check(response, None).await?).await?;
        let inserted = rows.into_iter().next().ok_or_else(|| StoreError::Api {
            status: 200,
            message: "insert returned no representation".to_string(),
        })?;
        Ok(inserted.id)
    }

    async fn update_section(&self, id: &str, row: SectionRow) -> Result<(), StoreError> {
        let body = SectionChangesRow {
            content: row.content.encode(),
            order_index: row.order,
        };
        let response = self
            .request(Method::PATCH, self.table_url("page_sections"))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let rows: Vec<PageSectionRow> = read_rows(check(response, None).await?).await?;
        if rows.is_empty() {
            return Err(StoreError::SectionNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_section(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, self.table_url("page_sections"))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        check(response, None).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for RestStore {
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let name = object_name(filename);
        debug!(name = %name, size = bytes.len(), "uploading object");

        let response = self
            .request(Method::POST, self.object_url(&name))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;
        check(response, None).await?;
        Ok(self.public_object_url(&name))
    }
}

/// Map failure statuses, treating a conflict as a slug collision when
/// one was attempted.
async fn check(response: Response, slug: Option<&str>) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::CONFLICT {
        if let Some(slug) = slug {
            return Err(StoreError::SlugTaken(slug.to_string()));
        }
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[derive(Debug, Deserialize)]
struct PageRow {
    id: String,
    title: String,
    slug: String,
    is_published: bool,
    primary_color: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl PageRow {
    fn into_meta(self) -> PageMeta {
        PageMeta {
            id: Some(PageId::new(self.id)),
            title: self.title,
            slug: self.slug,
            published: self.is_published,
            theme_color: self.primary_color.map(ThemeColor::new).unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageSectionRow {
    id: String,
    section_type: String,
    content: Value,
    order_index: i32,
}

impl PageSectionRow {
    fn into_section(self) -> Section {
        Section {
            id: SectionId::Persisted(self.id),
            content: SectionContent::decode(&self.section_type, self.content),
            order: self.order_index,
        }
    }
}

#[derive(Serialize)]
struct NewPageRow<'a> {
    title: &'a str,
    slug: &'a str,
    is_published: bool,
    primary_color: &'a str,
}

#[derive(Serialize)]
struct PageChangesRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_color: Option<&'a str>,
}

impl<'a> From<&'a PageChanges> for PageChangesRow<'a> {
    fn from(changes: &'a PageChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            slug: changes.slug.as_deref(),
            is_published: changes.published,
            primary_color: changes.theme_color.as_ref().map(ThemeColor::as_str),
        }
    }
}

#[derive(Serialize)]
struct NewSectionRow<'a> {
    page_id: &'a str,
    section_type: &'a str,
    content: Value,
    order_index: i32,
}

// Updates never touch section_type; a section keeps its kind for life.
#[derive(Serialize)]
struct SectionChangesRow {
    content: Value,
    order_index: i32,
}
