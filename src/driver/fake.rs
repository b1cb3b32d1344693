//! In-memory registry double for exercising the engine without a browser.
//!
//! Scripts search results and detail pages, logs navigations and form
//! submissions, and mimics the registry quirks the engine has to handle:
//! input values persist across navigations, and the results table is gone
//! as soon as the session moves to another page. Element handles go stale
//! when the page changes, so any read after a navigation fails loudly.

use super::{UiDriver, UiElement};
use crate::registry::{DetailIds, RegistryProfile};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Profile for the small imaginary registry the fake serves.
pub fn test_profile() -> RegistryProfile {
    RegistryProfile {
        search_url: "https://registry.test/ucp/search".to_string(),
        last_name_input: "txtLastName".to_string(),
        first_name_input: "txtFirstName".to_string(),
        results_row_selector: "#results tr".to_string(),
        property_detail: DetailIds {
            reporter: "ReportedByData".to_string(),
            property_type: "PropertyTypeData".to_string(),
            amount: "CashReportData".to_string(),
        },
        holder_detail: DetailIds {
            reporter: "HolderNameData".to_string(),
            property_type: "PropertyTypeData".to_string(),
            amount: "AmountData".to_string(),
        },
    }
}

/// One scripted results-table row.
#[derive(Debug, Clone, Default)]
pub struct FakeRow {
    pub address1: String,
    pub address2: String,
    pub property_id: String,
    pub href: String,
    pub icon: String,
}

impl FakeRow {
    pub fn new(address1: &str, address2: &str, property_id: &str, href: &str, icon: &str) -> Self {
        FakeRow {
            address1: address1.to_string(),
            address2: address2.to_string(),
            property_id: property_id.to_string(),
            href: href.to_string(),
            icon: icon.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Rows(Vec<FakeRow>),
    Overflow,
}

/// Contents of one rendered table cell.
#[derive(Debug, Clone, Default)]
struct FakeCell {
    text: String,
    anchors: Vec<String>,
    images: Vec<String>,
}

#[derive(Default)]
struct Inner {
    profile: RegistryProfile,
    searches: HashMap<(String, String), Scripted>,
    landings: HashMap<(String, String), String>,
    details: HashMap<String, HashMap<String, String>>,
    current_url: String,
    last_value: String,
    first_value: String,
    table: Option<Scripted>,
    submissions: Vec<(String, String)>,
    visits: Vec<String>,
    generation: u64,
}

/// Scriptable in-memory stand-in for the registry website.
pub struct FakeRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::with_profile(test_profile())
    }

    pub fn with_profile(profile: RegistryProfile) -> Self {
        FakeRegistry {
            inner: Arc::new(Mutex::new(Inner {
                profile,
                ..Inner::default()
            })),
        }
    }

    pub fn profile(&self) -> RegistryProfile {
        self.inner.lock().unwrap().profile.clone()
    }

    /// Script the rows rendered for one (last, first) submission.
    pub fn stub_search(&self, last: &str, first: &str, rows: Vec<FakeRow>) {
        self.inner
            .lock()
            .unwrap()
            .searches
            .insert((last.to_string(), first.to_string()), Scripted::Rows(rows));
    }

    /// Script the too-many-results sentinel for one submission.
    pub fn stub_overflow(&self, last: &str, first: &str) {
        self.inner
            .lock()
            .unwrap()
            .searches
            .insert((last.to_string(), first.to_string()), Scripted::Overflow);
    }

    /// Script the URL one submission's postback lands on. Without a stub
    /// the postback stays on the search URL.
    pub fn stub_landing(&self, last: &str, first: &str, url: &str) {
        self.inner
            .lock()
            .unwrap()
            .landings
            .insert((last.to_string(), first.to_string()), url.to_string());
    }

    /// Script the labeled fields of one detail page.
    pub fn stub_detail(&self, url: &str, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect();
        self.inner
            .lock()
            .unwrap()
            .details
            .insert(url.to_string(), fields);
    }

    /// Every (last, first) pair submitted, in order.
    pub fn submissions(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().submissions.clone()
    }

    /// Every URL navigated to, in order.
    pub fn visits(&self) -> Vec<String> {
        self.inner.lock().unwrap().visits.clone()
    }
}

impl Default for FakeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UiDriver for FakeRegistry {
    async fn goto(&self, url: &str) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.visits.push(url.to_string());
        inner.current_url = url.to_string();
        inner.table = None;
        inner.generation += 1;
        Ok(url.to_string())
    }

    async fn element_by_id(&self, id: &str) -> Result<Box<dyn UiElement>> {
        let inner = self.inner.lock().unwrap();
        let generation = inner.generation;
        let on_search_page = inner.current_url == inner.profile.search_url;
        let node = if on_search_page && id == inner.profile.last_name_input {
            Node::Input(Slot::Last)
        } else if on_search_page && id == inner.profile.first_name_input {
            Node::Input(Slot::First)
        } else if let Some(text) = inner
            .details
            .get(&inner.current_url)
            .and_then(|fields| fields.get(id))
        {
            Node::Label(text.clone())
        } else {
            bail!("no element #{id} at {}", inner.current_url);
        };
        Ok(FakeElement::boxed(self.inner.clone(), generation, node))
    }

    async fn elements_by_css(&self, selector: &str) -> Result<Vec<Box<dyn UiElement>>> {
        let inner = self.inner.lock().unwrap();
        if selector != inner.profile.results_row_selector {
            return Ok(Vec::new());
        }
        let generation = inner.generation;
        // First rendered row is the header, which carries no data cells.
        let rows: Vec<Vec<FakeCell>> = match &inner.table {
            None => return Ok(Vec::new()),
            Some(Scripted::Overflow) => vec![
                Vec::new(),
                vec![FakeCell {
                    text: "Too many results. Please refine your search.".to_string(),
                    ..FakeCell::default()
                }],
            ],
            Some(Scripted::Rows(rows)) => {
                let mut rendered = vec![Vec::new()];
                for row in rows {
                    rendered.push(vec![
                        FakeCell::default(),
                        FakeCell {
                            text: row.address1.clone(),
                            ..FakeCell::default()
                        },
                        FakeCell {
                            text: row.address2.clone(),
                            ..FakeCell::default()
                        },
                        FakeCell {
                            text: row.property_id.clone(),
                            anchors: vec![row.href.clone()],
                            ..FakeCell::default()
                        },
                        FakeCell {
                            images: vec![row.icon.clone()],
                            ..FakeCell::default()
                        },
                    ]);
                }
                rendered
            }
        };
        Ok(rows
            .into_iter()
            .map(|cells| FakeElement::boxed(self.inner.clone(), generation, Node::Row(cells)))
            .collect())
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Last,
    First,
}

#[derive(Debug, Clone)]
enum Node {
    Input(Slot),
    Row(Vec<FakeCell>),
    Cell(FakeCell),
    Anchor(String),
    Image(String),
    Label(String),
}

struct FakeElement {
    registry: Arc<Mutex<Inner>>,
    generation: u64,
    node: Node,
}

impl FakeElement {
    fn boxed(registry: Arc<Mutex<Inner>>, generation: u64, node: Node) -> Box<dyn UiElement> {
        Box::new(FakeElement {
            registry,
            generation,
            node,
        })
    }

    fn fresh(&self) -> Result<MutexGuard<'_, Inner>> {
        let inner = self.registry.lock().unwrap();
        if inner.generation != self.generation {
            bail!("stale element handle: the page changed since this lookup");
        }
        Ok(inner)
    }
}

#[async_trait]
impl UiElement for FakeElement {
    async fn text(&self) -> Result<String> {
        let inner = self.fresh()?;
        Ok(match &self.node {
            Node::Input(Slot::Last) => inner.last_value.clone(),
            Node::Input(Slot::First) => inner.first_value.clone(),
            Node::Label(text) => text.clone(),
            Node::Cell(cell) => cell.text.clone(),
            Node::Row(cells) => cells
                .iter()
                .map(|cell| cell.text.clone())
                .collect::<Vec<_>>()
                .join(" "),
            Node::Anchor(_) | Node::Image(_) => String::new(),
        })
    }

    async fn clear(&self) -> Result<()> {
        let mut inner = self.fresh()?;
        match &self.node {
            Node::Input(Slot::Last) => inner.last_value.clear(),
            Node::Input(Slot::First) => inner.first_value.clear(),
            _ => bail!("clear on a non-input element"),
        }
        Ok(())
    }

    async fn send_keys(&self, keys: &str) -> Result<Option<String>> {
        let mut inner = self.fresh()?;
        let (text, submit) = match keys.strip_suffix('\n') {
            Some(text) => (text, true),
            None => (keys, false),
        };
        match &self.node {
            Node::Input(Slot::Last) => inner.last_value.push_str(text),
            Node::Input(Slot::First) => inner.first_value.push_str(text),
            _ => bail!("send_keys on a non-input element"),
        }
        if !submit {
            return Ok(None);
        }
        let key = (inner.last_value.clone(), inner.first_value.clone());
        inner.submissions.push(key.clone());
        inner.table = inner.searches.get(&key).cloned();
        if let Some(landing) = inner.landings.get(&key).cloned() {
            inner.current_url = landing;
        }
        inner.generation += 1;
        Ok(Some(inner.current_url.clone()))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let _inner = self.fresh()?;
        Ok(match (&self.node, name) {
            (Node::Anchor(href), "href") => Some(href.clone()),
            (Node::Image(src), "src") => Some(src.clone()),
            _ => None,
        })
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn UiElement>>> {
        let _inner = self.fresh()?;
        Ok(match (&self.node, selector) {
            (Node::Row(cells), "td") => cells
                .iter()
                .map(|cell| {
                    FakeElement::boxed(
                        self.registry.clone(),
                        self.generation,
                        Node::Cell(cell.clone()),
                    )
                })
                .collect(),
            (Node::Cell(cell), "a") => cell
                .anchors
                .iter()
                .map(|href| {
                    FakeElement::boxed(
                        self.registry.clone(),
                        self.generation,
                        Node::Anchor(href.clone()),
                    )
                })
                .collect(),
            (Node::Cell(cell), "img") => cell
                .images
                .iter()
                .map(|src| {
                    FakeElement::boxed(
                        self.registry.clone(),
                        self.generation,
                        Node::Image(src.clone()),
                    )
                })
                .collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handles_go_stale_after_navigation() {
        let fake = FakeRegistry::new();
        let profile = fake.profile();
        fake.stub_search(
            "Doe",
            "Jane",
            vec![FakeRow::new("a1", "a2", "ID1", "detail?id=1", "pIcon.png")],
        );

        fake.goto(&profile.search_url).await.unwrap();
        let last = fake.element_by_id(&profile.last_name_input).await.unwrap();
        let first = fake.element_by_id(&profile.first_name_input).await.unwrap();
        last.send_keys("Doe").await.unwrap();
        first.send_keys("Jane\n").await.unwrap();

        let rows = fake
            .elements_by_css(&profile.results_row_selector)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        fake.goto("https://registry.test/elsewhere").await.unwrap();
        assert!(rows[1].find_all("td").await.is_err());
    }

    #[tokio::test]
    async fn test_input_values_persist_across_navigations() {
        let fake = FakeRegistry::new();
        let profile = fake.profile();

        fake.goto(&profile.search_url).await.unwrap();
        let last = fake.element_by_id(&profile.last_name_input).await.unwrap();
        last.send_keys("Smith").await.unwrap();

        fake.goto(&profile.search_url).await.unwrap();
        let last = fake.element_by_id(&profile.last_name_input).await.unwrap();
        assert_eq!(last.text().await.unwrap(), "Smith");
    }
}
