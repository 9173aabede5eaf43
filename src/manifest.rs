use std::collections::HashSet;

use serde_json::Value;

use crate::fetch::FetchError;

/// Path of the manifest, relative to the configured source.
pub const MANIFEST_PATH: &str = "/projects/manifest.json";

pub const DEFAULT_TOP_LINE: &str = "Portfolio";
pub const PLACEHOLDER_TITLE: &str = "Project Name";

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Image reference as written in the manifest (URL or path).
    pub image: String,
    pub href: Option<String>,
}

/// A header link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: Option<String>,
}

/// Header text and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// Top label and the placeholder shown when no project title is active.
    pub title_lines: [String; 2],
    pub links: Vec<Link>,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title_lines: [DEFAULT_TOP_LINE.to_string(), PLACEHOLDER_TITLE.to_string()],
            links: Vec::new(),
        }
    }
}

impl PageMeta {
    /// The title to show when nothing more specific is active.
    pub fn placeholder(&self) -> &str {
        if self.title_lines[1].is_empty() {
            PLACEHOLDER_TITLE
        } else {
            &self.title_lines[1]
        }
    }
}

/// The loaded project list plus page metadata. Never holds zero projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
    pub meta: PageMeta,
}

impl Catalog {
    /// Built-in single-item catalog used until (or instead of) a manifest.
    pub fn fallback() -> Self {
        Self {
            projects: vec![Project {
                id: "fallback-1".to_string(),
                title: "Project".to_string(),
                image: "/projects/project-1.png".to_string(),
                href: None,
            }],
            meta: PageMeta::default(),
        }
    }

    /// Build a catalog from an already-mapped list. `None` if the list is empty.
    pub fn new(projects: Vec<Project>, meta: PageMeta) -> Option<Self> {
        if projects.is_empty() {
            None
        } else {
            Some(Self { projects, meta })
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Title of the first project, which becomes active after a load.
    pub fn first_title(&self) -> &str {
        self.projects
            .first()
            .map(|p| p.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(PLACEHOLDER_TITLE)
    }

    /// Parse a manifest body.
    ///
    /// Fails when the body is not JSON or `projects` is missing, empty, or holds
    /// a `null` entry. Individual fields fall back to generated defaults.
    pub fn parse(body: &[u8]) -> Result<Self, FetchError> {
        let root: Value = serde_json::from_slice(body)
            .map_err(|e| FetchError::InvalidManifest(format!("not JSON: {e}")))?;

        let entries = root
            .get("projects")
            .and_then(|v| v.as_array())
            .ok_or_else(|| FetchError::InvalidManifest("missing projects array".into()))?;
        if entries.is_empty() {
            return Err(FetchError::InvalidManifest("empty projects array".into()));
        }

        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.is_null() {
                return Err(FetchError::InvalidManifest(format!("project {i} is null")));
            }
            let mut project = parse_project(i, entry);
            project.id = unique_id(&project.id, i, &mut seen);
            projects.push(project);
        }

        let meta = match root.get("meta") {
            Some(meta) if meta.is_object() => parse_meta(meta),
            _ => PageMeta::default(),
        };

        Self::new(projects, meta)
            .ok_or_else(|| FetchError::InvalidManifest("no usable projects".into()))
    }
}

/// Claim `id`, or the first free `{id}-{index}`, `{id}-{index}-2`, ... after it.
fn unique_id(id: &str, index: usize, seen: &mut HashSet<String>) -> String {
    if seen.insert(id.to_string()) {
        return id.to_string();
    }
    let base = format!("{id}-{index}");
    let mut candidate = base.clone();
    let mut n = 2;
    while !seen.insert(candidate.clone()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

fn non_empty_str(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_project(index: usize, entry: &Value) -> Project {
    Project {
        id: non_empty_str(entry, "id").unwrap_or_else(|| format!("p-{index}")),
        title: non_empty_str(entry, "title").unwrap_or_else(|| format!("Project {}", index + 1)),
        image: entry
            .get("image")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        href: non_empty_str(entry, "href"),
    }
}

fn parse_meta(meta: &Value) -> PageMeta {
    let mut parsed = PageMeta::default();

    if let Some(lines) = meta.get("titleLines").and_then(|v| v.as_array()) {
        for (slot, line) in parsed.title_lines.iter_mut().zip(lines) {
            if let Some(s) = line.as_str() {
                *slot = s.to_string();
            }
        }
    }

    if let Some(links) = meta.get("links").and_then(|v| v.as_array()) {
        parsed.links = links
            .iter()
            .filter_map(|l| {
                let label = l.get("label")?.as_str()?.to_string();
                Some(Link {
                    label,
                    href: non_empty_str(l, "href"),
                })
            })
            .collect();
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(v: Value) -> Result<Catalog, FetchError> {
        Catalog::parse(v.to_string().as_bytes())
    }

    #[test]
    fn fallback_has_single_project() {
        let catalog = Catalog::fallback();
        assert_eq!(catalog.projects().len(), 1);
        assert_eq!(catalog.projects()[0].id, "fallback-1");
        assert_eq!(catalog.first_title(), "Project");
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"<html>not found</html>",
            b"{}",
            br#"{"projects": []}"#,
            br#"{"projects": {"a": 1}}"#,
            br#"{"projects": [null]}"#,
        ];
        for body in bodies {
            assert!(
                Catalog::parse(body).is_err(),
                "expected rejection for {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn missing_fields_get_generated_defaults() {
        let catalog = parse_json(serde_json::json!({
            "projects": [
                {"image": "/a.png"},
                {"id": "", "title": "", "image": "/b.png", "href": ""},
                {"id": "named", "title": "Named", "image": "/c.png", "href": "https://x.test"}
            ]
        }))
        .unwrap();

        let p = catalog.projects();
        assert_eq!(p[0].id, "p-0");
        assert_eq!(p[0].title, "Project 1");
        assert_eq!(p[0].href, None);
        assert_eq!(p[1].id, "p-1");
        assert_eq!(p[1].title, "Project 2");
        assert_eq!(p[1].href, None);
        assert_eq!(p[2].id, "named");
        assert_eq!(p[2].href.as_deref(), Some("https://x.test"));
    }

    #[test]
    fn first_title_follows_manifest() {
        let catalog = parse_json(serde_json::json!({
            "projects": [{"title": "Alpha", "image": "/a.png"}, {"title": "Beta", "image": "/b.png"}]
        }))
        .unwrap();
        assert_eq!(catalog.first_title(), "Alpha");
    }

    #[test]
    fn non_object_entry_maps_with_defaults() {
        let catalog = parse_json(serde_json::json!({"projects": [42]})).unwrap();
        assert_eq!(catalog.projects()[0].id, "p-0");
        assert_eq!(catalog.projects()[0].title, "Project 1");
        assert_eq!(catalog.projects()[0].image, "");
    }

    #[test]
    fn duplicate_ids_made_unique() {
        let catalog = parse_json(serde_json::json!({
            "projects": [
                {"id": "same", "image": "/a.png"},
                {"id": "same", "image": "/b.png"}
            ]
        }))
        .unwrap();
        assert_eq!(catalog.projects()[0].id, "same");
        assert_eq!(catalog.projects()[1].id, "same-1");
    }

    #[test]
    fn suffixed_id_skips_ids_already_taken() {
        let catalog = parse_json(serde_json::json!({
            "projects": [{"id": "a-2"}, {"id": "a"}, {"id": "a"}, {"id": "a"}]
        }))
        .unwrap();
        let ids: Vec<&str> = catalog.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a-2", "a", "a-2-2", "a-3"]);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn meta_absent_keeps_defaults() {
        let catalog = parse_json(serde_json::json!({"projects": [{"image": "/a.png"}]})).unwrap();
        assert_eq!(catalog.meta, PageMeta::default());
    }

    #[test]
    fn meta_fields_fall_back_individually() {
        let catalog = parse_json(serde_json::json!({
            "projects": [{"image": "/a.png"}],
            "meta": {
                "titleLines": ["Jane Doe", 7],
                "links": [
                    {"label": "GitHub", "href": "https://github.com/jane"},
                    {"href": "https://no-label.test"},
                    {"label": "Mail"}
                ]
            }
        }))
        .unwrap();

        assert_eq!(catalog.meta.title_lines[0], "Jane Doe");
        assert_eq!(catalog.meta.title_lines[1], PLACEHOLDER_TITLE);
        assert_eq!(catalog.meta.links.len(), 2);
        assert_eq!(catalog.meta.links[0].label, "GitHub");
        assert_eq!(catalog.meta.links[1].href, None);
    }

    #[test]
    fn meta_with_wrong_types_uses_defaults() {
        let catalog = parse_json(serde_json::json!({
            "projects": [{"image": "/a.png"}],
            "meta": {"titleLines": "Jane", "links": {"label": "x"}}
        }))
        .unwrap();
        assert_eq!(catalog.meta, PageMeta::default());
    }

    #[test]
    fn placeholder_never_empty() {
        let meta = PageMeta {
            title_lines: ["Top".into(), String::new()],
            links: Vec::new(),
        };
        assert_eq!(meta.placeholder(), PLACEHOLDER_TITLE);
        assert_eq!(PageMeta::default().placeholder(), PLACEHOLDER_TITLE);
    }
}
