//! Tag filter over the project grid.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::constants::*;
use crate::document::{Document, ElementId};
use crate::error::{CarouselError, Result};
use crate::event::PageEvent;
use crate::page::Component;
use crate::scheduler::Scheduler;

pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterTask {
    FadeIn(ElementId),
    Collapse(ElementId),
}

struct Project {
    card: ElementId,
    tags: Vec<String>,
}

pub struct ProjectFilter {
    projects: Vec<Project>,
    buttons: Vec<ElementId>,
    active_filter: String,
    scheduler: Scheduler<FilterTask>,
    /// Which way each card is currently heading, so stale deferred steps are skipped.
    showing: Vec<bool>,
}

impl ProjectFilter {
    pub fn mount(doc: &mut Document, now_ms: u64) -> Result<Self> {
        doc.query(&["projects-grid"])
            .ok_or_else(|| CarouselError::missing(".projects-grid"))?;

        let projects: Vec<Project> = doc
            .query_all(&["project-card"])
            .into_iter()
            .map(|card| Project {
                card,
                tags: doc
                    .children_with_class(card, "tag")
                    .into_iter()
                    .map(|tag| doc.element(tag).text.clone())
                    .collect(),
            })
            .collect();

        let mut filter = Self {
            showing: vec![true; projects.len()],
            projects,
            buttons: doc.query_all(&["filter-btn"]),
            active_filter: ALL.to_string(),
            scheduler: Scheduler::new(),
        };
        filter.apply(doc, ALL, now_ms);

        info!(
            projects = filter.projects.len(),
            filters = filter.buttons.len(),
            "project filter mounted"
        );
        Ok(filter)
    }

    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    /// Sorted, deduplicated tag texts across every project.
    pub fn unique_tags(&self) -> Vec<String> {
        self.projects
            .iter()
            .flat_map(|p| p.tags.iter().map(|t| t.trim().to_string()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn matches(tags: &[String], filter: &str) -> bool {
        if filter == ALL {
            return true;
        }
        let needle = filter.to_lowercase();
        tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    pub fn apply(&mut self, doc: &mut Document, filter: &str, now_ms: u64) {
        self.set_active_button(doc, filter);

        for (i, project) in self.projects.iter().enumerate() {
            let show = Self::matches(&project.tags, filter);
            self.showing[i] = show;
            let card = doc.element_mut(project.card);
            if show {
                card.hidden = false;
                card.opacity = 0.0;
                self.scheduler
                    .schedule_once(now_ms, FILTER_FADE_IN_DELAY_MS, FilterTask::FadeIn(project.card));
            } else {
                card.opacity = 0.0;
                self.scheduler
                    .schedule_once(now_ms, FILTER_HIDE_DELAY_MS, FilterTask::Collapse(project.card));
            }
        }
        debug!(filter, "projects filtered");
    }

    fn set_active_button(&mut self, doc: &mut Document, filter: &str) {
        for button in &self.buttons {
            let on = doc.element(*button).attr("data-filter") == Some(filter);
            doc.toggle_class(*button, ACTIVE, on);
        }
        self.active_filter = filter.to_string();
    }

    fn is_showing(&self, card: ElementId) -> bool {
        self.projects
            .iter()
            .position(|p| p.card == card)
            .is_some_and(|i| self.showing[i])
    }
}

impl Component for ProjectFilter {
    fn name(&self) -> &'static str {
        "project-filter"
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64) {
        if let PageEvent::Click(target) = *event {
            if !self.buttons.contains(&target) {
                return;
            }
            if let Some(filter) = doc.element(target).attr("data-filter").map(str::to_string) {
                self.apply(doc, &filter, now_ms);
            }
        }
    }

    fn tick(&mut self, doc: &mut Document, now_ms: u64) {
        while let Some(task) = self.scheduler.pop_due(now_ms) {
            match task {
                FilterTask::FadeIn(card) if self.is_showing(card) => {
                    doc.element_mut(card).opacity = 1.0;
                }
                FilterTask::Collapse(card) if !self.is_showing(card) => {
                    doc.element_mut(card).hidden = true;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarouselConfig, ProjectConfig};
    use crate::layout;
    use pretty_assertions::assert_eq;

    fn setup() -> (Document, ProjectFilter) {
        let config = CarouselConfig {
            projects: vec![
                ProjectConfig {
                    title: "Site".to_string(),
                    tags: vec!["Web".to_string(), "Design".to_string()],
                },
                ProjectConfig {
                    title: "Logger".to_string(),
                    tags: vec!["Embedded Rust".to_string()],
                },
                ProjectConfig {
                    title: "Wall".to_string(),
                    tags: vec!["Rust".to_string(), " Graphics ".to_string()],
                },
            ],
            ..CarouselConfig::default()
        };
        let mut doc = layout::build_document(&[], &config, 1280.0, 800.0);
        let mut filter = ProjectFilter::mount(&mut doc, 0).unwrap();
        filter.tick(&mut doc, 50);
        (doc, filter)
    }

    fn visible_titles(doc: &Document) -> Vec<String> {
        doc.query_all(&["project-card"])
            .into_iter()
            .filter(|c| !doc.element(*c).hidden)
            .map(|c| doc.element(c).text.clone())
            .collect()
    }

    fn button(doc: &Document, filter: &str) -> ElementId {
        doc.query_all(&["filter-btn"])
            .into_iter()
            .find(|b| doc.element(*b).attr("data-filter") == Some(filter))
            .unwrap()
    }

    #[test]
    fn starts_with_everything_visible() {
        let (doc, filter) = setup();
        assert_eq!(filter.active_filter(), "all");
        assert_eq!(visible_titles(&doc), vec!["Site", "Logger", "Wall"]);
        assert!(doc.has_class(button(&doc, "all"), ACTIVE));
    }

    #[test]
    fn filter_matches_substrings_case_insensitively() {
        let (mut doc, mut filter) = setup();
        let rust = button(&doc, "rust");

        filter.handle_event(&mut doc, &PageEvent::Click(rust), 100);
        filter.tick(&mut doc, 150);
        let site = doc.query(&["project-card"]).unwrap();
        assert!(!doc.element(site).hidden);
        assert_eq!(doc.element(site).opacity, 0.0);

        filter.tick(&mut doc, 400);
        assert_eq!(visible_titles(&doc), vec!["Logger", "Wall"]);
        assert!(doc.has_class(rust, ACTIVE));
        assert!(!doc.has_class(button(&doc, "all"), ACTIVE));
    }

    #[test]
    fn quick_refilter_cancels_a_pending_collapse() {
        let (mut doc, mut filter) = setup();

        let design = button(&doc, "design");
        let all = button(&doc, "all");
        filter.handle_event(&mut doc, &PageEvent::Click(design), 100);
        filter.handle_event(&mut doc, &PageEvent::Click(all), 200);
        filter.tick(&mut doc, 1000);

        assert_eq!(visible_titles(&doc), vec!["Site", "Logger", "Wall"]);
        assert!(doc
            .query_all(&["project-card"])
            .iter()
            .all(|c| doc.element(*c).opacity == 1.0));
    }

    #[test]
    fn unique_tags_are_trimmed_and_sorted() {
        let (_, filter) = setup();
        assert_eq!(
            filter.unique_tags(),
            vec!["Design", "Embedded Rust", "Graphics", "Rust", "Web"]
        );
    }

    #[test]
    fn needs_a_grid() {
        let mut doc = Document::new(800.0, 600.0);
        assert_eq!(
            ProjectFilter::mount(&mut doc, 0).err(),
            Some(CarouselError::missing(".projects-grid"))
        );
    }
}
