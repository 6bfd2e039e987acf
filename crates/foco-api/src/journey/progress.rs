use std::collections::HashMap;

use foco_db::models::{JourneyProgress, JourneyStatus};
use serde::Serialize;

use super::catalogue::{Area, CATALOGUE, TopicLevel, max_score, total_topics};
use crate::analytics::percent;

/// The student's recorded statuses. Topics never touched are `todo`.
#[derive(Debug, Default)]
pub struct StatusBook {
    statuses: HashMap<(String, String), JourneyStatus>,
}

impl StatusBook {
    pub fn new(progress: Vec<JourneyProgress>) -> Self {
        let statuses = progress
            .into_iter()
            .map(|p| ((p.area, p.topic), p.status))
            .collect();
        Self { statuses }
    }

    pub fn status_of(&self, area: &str, topic: &str) -> JourneyStatus {
        self.statuses
            .get(&(area.to_string(), topic.to_string()))
            .copied()
            .unwrap_or(JourneyStatus::Todo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicView {
    pub name: &'static str,
    pub percentage: u8,
    pub level: TopicLevel,
    pub weight: u32,
    pub status: JourneyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaProgress {
    pub area: &'static str,
    pub color: &'static str,
    pub total_topics: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub progress_percent: u32,
    /// First topic in progress, else the first one still to do
    pub current_topic: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneySummary {
    pub total_topics: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overall_percent: u32,
    /// Sum of the weights of completed topics
    pub score: u32,
    pub max_score: u32,
    pub score_percent: u32,
    pub areas: Vec<AreaProgress>,
}

/// Topics of one area with their status, optionally narrowed by level and status.
pub fn area_topics(
    area: &Area,
    book: &StatusBook,
    level: Option<TopicLevel>,
    status: Option<JourneyStatus>,
) -> Vec<TopicView> {
    area.topics
        .iter()
        .map(|topic| TopicView {
            name: topic.name,
            percentage: topic.percentage,
            level: topic.level,
            weight: topic.weight,
            status: book.status_of(area.name, topic.name),
        })
        .filter(|view| level.is_none_or(|l| view.level == l))
        .filter(|view| status.is_none_or(|s| view.status == s))
        .collect()
}

pub fn area_progress(area: &Area, book: &StatusBook) -> AreaProgress {
    let statuses: Vec<_> = area
        .topics
        .iter()
        .map(|t| (t.name, book.status_of(area.name, t.name)))
        .collect();

    let count = |wanted: JourneyStatus| statuses.iter().filter(|(_, s)| *s == wanted).count();
    let completed = count(JourneyStatus::Done);

    let first_with = |wanted: JourneyStatus| {
        statuses
            .iter()
            .find(|(_, s)| *s == wanted)
            .map(|(name, _)| *name)
    };
    let current_topic =
        first_with(JourneyStatus::InProgress).or_else(|| first_with(JourneyStatus::Todo));

    AreaProgress {
        area: area.name,
        color: area.color,
        total_topics: statuses.len(),
        completed,
        in_progress: count(JourneyStatus::InProgress),
        progress_percent: percent(completed, statuses.len()),
        current_topic,
    }
}

pub fn summarize(book: &StatusBook) -> JourneySummary {
    let areas: Vec<AreaProgress> = CATALOGUE.iter().map(|a| area_progress(a, book)).collect();

    let score: u32 = CATALOGUE
        .iter()
        .flat_map(|area| area.topics.iter().map(move |topic| (area, topic)))
        .filter(|(area, topic)| book.status_of(area.name, topic.name) == JourneyStatus::Done)
        .map(|(_, topic)| topic.weight)
        .sum();

    let total_topics = total_topics();
    let completed = areas.iter().map(|a| a.completed).sum();
    let max_score = max_score();

    JourneySummary {
        total_topics,
        completed,
        in_progress: areas.iter().map(|a| a.in_progress).sum(),
        overall_percent: percent(completed, total_topics),
        score,
        max_score,
        score_percent: percent(score as usize, max_score as usize),
        areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::catalogue::find_area;
    use chrono::Utc;

    fn entry(area: &str, topic: &str, status: JourneyStatus) -> JourneyProgress {
        JourneyProgress {
            area: area.to_string(),
            topic: topic.to_string(),
            status,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_untouched_journey() {
        let summary = summarize(&StatusBook::default());

        assert_eq!(summary.total_topics, 36);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.overall_percent, 0);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.max_score, 180);
        assert_eq!(summary.areas[0].current_topic, Some("Funções"));
    }

    #[test]
    fn test_score_sums_completed_weights() {
        let book = StatusBook::new(vec![
            entry("Matemática", "Funções", JourneyStatus::Done),
            entry("Matemática", "Logaritmos", JourneyStatus::Done),
            entry("Linguagens", "Gramática", JourneyStatus::Done),
            entry("Linguagens", "Redação", JourneyStatus::InProgress),
        ]);

        let summary = summarize(&book);

        assert_eq!(summary.completed, 3);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.score, 3 + 4 + 2);
        assert_eq!(summary.score_percent, 5); // 9 / 180
        assert_eq!(summary.overall_percent, 8); // 3 / 36 = 8.33

        let math = &summary.areas[0];
        assert_eq!(math.completed, 2);
        assert_eq!(math.progress_percent, 22); // 2 / 9
        assert_eq!(math.current_topic, Some("Geometria"));

        let languages = &summary.areas[1];
        assert_eq!(languages.current_topic, Some("Redação"));
    }

    #[test]
    fn test_current_topic_none_when_area_done() {
        let area = find_area("Linguagens").unwrap();
        let book = StatusBook::new(
            area.topics
                .iter()
                .map(|t| entry(area.name, t.name, JourneyStatus::Done))
                .collect(),
        );

        let progress = area_progress(area, &book);
        assert_eq!(progress.progress_percent, 100);
        assert_eq!(progress.current_topic, None);
    }

    #[test]
    fn test_area_topics_filters() {
        let area = find_area("Matemática").unwrap();
        let book = StatusBook::new(vec![entry("Matemática", "Probabilidade", JourneyStatus::Done)]);

        let advanced = area_topics(area, &book, Some(TopicLevel::Advanced), None);
        assert_eq!(advanced.len(), 4);

        let advanced_done = area_topics(
            area,
            &book,
            Some(TopicLevel::Advanced),
            Some(JourneyStatus::Done),
        );
        assert_eq!(advanced_done.len(), 1);
        assert_eq!(advanced_done[0].name, "Probabilidade");

        let all = area_topics(area, &book, None, None);
        assert_eq!(all.len(), 9);
        assert_eq!(all[0].status, JourneyStatus::Todo);
    }
}
