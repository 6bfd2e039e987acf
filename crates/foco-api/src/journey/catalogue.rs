use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicLevel {
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub name: &'static str,
    /// Approximate share of the area's questions on the exam
    pub percentage: u8,
    pub level: TopicLevel,
    /// Points earned when the topic is done
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Area {
    pub name: &'static str,
    pub color: &'static str,
    /// Score scale of the area
    pub total_weight: u32,
    pub topics: &'static [Topic],
}

impl Area {
    pub fn topic(&self, name: &str) -> Option<&'static Topic> {
        self.topics.iter().find(|t| t.name == name)
    }
}

const fn topic(name: &'static str, percentage: u8, level: TopicLevel, weight: u32) -> Topic {
    Topic {
        name,
        percentage,
        level,
        weight,
    }
}

use TopicLevel::{Advanced, Basic, Intermediate};

pub static CATALOGUE: [Area; 4] = [
    Area {
        name: "Matemática",
        color: "#3B82F6",
        total_weight: 45,
        topics: &[
            topic("Funções", 15, Intermediate, 3),
            topic("Geometria", 12, Intermediate, 3),
            topic("Aritmética", 10, Basic, 2),
            topic("Estatística", 8, Basic, 2),
            topic("Probabilidade", 6, Advanced, 4),
            topic("Trigonometria", 5, Advanced, 4),
            topic("Progressões", 4, Intermediate, 3),
            topic("Logaritmos", 3, Advanced, 4),
            topic("Matrizes", 2, Advanced, 4),
        ],
    },
    Area {
        name: "Linguagens",
        color: "#EF4444",
        total_weight: 45,
        topics: &[
            topic("Interpretação de Texto", 25, Basic, 2),
            topic("Literatura Brasileira", 15, Intermediate, 3),
            topic("Gramática", 12, Basic, 2),
            topic("Redação", 20, Intermediate, 3),
            topic("Figuras de Linguagem", 8, Basic, 2),
            topic("Inglês/Espanhol", 10, Intermediate, 3),
            topic("Semântica", 5, Intermediate, 3),
            topic("Variação Linguística", 5, Basic, 2),
        ],
    },
    Area {
        name: "Ciências Humanas",
        color: "#10B981",
        total_weight: 45,
        topics: &[
            topic("História do Brasil", 20, Basic, 2),
            topic("Geografia", 18, Basic, 2),
            topic("Sociologia", 12, Intermediate, 3),
            topic("Filosofia", 10, Advanced, 4),
            topic("História Geral", 15, Intermediate, 3),
            topic("Atualidades", 8, Basic, 2),
            topic("Geopolítica", 7, Intermediate, 3),
            topic("Movimentos Sociais", 5, Intermediate, 3),
            topic("Direitos Humanos", 5, Basic, 2),
        ],
    },
    Area {
        name: "Ciências da Natureza",
        color: "#8B5CF6",
        total_weight: 45,
        topics: &[
            topic("Química Orgânica", 18, Advanced, 4),
            topic("Física Mecânica", 15, Intermediate, 3),
            topic("Biologia Geral", 12, Basic, 2),
            topic("Ecologia", 10, Basic, 2),
            topic("Genética", 8, Intermediate, 3),
            topic("Termodinâmica", 7, Advanced, 4),
            topic("Eletromagnetismo", 6, Advanced, 4),
            topic("Química Geral", 12, Intermediate, 3),
            topic("Citologia", 6, Basic, 2),
            topic("Fisiologia", 6, Intermediate, 3),
        ],
    },
];

pub fn find_area(name: &str) -> Option<&'static Area> {
    CATALOGUE.iter().find(|a| a.name == name)
}

pub fn total_topics() -> usize {
    CATALOGUE.iter().map(|a| a.topics.len()).sum()
}

/// Sum of every area's score scale.
pub fn max_score() -> u32 {
    CATALOGUE.iter().map(|a| a.total_weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_shape() {
        assert_eq!(CATALOGUE.len(), 4);
        assert_eq!(total_topics(), 36);
        assert_eq!(max_score(), 180);
    }

    #[test]
    fn test_topic_names_are_unique_per_area() {
        for area in &CATALOGUE {
            let names: HashSet<_> = area.topics.iter().map(|t| t.name).collect();
            assert_eq!(names.len(), area.topics.len(), "{}", area.name);
        }
    }

    #[test]
    fn test_weights_follow_level() {
        for topic in CATALOGUE.iter().flat_map(|a| a.topics) {
            let expected = match topic.level {
                Basic => 2,
                Intermediate => 3,
                Advanced => 4,
            };
            assert_eq!(topic.weight, expected, "{}", topic.name);
        }
    }

    #[test]
    fn test_lookup() {
        let area = find_area("Matemática").unwrap();
        assert_eq!(area.topic("Logaritmos").unwrap().weight, 4);
        assert!(area.topic("Redação").is_none());
        assert!(find_area("Matematica").is_none());
    }
}
