//! Widget set for the dashboard grid.
//!
//! Every layout entry names a widget by id. A widget is either a static
//! [`StaticCard`], a registered chart, or an [`UnsupportedChart`] placeholder
//! for a configured chart whose type could not be parsed. [`WidgetSet`]
//! resolves ids to a borrowed [`Widget`] for rendering.

use crate::charts::{ChartDefinition, ChartRegistry};
use serde::{Deserialize, Serialize};

/// Content of a static card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardBody {
    /// Plain lines of text.
    Text {
        /// Lines in order.
        lines: Vec<String>,
    },
    /// Bulleted or numbered items.
    List {
        /// Number the items instead of bulleting them.
        #[serde(default)]
        ordered: bool,
        /// Items in order.
        items: Vec<String>,
    },
    /// Row of button labels.
    Actions {
        /// Labels in order.
        labels: Vec<String>,
    },
}

impl CardBody {
    /// Lines to draw inside the card.
    pub fn lines(&self) -> Vec<String> {
        match self {
            CardBody::Text { lines } => lines.clone(),
            CardBody::List { ordered, items } => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if *ordered {
                        format!("{}. {item}", i + 1)
                    } else {
                        format!("• {item}")
                    }
                })
                .collect(),
            CardBody::Actions { labels } => {
                vec![labels
                    .iter()
                    .map(|l| format!("[{l}]"))
                    .collect::<Vec<_>>()
                    .join(" ")]
            }
        }
    }
}

/// A card whose content never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCard {
    /// Layout id.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Content.
    pub body: CardBody,
}

impl StaticCard {
    /// Creates a card.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: CardBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
        }
    }
}

/// Placeholder for a configured chart with an unknown type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedChart {
    /// Layout id.
    pub id: String,
    /// Title from configuration.
    pub title: String,
    /// The type name that failed to parse.
    pub type_name: String,
}

/// A resolved widget, borrowed from the [`WidgetSet`] or chart registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget<'a> {
    /// Static card.
    Card(&'a StaticCard),
    /// Registered chart.
    Chart(&'a ChartDefinition),
    /// Unsupported chart placeholder.
    Unsupported(&'a UnsupportedChart),
}

impl Widget<'_> {
    /// Title drawn on the card border.
    pub fn title(&self) -> &str {
        match self {
            Widget::Card(card) => &card.title,
            Widget::Chart(chart) => &chart.title,
            Widget::Unsupported(chart) => &chart.title,
        }
    }
}

/// Static cards and unsupported-chart placeholders, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct WidgetSet {
    cards: Vec<StaticCard>,
    unsupported: Vec<UnsupportedChart>,
}

impl WidgetSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a static card. Returns `false` if the id is already used.
    pub fn add_card(&mut self, card: StaticCard) -> bool {
        if self.contains(&card.id) {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Adds an unsupported-chart placeholder. Returns `false` if the id is
    /// already used.
    pub fn add_unsupported(&mut self, chart: UnsupportedChart) -> bool {
        if self.contains(&chart.id) {
            return false;
        }
        self.unsupported.push(chart);
        true
    }

    /// Static cards in insertion order.
    pub fn cards(&self) -> &[StaticCard] {
        &self.cards
    }

    /// Unsupported placeholders in insertion order.
    pub fn unsupported(&self) -> &[UnsupportedChart] {
        &self.unsupported
    }

    /// Ids owned by this set.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.cards
            .iter()
            .map(|c| c.id.as_str())
            .chain(self.unsupported.iter().map(|c| c.id.as_str()))
    }

    /// Returns `true` if a card or placeholder has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.ids().any(|owned| owned == id)
    }

    /// Resolves an id against this set and then the chart registry.
    pub fn resolve<'a>(&'a self, charts: &'a ChartRegistry, id: &str) -> Option<Widget<'a>> {
        if let Some(card) = self.cards.iter().find(|c| c.id == id) {
            return Some(Widget::Card(card));
        }
        if let Some(chart) = self.unsupported.iter().find(|c| c.id == id) {
            return Some(Widget::Unsupported(chart));
        }
        charts.get(id).map(Widget::Chart)
    }
}

/// The five KPI cards shown on a fresh dashboard.
pub fn seeded_cards() -> Vec<StaticCard> {
    let text = |lines: &[&str]| CardBody::Text {
        lines: lines.iter().map(|s| s.to_string()).collect(),
    };
    vec![
        StaticCard::new(
            "a",
            "Sales Overview",
            text(&["Total Sales: $10,000", "[View Details]"]),
        ),
        StaticCard::new(
            "b",
            "User Activity",
            text(&["Active Users: 1,234", "[View Report]"]),
        ),
        StaticCard::new(
            "c",
            "Recent Orders",
            CardBody::List {
                ordered: false,
                items: vec!["Order #1234".to_string(), "Order #5678".to_string()],
            },
        ),
        StaticCard::new(
            "d",
            "Top Products",
            CardBody::List {
                ordered: true,
                items: vec![
                    "Product A".to_string(),
                    "Product B".to_string(),
                    "Product C".to_string(),
                ],
            },
        ),
        StaticCard::new(
            "e",
            "Quick Actions",
            CardBody::Actions {
                labels: vec!["Add Product".to_string(), "Generate Report".to_string()],
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{AxisTitles, ChartKind, DataPoint, NewChart};

    #[test]
    fn test_seeded_cards_have_unique_ids() {
        let mut set = WidgetSet::new();
        for card in seeded_cards() {
            assert!(set.add_card(card));
        }
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_duplicate_ids_are_refused() {
        let mut set = WidgetSet::new();
        assert!(set.add_card(StaticCard::new("a", "One", CardBody::Text { lines: vec![] })));
        assert!(!set.add_card(StaticCard::new("a", "Two", CardBody::Text { lines: vec![] })));
        assert!(!set.add_unsupported(UnsupportedChart {
            id: "a".to_string(),
            title: "x".to_string(),
            type_name: "scatter".to_string(),
        }));
        assert_eq!(set.cards()[0].title, "One");
    }

    #[test]
    fn test_list_body_lines() {
        let ordered = CardBody::List {
            ordered: true,
            items: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(ordered.lines(), vec!["1. A", "2. B"]);
        let bullets = CardBody::List {
            ordered: false,
            items: vec!["A".to_string()],
        };
        assert_eq!(bullets.lines(), vec!["• A"]);
    }

    #[test]
    fn test_actions_render_as_buttons() {
        let body = CardBody::Actions {
            labels: vec!["Add Product".to_string(), "Generate Report".to_string()],
        };
        assert_eq!(body.lines(), vec!["[Add Product] [Generate Report]"]);
    }

    #[test]
    fn test_resolve_prefers_cards_then_charts() {
        let mut set = WidgetSet::new();
        set.add_card(StaticCard::new("a", "Card", CardBody::Text { lines: vec![] }));
        set.add_unsupported(UnsupportedChart {
            id: "z".to_string(),
            title: "Odd".to_string(),
            type_name: "radar".to_string(),
        });
        let mut charts = ChartRegistry::new();
        let id = charts.add_chart(NewChart {
            kind: ChartKind::Bar,
            data_source: "sales".to_string(),
            axis_titles: AxisTitles::default(),
            points: vec![DataPoint::new("Jan", "1")],
        });

        assert!(matches!(set.resolve(&charts, "a"), Some(Widget::Card(_))));
        assert!(matches!(set.resolve(&charts, "z"), Some(Widget::Unsupported(_))));
        let chart = set.resolve(&charts, id.as_str()).expect("chart");
        assert_eq!(chart.title(), "Sales Bar Chart");
        assert!(set.resolve(&charts, "missing").is_none());
    }

    #[test]
    fn test_card_body_toml_shape() {
        let card: StaticCard = toml::from_str(
            r#"
id = "k"
title = "Inventory"
[body]
kind = "list"
items = ["Bolts", "Nuts"]
"#,
        )
        .expect("card parses");
        assert_eq!(
            card.body,
            CardBody::List {
                ordered: false,
                items: vec!["Bolts".to_string(), "Nuts".to_string()]
            }
        );
    }
}
