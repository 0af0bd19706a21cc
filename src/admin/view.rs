// ABOUTME: View state for the question list, built per request from store output
// ABOUTME: Holds the active filter and the display-ready cards; nothing is global

use qa_core::config::DisplayConfig;
use qa_core::utils::format_date;
use qa_core::{Filter, Question};

/// Card data for one question in the admin list
#[derive(Clone)]
pub struct QuestionCard {
    pub id: i64,
    pub category: String,
    pub date: String,
    pub question: String,
    pub author: String,
    pub status_class: &'static str,
}

impl QuestionCard {
    pub fn from_question(question: &Question, display: &DisplayConfig) -> Self {
        Self {
            id: question.id,
            category: question.category.clone(),
            date: format_date(question.date, display.tz(), display.buddhist_era),
            question: question.question.clone(),
            author: question.name.clone(),
            status_class: if question.is_answered() {
                "status-dot--answered"
            } else {
                "status-dot--pending"
            },
        }
    }
}

/// One filter button in the toolbar
#[derive(Clone)]
pub struct FilterButton {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Everything the list partial needs: the active filter and the cards that pass it
#[derive(Clone)]
pub struct ListView {
    pub filter: Filter,
    pub cards: Vec<QuestionCard>,
}

impl ListView {
    pub fn build(questions: Vec<Question>, filter: Filter, display: &DisplayConfig) -> Self {
        let cards = filter
            .apply(questions)
            .iter()
            .map(|q| QuestionCard::from_question(q, display))
            .collect();
        Self { filter, cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn filter_value(&self) -> &'static str {
        self.filter.as_str()
    }

    pub fn filter_buttons(&self) -> Vec<FilterButton> {
        Filter::ALL
            .iter()
            .map(|f| FilterButton {
                value: f.as_str(),
                label: match f {
                    Filter::All => "All",
                    Filter::Pending => "Pending",
                    Filter::Answered => "Answered",
                },
                active: *f == self.filter,
            })
            .collect()
    }
}
