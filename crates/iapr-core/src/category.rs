//! Spending categories for purchased apps.
//!
//! The live catalog lookup sits behind [`CategoryResolver`] outside this
//! crate; [`KeywordResolver`] classifies from the app name alone.

use serde::{Deserialize, Serialize};

/// Spending category shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "게임")]
    Game,
    #[serde(rename = "생산성")]
    Productivity,
    #[serde(rename = "엔터")]
    Entertainment,
    #[serde(rename = "건강")]
    Health,
    #[serde(rename = "기타")]
    Other,
}

/// Matched in this order; the first hit wins.
const NAME_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Game,
        &["game", "games", "게임", "play", "quest", "clash", "puzzle", "plus"],
    ),
    (
        Category::Productivity,
        &["task", "notes", "office", "work", "manager", "editor", "study"],
    ),
    (
        Category::Entertainment,
        &["music", "video", "photo", "player", "stream", "media"],
    ),
    (
        Category::Health,
        &["fitness", "health", "workout", "tracker", "diet"],
    ),
];

const GENRE_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Game,
        &[
            "games", "action", "rpg", "arcade", "adventure", "strategy", "simulation", "puzzle",
            "board", "card", "casino", "casual", "racing", "sports", "trivia", "word", "게임",
            "액션", "롤플레잉", "아케이드", "어드벤처", "전략", "시뮬레이션", "퍼즐", "보드",
            "카드", "카지노", "캐주얼", "레이싱", "스포츠",
        ],
    ),
    (
        Category::Productivity,
        &[
            "productivity", "utilities", "business", "education", "reference", "finance",
            "news", "navigation", "books", "magazines", "생산성", "유틸리티", "비즈니스", "교육",
            "참고", "금융", "뉴스", "내비게이션", "도서",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "music", "entertainment", "photo", "video", "social", "lifestyle", "travel", "food",
            "drink", "shopping", "음악", "엔터테인먼트", "사진", "비디오", "소셜",
            "라이프스타일", "여행", "음식",
        ],
    ),
    (
        Category::Health,
        &["health", "fitness", "medical", "sports", "건강", "피트니스", "의료"],
    ),
];

fn match_keywords(table: &[(Category, &[&str])], text: &str) -> Category {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

impl Category {
    /// Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Game => "게임",
            Self::Productivity => "생산성",
            Self::Entertainment => "엔터",
            Self::Health => "건강",
            Self::Other => "기타",
        }
    }

    /// Guess the category from keywords in an app name.
    pub fn from_app_name(name: &str) -> Self {
        match_keywords(NAME_KEYWORDS, name)
    }

    /// Map a store catalog genre name (English or Korean).
    pub fn from_genre(genre: &str) -> Self {
        match_keywords(GENRE_KEYWORDS, genre)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Assigns a category to an app name.
pub trait CategoryResolver {
    fn resolve(&self, app_name: &str) -> Category;
}

/// Name-keyword resolver; needs no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResolver;

impl CategoryResolver for KeywordResolver {
    fn resolve(&self, app_name: &str) -> Category {
        if app_name.is_empty() {
            return Category::Other;
        }
        Category::from_app_name(app_name)
    }
}
