//! Upstream message requests built from a [`NewsRequest`].
//!
//! The prompt text is static configuration: only the interpolated fields and
//! the shape of the expected answer matter to the rest of the engine.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{catalog, models::news_item::NewsItem, requests::NewsRequest};

/// How many stock hints from the catalog go into a bulk prompt.
pub const STOCK_HINTS: usize = 6;
/// How many keyword hints from the catalog go into a bulk prompt.
pub const KEYWORD_HINTS: usize = 5;
/// Items the backend is asked to generate per sector.
pub const ITEMS_PER_SECTOR: usize = 3;

const INSIGHT_SYSTEM: &str = "You are a senior Indian equity research analyst at a top-tier institution. \
You provide hyper-specific, actionable insights for intraday traders, swing traders, long-term investors and institutional portfolio managers.

Use Indian market terminology: NSE/BSE, Nifty/BankNifty/Sensex, F&O, circuit limits, bulk and block deals, SEBI, FII/DII, promoter holding, delivery %, open interest.

Structure EVERY response exactly as:

📌 MARKET IMPACT
[2-3 sentences on immediate and medium-term market impact with specific index/sector movements expected]

🎯 TRADE IDEAS
• Intraday: [specific trade with entry zone, target, stop-loss in ₹]
• Swing (1-4 weeks): [specific stock/index with levels in ₹]
• Long-term (6-12 months): [investment thesis with CMP and price target in ₹]

📊 KEY LEVELS TO WATCH
[2-3 critical support/resistance levels for main affected stocks/indices]

⚠️ RISKS
[2-3 specific risks that could invalidate this thesis]

🏦 INSTITUTIONAL VIEW
[What FIIs, DIIs, or large operators are likely positioning for]

⏰ TIME SENSITIVITY
[How quickly this needs to be acted on: immediate/today/this week/medium-term]";

/// Model and token budgets applied to every upstream request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptOptions {
    pub model: String,
    pub news_max_tokens: u32,
    pub insight_max_tokens: u32,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            model: "claude-opus-4-6".to_string(),
            news_max_tokens: 1000,
            insight_max_tokens: 1200,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Body of an upstream messages API call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
}

impl MessagesRequest {
    /// Text of the single user turn.
    pub fn user_prompt(&self) -> &str {
        self.messages.first().map(|m| m.content.as_str()).unwrap_or_default()
    }
}

/// Builds the upstream request for `request`. `now` seeds the example ids in
/// bulk prompts.
pub fn build_messages_request(
    request: &NewsRequest,
    options: &PromptOptions,
    now: DateTime<Utc>,
) -> MessagesRequest {
    match request {
        NewsRequest::Sector(sector) => MessagesRequest {
            model: options.model.clone(),
            max_tokens: options.news_max_tokens,
            system: None,
            messages: vec![user(bulk_prompt(sector, now))],
        },
        NewsRequest::Insight(item) => MessagesRequest {
            model: options.model.clone(),
            max_tokens: options.insight_max_tokens,
            system: Some(INSIGHT_SYSTEM.to_string()),
            messages: vec![user(insight_prompt(item))],
        },
    }
}

fn user(content: String) -> Message {
    Message {
        role: "user".to_string(),
        content,
    }
}

fn bulk_prompt(sector: &str, now: DateTime<Utc>) -> String {
    let meta = catalog::lookup(sector);
    let stocks = meta.stocks.iter().take(STOCK_HINTS).copied().collect::<Vec<_>>().join(", ");
    let keywords = meta.keywords.iter().take(KEYWORD_HINTS).copied().collect::<Vec<_>>().join(", ");
    let stamp = now.timestamp_millis();

    format!(
        r#"You are a live Indian stock market news aggregator. Generate {ITEMS_PER_SECTOR} REALISTIC, CURRENT news items for the "{sector}" sector that would appear on Economic Times, Moneycontrol, Mint, Business Standard, Reuters, or Bloomberg today.

Focus on stocks: {stocks}
Keywords: {keywords}

Return ONLY a valid JSON array (absolutely no markdown fences, no explanation, just raw JSON):
[
  {{
    "id": "live_{stamp}_1",
    "title": "Specific headline with real numbers/percentages",
    "source": "Economic Times",
    "sourceId": "et",
    "time": "Just now",
    "sector": "{sector}",
    "sentiment": "bullish",
    "urgency": "high",
    "summary": "2-3 detailed sentences with specific figures, analyst names, market context, and quantified impact",
    "tickers": ["TICKER1", "TICKER2", "TICKER3"],
    "impact": "High"
  }},
  {{
    "id": "live_{stamp}_2",
    ...
  }},
  {{
    "id": "live_{stamp}_3",
    ...
  }}
]

Rules:
- sourceId must be one of: et, mint, mc, bs, ndtv, reuters, bloomberg, nse, bse, social
- sentiment must be: bullish, bearish, or neutral
- urgency must be: breaking, high, or normal
- impact must be: High, Medium, or Low
- tickers must be real NSE-listed symbols
- Make each news item genuinely different in nature (e.g. earnings + regulatory + macro)"#
    )
}

fn insight_prompt(item: &NewsItem) -> String {
    format!(
        r#"NEWS: "{title}"
SUMMARY: {summary}
SECTOR: {sector}
AFFECTED TICKERS: {tickers}
SENTIMENT: {sentiment}
SOURCE: {source}
URGENCY: {urgency}

Generate a precise, actionable trading insight with real price levels and specific strategies for Indian market participants."#,
        title = item.title,
        summary = item.summary,
        sector = item.sector,
        tickers = item.tickers.join(", "),
        sentiment = item.sentiment.as_str().to_uppercase(),
        source = item.source,
        urgency = item.urgency.as_str().to_uppercase(),
    )
}
