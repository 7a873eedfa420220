//! Stories the feed starts with before the first refresh cycle completes.

use chrono::{DateTime, Duration, Utc};

use crate::models::news_item::{Impact, NewsItem, Sentiment, SourceId, Urgency};

struct Seed {
    id: &'static str,
    title: &'static str,
    source_id: SourceId,
    time: &'static str,
    age_ms: i64,
    sector: &'static str,
    sentiment: Sentiment,
    urgency: Urgency,
    summary: &'static str,
    tickers: &'static [&'static str],
    impact: Impact,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "s1",
        title: "RBI MPC Shifts Stance to 'Neutral' — Rate Cut Cycle Could Begin in April",
        source_id: SourceId::Et,
        time: "Just now",
        age_ms: 0,
        sector: "Banking & Finance",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::Breaking,
        summary: "RBI MPC voted 4-2 to hold the benchmark repo rate at 6.5% while shifting policy stance from 'withdrawal of accommodation' to 'neutral'. Governor signals data-dependent approach as food inflation eases.",
        tickers: &["BANKNIFTY", "HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK"],
        impact: Impact::High,
    },
    Seed {
        id: "s2",
        title: "Reliance Industries Q3 FY26: Net Profit ₹21,930 Cr — Jio ARPU Crosses ₹200",
        source_id: SourceId::Mint,
        time: "14 min ago",
        age_ms: 840_000,
        sector: "Oil & Gas",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::High,
        summary: "RIL Q3 FY26 results beat street estimates. Jio revenue up 18% YoY driven by tariff hike impact. Retail EBITDA at record ₹6,800 Cr. New Energy segment crosses ₹500 Cr quarterly revenue milestone.",
        tickers: &["RELIANCE", "NIFTY50"],
        impact: Impact::High,
    },
    Seed {
        id: "s3",
        title: "FII Outflows Ease — Net Buyers for First Time in 6 Weeks at ₹3,200 Cr",
        source_id: SourceId::Bs,
        time: "31 min ago",
        age_ms: 1_860_000,
        sector: "Global Macro",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::High,
        summary: "Foreign institutional investors turned net buyers on Thursday, ending a 6-week selling streak. Dollar index weakness and improving EM sentiment driving rotation back to Indian large-caps.",
        tickers: &["NIFTY50", "SENSEX", "USDINR"],
        impact: Impact::High,
    },
    Seed {
        id: "s4",
        title: "SEBI New F&O Rules Effective April 1 — Lot Sizes Double, Weekly Expiry Cut to 1",
        source_id: SourceId::Mc,
        time: "52 min ago",
        age_ms: 3_120_000,
        sector: "Regulatory & Policy",
        sentiment: Sentiment::Bearish,
        urgency: Urgency::High,
        summary: "SEBI circular finalizes new F&O framework. Nifty lot size increases from 25 to 75. Only one weekly expiry per exchange allowed. NSE keeps Thursday expiry, BSE switches to Monday. Broker volumes expected to drop 20-25%.",
        tickers: &["BSE", "MCX", "ANGELONE", "CDSL"],
        impact: Impact::High,
    },
    Seed {
        id: "s5",
        title: "IT Sector Q3 Preview: TCS, Infosys Deal Pipeline at Multi-Year High — Upgrade Cycle Begins",
        source_id: SourceId::Ndtv,
        time: "1 hr ago",
        age_ms: 3_900_000,
        sector: "IT & Tech",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::Normal,
        summary: "Brokerages upgrading IT sector ahead of Q3 FY26 results. BFSI and healthcare verticals leading recovery. Gen-AI deals now 12% of total TCV vs 4% a year ago. TCS, Infosys both at buy with 15-18% upside.",
        tickers: &["TCS", "INFY", "HCLTECH", "WIPRO", "TECHM"],
        impact: Impact::Medium,
    },
    Seed {
        id: "s6",
        title: "Brent Crude Slips to $72 on OPEC+ Output Hike Fears — OMC Stocks Rally",
        source_id: SourceId::Reuters,
        time: "1.5 hr ago",
        age_ms: 5_400_000,
        sector: "Oil & Gas",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::Normal,
        summary: "Crude oil falls as OPEC+ members signal production increase from March. HPCL and BPCL marketing margins improve significantly. Analysts estimate ₹3-5 EPS upgrade for OMCs if crude stays below $75.",
        tickers: &["HPCL", "BPCL", "IOC", "ONGC"],
        impact: Impact::Medium,
    },
    Seed {
        id: "s7",
        title: "Maruti Suzuki January Sales: +8.2% YoY — Brezza, Grand Vitara Lead Volume",
        source_id: SourceId::Bs,
        time: "2 hr ago",
        age_ms: 7_200_000,
        sector: "Auto & EV",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::Normal,
        summary: "Maruti January wholesale at 1,89,301 units, up 8.2% YoY. SUV portfolio now 45% of total mix vs 32% three years ago. CNG vehicles at record 32% share. Management raises FY26 volume guidance.",
        tickers: &["MARUTI", "TATAMOTORS", "M&M", "BAJAJ-AUTO"],
        impact: Impact::Medium,
    },
    Seed {
        id: "s8",
        title: "Sun Pharma Gets USFDA Nod for Generic Cancer Drug — $1.2Bn Market Opportunity",
        source_id: SourceId::Mint,
        time: "2.5 hr ago",
        age_ms: 9_000_000,
        sector: "Pharma & Health",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::High,
        summary: "Sun Pharma receives final USFDA approval for generic lenalidomide capsules. First-to-file advantage gives 180-day exclusivity. Analysts expect ₹800-1,100 Cr incremental revenue in FY27. Stock likely to gap up 3-4%.",
        tickers: &["SUNPHARMA", "DRREDDY", "CIPLA"],
        impact: Impact::High,
    },
    Seed {
        id: "s9",
        title: "China Stimulus ¥10 Trillion Infrastructure Push — JSW Steel, Tata Steel Major Beneficiaries",
        source_id: SourceId::Bloomberg,
        time: "3 hr ago",
        age_ms: 10_800_000,
        sector: "Metals & Mining",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::Normal,
        summary: "Beijing announces largest infrastructure stimulus package since 2008. Hot-rolled coil steel prices in Shanghai up 11% in 2 weeks. Indian steelmakers benefiting from improved export realizations and domestic demand pull.",
        tickers: &["TATASTEEL", "JSWSTEEL", "HINDALCO", "SAIL", "VEDL"],
        impact: Impact::Medium,
    },
    Seed {
        id: "s10",
        title: "Social Buzz: Retail Investors Piling Into PSU Infrastructure Stocks on Budget Hopes",
        source_id: SourceId::Social,
        time: "4 hr ago",
        age_ms: 14_400_000,
        sector: "Infrastructure",
        sentiment: Sentiment::Bullish,
        urgency: Urgency::Normal,
        summary: "Twitter/Reddit trending: #BudgetStocks #PSUBoom. IRFC, RVNL, IRCTC trending as retail investors accumulate on dips. Options data shows significant call buildup in infrastructure ETFs suggesting bullish positioning.",
        tickers: &["IRFC", "RVNL", "IRCTC", "NTPC", "POWERGRID"],
        impact: Impact::Low,
    },
];

/// The startup stories, newest first, with timestamps relative to `now`.
pub fn seed_news(now: DateTime<Utc>) -> Vec<NewsItem> {
    SEEDS
        .iter()
        .map(|s| NewsItem {
            id: s.id.to_string(),
            title: s.title.to_string(),
            summary: s.summary.to_string(),
            source: s.source_id.display_name().to_string(),
            source_id: s.source_id,
            time: s.time.to_string(),
            timestamp: now - Duration::milliseconds(s.age_ms),
            sector: s.sector.to_string(),
            sentiment: s.sentiment,
            urgency: s.urgency,
            impact: s.impact,
            tickers: s.tickers.iter().map(|t| t.to_string()).collect(),
            is_new: false,
        })
        .collect()
}
